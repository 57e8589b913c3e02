//! HTML report target.
//!
//! The page template is persisted next to the exports and created once if
//! absent, so users can restyle their reports without touching code. Section
//! bodies are built here, escaped, and substituted into the template.

use super::{APP_TITLE, ExportError, ExportRecord, generated_stamp};
use crate::formatter::{
    NO_IMPROVEMENTS, NO_NEXT_STEPS, NO_RECOMMENDATIONS, NO_STRENGTHS, NO_SUMMARY,
};
use crate::log_debug;
use crate::sanitize::sanitize_markup;
use pulldown_cmark::{Parser, html::push_html};
use std::fs;
use std::path::Path;

const TEMPLATE_FILENAME: &str = "report_template.html";

/// Load the persisted page template, writing the default one first if it does
/// not exist yet. An existing template is never overwritten.
pub(super) fn ensure_template(output_dir: &Path) -> Result<String, ExportError> {
    let templates_dir = output_dir.join("templates");
    fs::create_dir_all(&templates_dir)?;
    let template_path = templates_dir.join(TEMPLATE_FILENAME);
    if !template_path.exists() {
        fs::write(&template_path, DEFAULT_TEMPLATE)?;
        log_debug!("Created default HTML template: {}", template_path.display());
    }
    Ok(fs::read_to_string(&template_path)?)
}

pub(super) fn render(record: &ExportRecord, template: &str) -> String {
    let report = &record.report;

    let executive_summary = escape(non_empty_or(
        &report.summary_of_reviewer_observations,
        NO_SUMMARY,
    ));
    let plan_summary = escape(non_empty_or(&report.plan_summary, NO_SUMMARY));

    let strengths = if report.strengths.is_empty() {
        format!("<p>{}</p>", escape(NO_STRENGTHS))
    } else {
        report
            .strengths
            .iter()
            .map(|s| {
                let dimension = s.dimension.as_deref().unwrap_or("");
                format!(
                    "<div class=\"strength\">\n<h4>{}</h4>\n<p><span class=\"label\">Point:</span> {}</p>\n<p><span class=\"label\">Rationale:</span> {}</p>\n</div>",
                    escape(dimension),
                    escape(&s.point),
                    escape(&s.reason)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let improvements_list = report.sorted_improvements();
    let improvements = if improvements_list.is_empty() {
        format!("<p>{}</p>", escape(NO_IMPROVEMENTS))
    } else {
        improvements_list
            .iter()
            .map(|area| {
                let mut block = format!(
                    "<div class=\"improvement\">\n<h4>{} <span class=\"severity severity-{}\">{}</span></h4>\n<p><span class=\"label\">Concern:</span> {}</p>\n<p><span class=\"label\">Suggestion:</span> {}</p>",
                    escape(&area.area),
                    escape(&area.severity.canonical()),
                    escape(&area.severity.canonical()),
                    escape(&area.concern),
                    escape(&area.suggestion)
                );
                if let Some(impact) = &area.impact {
                    block.push_str(&format!(
                        "\n<p><span class=\"label\">Impact:</span> {}</p>",
                        escape(impact)
                    ));
                }
                if let Some(trade_offs) = &area.trade_offs_considered {
                    block.push_str(&format!(
                        "\n<p><span class=\"label\">Trade-offs:</span> {}</p>",
                        escape(trade_offs)
                    ));
                }
                block.push_str("\n</div>");
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let recommendations = if report.strategic_recommendations.is_empty() {
        format!("<p>{}</p>", escape(NO_RECOMMENDATIONS))
    } else {
        report
            .strategic_recommendations
            .iter()
            .map(|rec| {
                let mut block = format!(
                    "<div class=\"recommendation\">\n<h4>{}</h4>\n<p><span class=\"label\">Rationale:</span> {}</p>",
                    escape(&rec.recommendation),
                    escape(&rec.rationale)
                );
                if let Some(implications) = &rec.potential_implications {
                    block.push_str(&format!(
                        "\n<p><span class=\"label\">Implications:</span> {}</p>",
                        escape(implications)
                    ));
                }
                block.push_str("\n</div>");
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let next_steps = if report.next_steps.is_empty() {
        format!("<p>{}</p>", escape(NO_NEXT_STEPS))
    } else {
        let items = report
            .next_steps
            .iter()
            .map(|step| format!("<li>{}</li>", escape(step)))
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ol>\n{items}\n</ol>")
    };

    template
        .replace("{{app_title}}", APP_TITLE)
        .replace("{{generated_date}}", &generated_stamp())
        .replace("{{model_used}}", &escape(&record.model))
        .replace("{{executive_summary}}", &executive_summary)
        .replace("{{plan_summary}}", &plan_summary)
        .replace("{{strengths}}", &strengths)
        .replace("{{improvements}}", &improvements)
        .replace("{{recommendations}}", &recommendations)
        .replace("{{next_steps}}", &next_steps)
        .replace("{{original_plan}}", &plan_to_html(&record.plan))
}

/// Render the user's plan Markdown to sanitized HTML for the appendix
fn plan_to_html(plan: &str) -> String {
    let mut html = String::new();
    push_html(&mut html, Parser::new(plan));
    sanitize_markup(&html)
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{app_title}} - Report</title>
    <style>
        :root {
            --primary-color: #667eea;
            --secondary-color: #764ba2;
            --text-color: #333333;
            --background-color: #ffffff;
            --light-bg-color: #f8f9fa;
            --border-color: #dee2e6;
        }

        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: var(--text-color);
            background-color: var(--background-color);
            margin: 0;
            padding: 0;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
        }

        .header {
            background: linear-gradient(135deg, var(--primary-color) 0%, var(--secondary-color) 100%);
            color: white;
            padding: 20px;
            border-radius: 10px;
            margin-bottom: 30px;
            text-align: center;
        }

        h1, h2, h3 {
            color: var(--secondary-color);
        }

        .section {
            background-color: var(--light-bg-color);
            border: 1px solid var(--border-color);
            border-radius: 10px;
            padding: 20px;
            margin-bottom: 20px;
        }

        .metadata {
            font-style: italic;
            margin-bottom: 15px;
            color: #666;
        }

        .strength, .improvement, .recommendation {
            padding: 15px;
            border-left: 4px solid var(--primary-color);
            margin-bottom: 15px;
        }

        .severity {
            display: inline-block;
            padding: 3px 8px;
            border-radius: 4px;
            font-weight: bold;
            color: white;
        }

        .severity-CRITICAL { background-color: #dc3545; }
        .severity-HIGH { background-color: #fd7e14; }
        .severity-MEDIUM { background-color: #ffc107; color: #212529; }
        .severity-LOW { background-color: #28a745; }

        .label {
            font-weight: bold;
        }

        .original-plan {
            background-color: #f8f9fa;
            padding: 15px;
            border-radius: 5px;
            border: 1px solid #dee2e6;
        }

        @media print {
            .no-print { display: none; }
            .section { break-inside: avoid; }
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{app_title}}</h1>
            <h2>Architecture Analysis Report</h2>
        </div>

        <div class="metadata">
            <p>Generated: {{generated_date}} | Model: {{model_used}}</p>
        </div>

        <div class="section">
            <h2>Executive Summary</h2>
            <p>{{executive_summary}}</p>
        </div>

        <div class="section">
            <h2>System Plan Overview</h2>
            <p>{{plan_summary}}</p>
        </div>

        <div class="section">
            <h2>Strengths</h2>
            {{strengths}}
        </div>

        <div class="section">
            <h2>Areas for Improvement</h2>
            {{improvements}}
        </div>

        <div class="section">
            <h2>Strategic Recommendations</h2>
            {{recommendations}}
        </div>

        <div class="section">
            <h2>Next Steps</h2>
            {{next_steps}}
        </div>

        <div class="section">
            <h2>Original Architecture Plan</h2>
            <div class="original-plan">{{original_plan}}</div>
        </div>

        <div class="no-print" style="text-align: center; margin-top: 40px;">
            <button onclick="window.print()">Print/Save as PDF</button>
        </div>
    </div>
</body>
</html>
"##;
