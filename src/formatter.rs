//! Response formatting: a parsed [`AnalysisReport`] into display Markdown.
//!
//! Section order is fixed and the areas-for-improvement list is always
//! severity-sorted regardless of the order the model returned it in. Empty
//! list sections render an explicit placeholder; the export renderers use the
//! same placeholders so every output target shows the same section content.

use crate::types::AnalysisReport;
use crate::ui::rgb::{DIM_WHITE, NEON_CYAN};
use colored::Colorize;

pub const NO_SUMMARY: &str = "No summary provided.";
pub const NO_STRENGTHS: &str = "No strengths identified.";
pub const NO_IMPROVEMENTS: &str = "No areas for improvement identified.";
pub const NO_RECOMMENDATIONS: &str = "No strategic recommendations provided.";
pub const NO_NEXT_STEPS: &str = "No next steps provided.";

/// Render the analysis as display Markdown, deterministic and single-pass.
pub fn render_analysis(report: &AnalysisReport, model_name: &str) -> String {
    let mut output = format!("## 📝 Architecture Analysis (via {model_name})\n\n");

    if !report.summary_of_reviewer_observations.is_empty() {
        output.push_str(&format!(
            "### 🔭 Executive Summary\n{}\n\n",
            report.summary_of_reviewer_observations
        ));
    }

    let plan_summary = if report.plan_summary.is_empty() {
        NO_SUMMARY
    } else {
        &report.plan_summary
    };
    output.push_str(&format!("### 📜 Plan Summary\n{plan_summary}\n\n"));

    output.push_str("### ✅ Strengths\n");
    if report.strengths.is_empty() {
        output.push_str(&format!("_{NO_STRENGTHS}_\n"));
    } else {
        for item in &report.strengths {
            match &item.dimension {
                Some(dimension) if !dimension.is_empty() => {
                    output.push_str(&format!(
                        "- **{dimension}** — {}\n  {}\n",
                        item.point, item.reason
                    ));
                }
                _ => {
                    output.push_str(&format!("- **{}:** {}\n", item.point, item.reason));
                }
            }
        }
    }

    output.push_str("\n### 🔍 Areas for Improvement\n");
    if report.areas_for_improvement.is_empty() {
        output.push_str(&format!("_{NO_IMPROVEMENTS}_\n"));
    } else {
        for item in report.sorted_improvements() {
            output.push_str(&format!("- **[{}] {}**\n", item.severity, item.area));
            output.push_str(&format!("  - **Concern:** {}\n", item.concern));
            output.push_str(&format!("  - **Suggestion:** {}\n", item.suggestion));
            if let Some(impact) = &item.impact {
                output.push_str(&format!("  - **Impact:** {impact}\n"));
            }
            if let Some(trade_offs) = &item.trade_offs_considered {
                output.push_str(&format!("  - **Trade-offs:** {trade_offs}\n"));
            }
        }
    }

    output.push_str("\n### 🧭 Strategic Recommendations\n");
    if report.strategic_recommendations.is_empty() {
        output.push_str(&format!("_{NO_RECOMMENDATIONS}_\n"));
    } else {
        for item in &report.strategic_recommendations {
            output.push_str(&format!("- **{}**\n", item.recommendation));
            output.push_str(&format!("  - **Rationale:** {}\n", item.rationale));
            if let Some(implications) = &item.potential_implications {
                output.push_str(&format!("  - **Implications:** {implications}\n"));
            }
        }
    }

    output.push_str("\n### 🚀 Next Steps\n");
    if report.next_steps.is_empty() {
        output.push_str(&format!("_{NO_NEXT_STEPS}_\n"));
    } else {
        for (i, step) in report.next_steps.iter().enumerate() {
            output.push_str(&format!("{}. {step}\n", i + 1));
        }
    }

    output
}

/// Style rendered Markdown for terminal display.
///
/// Headers, bold spans, and severity badges get the palette treatment;
/// everything else passes through dimmed.
pub fn style_for_terminal(markdown: &str) -> String {
    let mut output = String::new();
    for line in markdown.lines() {
        if let Some(header) = line.strip_prefix("### ") {
            output.push_str(&format!(
                "\n{} {}\n",
                "─".truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2),
                header
                    .truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2)
                    .bold()
            ));
        } else if let Some(header) = line.strip_prefix("## ") {
            output.push_str(&format!("{}\n", header.magenta().bold()));
        } else {
            output.push_str(&style_line(line));
            output.push('\n');
        }
    }
    output
}

/// Style a single content line: severity badges and bold spans
fn style_line(line: &str) -> String {
    let mut result = String::new();
    let mut rest = line;

    while let Some(start) = rest.find("**") {
        let (before, after_marker) = rest.split_at(start);
        result.push_str(&style_badges(before));
        let after_marker = &after_marker[2..];
        if let Some(end) = after_marker.find("**") {
            let bold = &after_marker[..end];
            result.push_str(
                &style_badges(bold)
                    .truecolor(NEON_CYAN.0, NEON_CYAN.1, NEON_CYAN.2)
                    .bold()
                    .to_string(),
            );
            rest = &after_marker[end + 2..];
        } else {
            result.push_str("**");
            rest = after_marker;
        }
    }
    result.push_str(&style_badges(rest));
    result
}

/// Color `[CRITICAL]`-style badges by tier, leaving other text dimmed
fn style_badges(text: &str) -> String {
    use crate::types::Severity;

    let mut result = String::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        if let Some(close) = rest[open..].find(']') {
            let (before, bracketed) = rest.split_at(open);
            result.push_str(&dim(before));
            let badge = &bracketed[1..close];
            let severity = Severity::from(badge);
            if severity.is_recognized() {
                let (r, g, b) = severity.tier_color();
                result.push_str(&format!("[{}]", badge.truecolor(r, g, b).bold()));
            } else {
                result.push_str(&dim(&bracketed[..=close]));
            }
            rest = &bracketed[close + 1..];
        } else {
            break;
        }
    }
    result.push_str(&dim(rest));
    result
}

fn dim(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        text.truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Improvement, Severity};

    #[test]
    fn test_placeholders_for_empty_report() {
        let rendered = render_analysis(&AnalysisReport::default(), "test-model");
        assert!(rendered.contains("(via test-model)"));
        assert!(rendered.contains(NO_SUMMARY));
        assert!(rendered.contains(NO_STRENGTHS));
        assert!(rendered.contains(NO_IMPROVEMENTS));
        assert!(rendered.contains(NO_RECOMMENDATIONS));
        assert!(rendered.contains(NO_NEXT_STEPS));
    }

    #[test]
    fn test_improvements_render_severity_first() {
        let report = AnalysisReport {
            areas_for_improvement: vec![
                Improvement {
                    area: "Later".to_string(),
                    concern: "c".to_string(),
                    suggestion: "s".to_string(),
                    severity: Severity::from("MEDIUM"),
                    impact: None,
                    trade_offs_considered: None,
                },
                Improvement {
                    area: "First".to_string(),
                    concern: "c".to_string(),
                    suggestion: "s".to_string(),
                    severity: Severity::from("CRITICAL"),
                    impact: Some("outage".to_string()),
                    trade_offs_considered: None,
                },
            ],
            ..Default::default()
        };
        let rendered = render_analysis(&report, "m");
        let first = rendered.find("First").expect("First should render");
        let later = rendered.find("Later").expect("Later should render");
        assert!(first < later);
        assert!(rendered.contains("**Impact:** outage"));
    }

    #[test]
    fn test_terminal_styling_keeps_content() {
        let styled = style_for_terminal("### Header\n- **[CRITICAL] Area**\nplain text");
        assert!(styled.contains("Header"));
        assert!(styled.contains("CRITICAL"));
        assert!(styled.contains("plain text"));
    }
}
