//! Markdown report target

use super::{APP_TITLE, ExportRecord, generated_stamp};
use crate::formatter::{
    NO_IMPROVEMENTS, NO_NEXT_STEPS, NO_RECOMMENDATIONS, NO_STRENGTHS, NO_SUMMARY,
};

pub(super) fn render(record: &ExportRecord) -> String {
    let report = &record.report;
    let mut md = String::new();

    md.push_str(&format!("# {APP_TITLE}\n\n"));
    md.push_str("## Architecture Analysis Report\n\n");
    md.push_str(&format!("**Generated:** {}\n", generated_stamp()));
    md.push_str(&format!("**Model Used:** {}\n\n", record.model));

    md.push_str("## Executive Summary\n");
    md.push_str(non_empty_or(
        &report.summary_of_reviewer_observations,
        NO_SUMMARY,
    ));
    md.push_str("\n\n");

    md.push_str("## System Plan Overview\n");
    md.push_str(non_empty_or(&report.plan_summary, NO_SUMMARY));
    md.push_str("\n\n");

    md.push_str("## Strengths\n");
    if report.strengths.is_empty() {
        md.push_str(NO_STRENGTHS);
        md.push_str("\n\n");
    } else {
        for strength in &report.strengths {
            if let Some(dimension) = strength.dimension.as_deref().filter(|d| !d.is_empty()) {
                md.push_str(&format!("### {dimension}\n"));
            }
            md.push_str(&format!("**Point:** {}\n", strength.point));
            md.push_str(&format!("**Rationale:** {}\n\n", strength.reason));
        }
    }

    md.push_str("## Areas for Improvement\n");
    let improvements = report.sorted_improvements();
    if improvements.is_empty() {
        md.push_str(NO_IMPROVEMENTS);
        md.push_str("\n\n");
    } else {
        for area in improvements {
            md.push_str(&format!("### {} - {}\n", area.area, area.severity));
            md.push_str(&format!("**Concern:** {}\n", area.concern));
            md.push_str(&format!("**Suggestion:** {}\n", area.suggestion));
            if let Some(impact) = &area.impact {
                md.push_str(&format!("**Impact:** {impact}\n"));
            }
            if let Some(trade_offs) = &area.trade_offs_considered {
                md.push_str(&format!("**Trade-offs:** {trade_offs}\n"));
            }
            md.push('\n');
        }
    }

    md.push_str("## Strategic Recommendations\n");
    if report.strategic_recommendations.is_empty() {
        md.push_str(NO_RECOMMENDATIONS);
        md.push_str("\n\n");
    } else {
        for rec in &report.strategic_recommendations {
            md.push_str(&format!("### {}\n", rec.recommendation));
            md.push_str(&format!("**Rationale:** {}\n", rec.rationale));
            if let Some(implications) = &rec.potential_implications {
                md.push_str(&format!("**Implications:** {implications}\n"));
            }
            md.push('\n');
        }
    }

    md.push_str("## Next Steps\n");
    if report.next_steps.is_empty() {
        md.push_str(NO_NEXT_STEPS);
        md.push('\n');
    } else {
        for (i, step) in report.next_steps.iter().enumerate() {
            md.push_str(&format!("{}. {step}\n", i + 1));
        }
    }
    md.push('\n');

    md.push_str("## Original Architecture Plan\n");
    md.push_str("```markdown\n");
    md.push_str(&record.plan);
    if !record.plan.ends_with('\n') {
        md.push('\n');
    }
    md.push_str("```\n");

    md
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}
