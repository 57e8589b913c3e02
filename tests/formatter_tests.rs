#![allow(clippy::unwrap_used)]

use archimedes::formatter::render_analysis;
use archimedes::parser::parse_analysis;

/// End-to-end: a raw model response through the parser and formatter.
#[test]
fn test_rendered_report_orders_by_severity() {
    let raw = r#"{
        "planSummary": "A dashboard.",
        "areasForImprovement": [
            {"area": "Logging", "concern": "c", "suggestion": "s", "severity": "LOW"},
            {"area": "Auth", "concern": "c", "suggestion": "s", "severity": "CRITICAL"},
            {"area": "Caching", "concern": "c", "suggestion": "s", "severity": "MEDIUM"}
        ],
        "nextStepsAndConsiderations": ["step one"]
    }"#;

    let report = parse_analysis(raw).unwrap();
    let rendered = render_analysis(&report, "gemini-2.5-flash");

    let auth = rendered.find("[CRITICAL] Auth").unwrap();
    let caching = rendered.find("[MEDIUM] Caching").unwrap();
    let logging = rendered.find("[LOW] Logging").unwrap();
    assert!(auth < caching);
    assert!(caching < logging);

    assert!(rendered.contains("(via gemini-2.5-flash)"));
    assert!(rendered.contains("1. step one"));
    // Empty strengths list renders its placeholder, not nothing
    assert!(rendered.contains("No strengths identified."));
}

#[test]
fn test_raw_early_schema_response_renders_sorted() {
    let raw = r#"{"planSummary":"S","strengths":[],"areasForImprovement":[{"area":"A","concern":"C","suggestion":"Sg","severity":"LOW"},{"area":"B","concern":"C2","suggestion":"Sg2","severity":"CRITICAL"}],"actionableKeyPoints":["step1"]}"#;
    let rendered = render_analysis(&parse_analysis(raw).unwrap(), "m");

    let b = rendered.find("[CRITICAL] B").unwrap();
    let a = rendered.find("[LOW] A").unwrap();
    assert!(b < a);
    assert!(rendered.contains("1. step1"));
    assert!(rendered.contains("No strengths identified."));
}

#[test]
fn test_section_order_is_fixed() {
    let raw = r#"{
        "summaryOfReviewerObservations": "obs",
        "planSummary": "plan",
        "strengths": [{"point": "p", "reason": "r"}],
        "areasForImprovement": [
            {"area": "a", "concern": "c", "suggestion": "s", "severity": "HIGH"}
        ],
        "strategicRecommendations": [{"recommendation": "rec", "rationale": "why"}],
        "nextStepsAndConsiderations": ["go"]
    }"#;
    let rendered = render_analysis(&parse_analysis(raw).unwrap(), "m");

    let sections = [
        "Executive Summary",
        "Plan Summary",
        "Strengths",
        "Areas for Improvement",
        "Strategic Recommendations",
        "Next Steps",
    ];
    let positions: Vec<usize> = sections
        .iter()
        .map(|s| rendered.find(s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
