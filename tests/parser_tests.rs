#![allow(clippy::unwrap_used)]

use archimedes::parser::{ParseError, parse_analysis};

#[test]
fn test_empty_response_is_not_malformed_json() {
    for raw in ["", "   ", "\n\t\n"] {
        match parse_analysis(raw) {
            Err(ParseError::EmptyResponse) => {}
            other => panic!("expected EmptyResponse for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_malformed_json_carries_raw_text() {
    let err = parse_analysis("{not json").unwrap_err();
    match &err {
        ParseError::MalformedJson { .. } => {
            assert_eq!(err.raw_text(), Some("{not json"));
        }
        other => panic!("expected MalformedJson, got {other:?}"),
    }
}

#[test]
fn test_minimal_object_fills_defaults() {
    let report = parse_analysis(r#"{"planSummary": "A system."}"#).unwrap();
    assert_eq!(report.plan_summary, "A system.");
    assert!(report.summary_of_reviewer_observations.is_empty());
    assert!(report.strengths.is_empty());
    assert!(report.areas_for_improvement.is_empty());
    assert!(report.strategic_recommendations.is_empty());
    assert!(report.next_steps.is_empty());
}

#[test]
fn test_full_response_round_trip() {
    let raw = r#"{
        "summaryOfReviewerObservations": "Solid overall.",
        "planSummary": "Event pipeline.",
        "strengths": [
            {"dimension": "Scalability", "point": "Kafka buffer", "reason": "decouples producers"}
        ],
        "areasForImprovement": [
            {
                "area": "Persistence",
                "concern": "Single Postgres node",
                "suggestion": "Add a replica",
                "severity": "HIGH",
                "impact": "Outage on node loss",
                "tradeOffsConsidered": "Operational overhead"
            }
        ],
        "strategicRecommendations": [
            {"recommendation": "Adopt CDC", "rationale": "simplifies sync", "potentialImplications": "new infra"}
        ],
        "nextStepsAndConsiderations": ["Add replica", "Load test"]
    }"#;

    let report = parse_analysis(raw).unwrap();
    assert_eq!(report.strengths[0].dimension.as_deref(), Some("Scalability"));
    let improvement = &report.areas_for_improvement[0];
    assert_eq!(improvement.severity.canonical(), "HIGH");
    assert_eq!(
        improvement.trade_offs_considered.as_deref(),
        Some("Operational overhead")
    );
    assert_eq!(report.next_steps, vec!["Add replica", "Load test"]);
}

#[test]
fn test_early_schema_field_names_still_parse() {
    // Older prompts called the last section actionableKeyPoints
    let raw = r#"{"planSummary": "x", "actionableKeyPoints": ["do the thing"]}"#;
    let report = parse_analysis(raw).unwrap();
    assert_eq!(report.next_steps, vec!["do the thing"]);
}

#[test]
fn test_code_fenced_json_parses() {
    let raw = "```json\n{\"planSummary\": \"fenced\"}\n```";
    let report = parse_analysis(raw).unwrap();
    assert_eq!(report.plan_summary, "fenced");
}

#[test]
fn test_unknown_severity_survives_parse() {
    let raw = r#"{"areasForImprovement": [
        {"area": "a", "concern": "c", "suggestion": "s", "severity": "SOMEDAY"}
    ]}"#;
    let report = parse_analysis(raw).unwrap();
    assert!(!report.areas_for_improvement[0].severity.is_recognized());
}
