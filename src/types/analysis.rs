use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the structured critique returned by the model.
///
/// Every list field defaults to empty so a sparse response still parses; the
/// formatter decides how absent sections are displayed. The struct is never
/// mutated after parsing.
#[derive(Clone, Serialize, Deserialize, JsonSchema, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Executive summary of the review (absent in the early schema version)
    #[serde(default)]
    pub summary_of_reviewer_observations: String,
    /// Brief summary of what the reviewed system does
    #[serde(default)]
    pub plan_summary: String,
    /// Positive observations about the plan
    #[serde(default)]
    pub strengths: Vec<Strength>,
    /// Identified problems, ordered by the model but displayed severity-first
    #[serde(default)]
    pub areas_for_improvement: Vec<Improvement>,
    /// Higher-level architectural shifts worth considering
    #[serde(default)]
    pub strategic_recommendations: Vec<StrategicRecommendation>,
    /// Prioritized action list; the early schema called this `actionableKeyPoints`
    #[serde(
        default,
        rename = "nextStepsAndConsiderations",
        alias = "actionableKeyPoints"
    )]
    pub next_steps: Vec<String>,
}

/// A single positive observation
#[derive(Clone, Serialize, Deserialize, JsonSchema, Debug)]
pub struct Strength {
    /// Review dimension this falls under (absent in the early schema version)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    /// The specific strength
    #[serde(default)]
    pub point: String,
    /// Why it is a strength
    #[serde(default)]
    pub reason: String,
}

/// A single identified problem with a severity tier
#[derive(Clone, Serialize, Deserialize, JsonSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    /// The architectural area the concern applies to
    #[serde(default)]
    pub area: String,
    /// What the exact problem or unaddressed risk is
    #[serde(default)]
    pub concern: String,
    /// Actionable recommendation
    #[serde(default)]
    pub suggestion: String,
    /// Severity tier, CRITICAL through LOW
    #[serde(default)]
    pub severity: Severity,
    /// Consequence if not addressed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Trade-offs of the suggestion, when the model states them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_offs_considered: Option<String>,
}

/// A broader strategic recommendation (richer schema version only)
#[derive(Clone, Serialize, Deserialize, JsonSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StrategicRecommendation {
    /// The recommended architectural shift
    #[serde(default)]
    pub recommendation: String,
    /// Why the shift is beneficial
    #[serde(default)]
    pub rationale: String,
    /// Effort or change required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_implications: Option<String>,
}

/// Severity tier carried as the raw string the model returned.
///
/// Unknown values survive deserialization and sort after the four known
/// tiers instead of failing the parse.
#[derive(Clone, Serialize, Deserialize, JsonSchema, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    /// The four recognized tiers, highest priority first
    pub const TIERS: [&'static str; 4] = ["CRITICAL", "HIGH", "MEDIUM", "LOW"];

    /// Sort key: CRITICAL=0 .. LOW=3, anything unrecognized last
    pub fn rank(&self) -> u8 {
        let upper = self.0.to_uppercase();
        Self::TIERS
            .iter()
            .position(|tier| *tier == upper)
            .and_then(|index| u8::try_from(index).ok())
            .unwrap_or(u8::MAX)
    }

    /// Whether the value is one of the four known tiers
    pub fn is_recognized(&self) -> bool {
        self.rank() != u8::MAX
    }

    /// Canonical upper-case form for display
    pub fn canonical(&self) -> String {
        self.0.to_uppercase()
    }

    /// Fixed display color per tier; unrecognized tiers share the LOW color
    pub fn tier_color(&self) -> (u8, u8, u8) {
        match self.rank() {
            0 => (220, 53, 69),   // CRITICAL - red
            1 => (253, 126, 20),  // HIGH - orange
            2 => (255, 193, 7),   // MEDIUM - amber
            _ => (40, 167, 69),   // LOW and unrecognized - green
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl AnalysisReport {
    /// Areas for improvement in display order: severity-sorted, stable within
    /// equal tiers. Every renderer goes through this accessor so all output
    /// targets share one ordering.
    pub fn sorted_improvements(&self) -> Vec<&Improvement> {
        let mut items: Vec<&Improvement> = self.areas_for_improvement.iter().collect();
        items.sort_by_key(|item| item.severity.rank());
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank_order() {
        assert!(Severity::from("CRITICAL").rank() < Severity::from("HIGH").rank());
        assert!(Severity::from("HIGH").rank() < Severity::from("MEDIUM").rank());
        assert!(Severity::from("MEDIUM").rank() < Severity::from("LOW").rank());
        assert!(Severity::from("LOW").rank() < Severity::from("BANANAS").rank());
    }

    #[test]
    fn test_severity_case_insensitive() {
        assert_eq!(Severity::from("critical").rank(), 0);
        assert!(Severity::from("low").is_recognized());
        assert!(!Severity::from("").is_recognized());
        assert_eq!(Severity::from("high").canonical(), "HIGH");
    }

    #[test]
    fn test_sorted_improvements_stable() {
        let mk = |area: &str, severity: &str| Improvement {
            area: area.to_string(),
            concern: String::new(),
            suggestion: String::new(),
            severity: Severity::from(severity),
            impact: None,
            trade_offs_considered: None,
        };
        let report = AnalysisReport {
            areas_for_improvement: vec![
                mk("a", "LOW"),
                mk("b", "CRITICAL"),
                mk("c", "LOW"),
                mk("d", "WEIRD"),
                mk("e", "HIGH"),
            ],
            ..Default::default()
        };

        let order: Vec<&str> = report
            .sorted_improvements()
            .iter()
            .map(|i| i.area.as_str())
            .collect();
        assert_eq!(order, vec!["b", "e", "a", "c", "d"]);
    }
}
