//! Structured response types for architecture analysis

mod analysis;

pub use analysis::{AnalysisReport, Improvement, Severity, Strength, StrategicRecommendation};
