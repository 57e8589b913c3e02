//! Archimedes - AI-powered architecture plan reviewer
//!
//! This library turns a Markdown architecture plan into a structured critique
//! using either a cloud LLM (Google Gemini) or a locally-hosted
//! OpenAI-compatible server (LM Studio), then renders the critique as
//! terminal output or an exportable PDF/HTML/Markdown report.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod export;
pub mod formatter;
pub mod llm;
pub mod logger;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod sanitize;
pub mod types;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use providers::{Provider, ProviderConfig};

// Re-exports from types module
pub use types::{AnalysisReport, Improvement, Severity, Strength, StrategicRecommendation};
