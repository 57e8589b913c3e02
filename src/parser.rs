//! Response parsing: raw model text into a validated [`AnalysisReport`].

use crate::log_debug;
use crate::types::AnalysisReport;
use thiserror::Error;

/// Failure modes for model output that did not honor the contract
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty response from model")]
    EmptyResponse,
    #[error("malformed JSON response at line {line}, column {column}: {message}")]
    MalformedJson {
        message: String,
        line: usize,
        column: usize,
        /// The offending text, surfaced so the user can judge and retry
        text: String,
    },
}

impl ParseError {
    /// The raw model text that failed to parse, if any
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::EmptyResponse => None,
            Self::MalformedJson { text, .. } => Some(text),
        }
    }
}

/// Parse raw model output into an [`AnalysisReport`].
///
/// Empty or whitespace-only input is rejected before any JSON work so it is
/// always reported as [`ParseError::EmptyResponse`]. Markdown code fences are
/// stripped when the payload is wrapped in them; anything else that is not a
/// JSON object fails with the original text attached. Missing optional fields
/// degrade to defaults rather than failing.
pub fn parse_analysis(raw: &str) -> Result<AnalysisReport, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let payload = strip_code_fences(trimmed);
    serde_json::from_str(payload).map_err(|e| {
        log_debug!("JSON parse failed: {} text: {}", e, raw);
        ParseError::MalformedJson {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
            text: raw.to_string(),
        }
    })
}

/// Models occasionally wrap JSON in a markdown code fence even when asked for
/// a pure JSON body. Unwrap that one layer; leave everything else untouched.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence
    match inner.split_once('\n') {
        Some((first_line, body)) if first_line.trim().chars().all(char::is_alphanumeric) => {
            body.trim()
        }
        _ => inner.trim(),
    }
}
