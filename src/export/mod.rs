//! Export rendering: persist an analysis plus its original plan as a
//! PDF, HTML, or Markdown report file.

mod html;
mod markdown;
mod pdf;

use crate::log_debug;
use crate::types::AnalysisReport;
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Title line shared by every report target
pub const APP_TITLE: &str = "Archimedes Architecture Review";

/// Filename prefix for exported reports
pub const REPORT_PREFIX: &str = "architecture_analysis";

/// Ephemeral bundle of everything an export needs. Built after a successful
/// analysis, overwritten wholesale by the next one, never persisted.
#[derive(Clone, Debug)]
pub struct ExportRecord {
    pub report: AnalysisReport,
    /// The original plan text, reproduced verbatim in the report appendix
    pub plan: String,
    /// Model identifier the analysis was generated with
    pub model: String,
}

/// Supported report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Html,
    Markdown,
}

impl ExportFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Export failure taxonomy
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}. Supported formats: pdf, html, markdown")]
    UnsupportedFormat(String),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render PDF: {0}")]
    Pdf(String),
}

/// Writes report files into a configured output directory with
/// timestamp-qualified names.
pub struct ExportManager {
    output_dir: PathBuf,
}

impl ExportManager {
    /// Create a manager, ensuring the output directory exists
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the record in the requested format and return the file path
    pub fn export(
        &self,
        record: &ExportRecord,
        format: ExportFormat,
    ) -> Result<PathBuf, ExportError> {
        let path = self.timestamped_path(REPORT_PREFIX, format.extension());
        match format {
            ExportFormat::Markdown => fs::write(&path, markdown::render(record))?,
            ExportFormat::Html => {
                let template = html::ensure_template(&self.output_dir)?;
                fs::write(&path, html::render(record, &template))?;
            }
            ExportFormat::Pdf => pdf::render_to_file(record, &path)?,
        }
        log_debug!("Generated {} report: {}", format, path.display());
        Ok(path)
    }

    /// `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.<ext>`
    fn timestamped_path(&self, prefix: &str, extension: &str) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        self.output_dir
            .join(format!("{prefix}_{timestamp}.{extension}"))
    }
}

/// Shared metadata line content for all report targets
fn generated_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("PDF".parse::<ExportFormat>().ok(), Some(ExportFormat::Pdf));
        assert_eq!(
            "Markdown".parse::<ExportFormat>().ok(),
            Some(ExportFormat::Markdown)
        );
        assert_eq!("md".parse::<ExportFormat>().ok(), Some(ExportFormat::Markdown));
        assert!(matches!(
            "XML".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(s)) if s == "XML"
        ));
    }
}
