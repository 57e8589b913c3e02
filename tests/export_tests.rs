#![allow(clippy::unwrap_used)]

use archimedes::export::{ExportFormat, ExportManager, ExportRecord};
use archimedes::types::{AnalysisReport, Improvement, Severity};
use std::fs;
use tempfile::TempDir;

fn sample_record() -> ExportRecord {
    let mk = |area: &str, severity: &str| Improvement {
        area: area.to_string(),
        concern: "concern".to_string(),
        suggestion: "suggestion".to_string(),
        severity: Severity::from(severity),
        impact: None,
        trade_offs_considered: None,
    };
    ExportRecord {
        report: AnalysisReport {
            plan_summary: "A test plan.".to_string(),
            areas_for_improvement: vec![mk("Minor", "LOW"), mk("Blocker", "CRITICAL")],
            next_steps: vec!["first step".to_string()],
            ..Default::default()
        },
        plan: "# Plan\n\nSome architecture.".to_string(),
        model: "test-model".to_string(),
    }
}

/// `architecture_analysis_<YYYYMMDD_HHMMSS>.<ext>`
fn assert_report_filename(name: &str, extension: &str) {
    let stem = name
        .strip_prefix("architecture_analysis_")
        .unwrap_or_else(|| panic!("unexpected prefix: {name}"));
    let stamp = stem
        .strip_suffix(&format!(".{extension}"))
        .unwrap_or_else(|| panic!("unexpected extension: {name}"));
    assert_eq!(stamp.len(), 15, "timestamp should be YYYYMMDD_HHMMSS");
    assert!(
        stamp
            .chars()
            .enumerate()
            .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() }),
        "unexpected timestamp: {stamp}"
    );
}

#[test]
fn test_markdown_export_writes_severity_sorted_report() {
    let dir = TempDir::new().unwrap();
    let manager = ExportManager::new(dir.path()).unwrap();

    let path = manager
        .export(&sample_record(), ExportFormat::Markdown)
        .unwrap();
    assert_report_filename(path.file_name().unwrap().to_str().unwrap(), "md");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Archimedes Architecture Review"));
    assert!(content.contains("Model Used:"));
    let blocker = content.find("Blocker").unwrap();
    let minor = content.find("Minor").unwrap();
    assert!(blocker < minor, "CRITICAL must precede LOW");
    // Original plan reproduced verbatim in the appendix
    assert!(content.contains("Some architecture."));
}

#[test]
fn test_html_export_creates_template_once() {
    let dir = TempDir::new().unwrap();
    let manager = ExportManager::new(dir.path()).unwrap();

    let path = manager.export(&sample_record(), ExportFormat::Html).unwrap();
    assert_report_filename(path.file_name().unwrap().to_str().unwrap(), "html");

    let template_path = dir.path().join("templates").join("report_template.html");
    assert!(template_path.exists());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("severity-CRITICAL"));
    assert!(!content.contains("{{app_title}}"), "placeholders must be filled");

    // Same severity ordering as the Markdown target
    let blocker = content.find("Blocker").unwrap();
    let minor = content.find("Minor").unwrap();
    assert!(blocker < minor, "CRITICAL must precede LOW");
}

#[test]
fn test_html_export_respects_user_edited_template() {
    let dir = TempDir::new().unwrap();
    let template_dir = dir.path().join("templates");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(
        template_dir.join("report_template.html"),
        "<html><body>CUSTOM {{model_used}}</body></html>",
    )
    .unwrap();

    let manager = ExportManager::new(dir.path()).unwrap();
    let path = manager.export(&sample_record(), ExportFormat::Html).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("CUSTOM test-model"));
}

/// Page text is stored as uncompressed hexadecimal strings, so a report line
/// can be located in the saved bytes by hex-encoding it.
fn pdf_text_position(bytes: &[u8], text: &str) -> Option<usize> {
    let hex: Vec<u8> = text
        .bytes()
        .flat_map(|b| format!("{b:02X}").into_bytes())
        .collect();
    bytes.windows(hex.len()).position(|window| window == hex)
}

#[test]
fn test_pdf_export_writes_a_file() {
    let dir = TempDir::new().unwrap();
    let manager = ExportManager::new(dir.path()).unwrap();

    let path = manager.export(&sample_record(), ExportFormat::Pdf).unwrap();
    assert_report_filename(path.file_name().unwrap().to_str().unwrap(), "pdf");

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "should be a PDF header");

    // Same section set and severity ordering as the text targets
    for heading in [
        "Executive Summary",
        "System Plan Overview",
        "Strengths",
        "Areas for Improvement",
        "Strategic Recommendations",
        "Next Steps",
        "Original Architecture Plan",
    ] {
        assert!(
            pdf_text_position(&bytes, heading).is_some(),
            "PDF should contain the {heading:?} heading"
        );
    }
    let blocker = pdf_text_position(&bytes, "[CRITICAL] Blocker").unwrap();
    let minor = pdf_text_position(&bytes, "[LOW] Minor").unwrap();
    assert!(
        blocker < minor,
        "critical areas should come before low-severity ones"
    );
}

#[test]
fn test_unknown_format_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    assert!("xml".parse::<ExportFormat>().is_err());
    assert!("docx".parse::<ExportFormat>().is_err());
    // Nothing was written for the rejected formats
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_format_aliases() {
    assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
    assert_eq!("MARKDOWN".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
    assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    assert_eq!("Html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
}
