//! PDF report target, built on printpdf with the built-in Helvetica faces.
//!
//! Layout is a simple top-down line flow with wrapping and page breaks; the
//! severity tier of each improvement colors its heading line.

use super::{APP_TITLE, ExportError, ExportRecord, generated_stamp};
use crate::formatter::{
    NO_IMPROVEMENTS, NO_NEXT_STEPS, NO_RECOMMENDATIONS, NO_STRENGTHS, NO_SUMMARY,
};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const TITLE_SIZE: f32 = 22.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;

/// Points to millimeters
const PT_TO_MM: f32 = 0.3528;

const TEXT_COLOR: (u8, u8, u8) = (51, 51, 51);
const ACCENT_COLOR: (u8, u8, u8) = (118, 75, 162);

pub(super) fn render_to_file(record: &ExportRecord, path: &Path) -> Result<(), ExportError> {
    let mut writer = PageWriter::new()?;
    let report = &record.report;

    writer.line(APP_TITLE, TITLE_SIZE, true, ACCENT_COLOR);
    writer.line("Architecture Analysis Report", HEADING_SIZE, true, ACCENT_COLOR);
    writer.spacer(4.0);
    writer.paragraph(&format!("Generated: {}", generated_stamp()));
    writer.paragraph(&format!("Model Used: {}", record.model));
    writer.spacer(6.0);

    writer.heading("Executive Summary");
    writer.paragraph(non_empty_or(
        &report.summary_of_reviewer_observations,
        NO_SUMMARY,
    ));
    writer.spacer(4.0);

    writer.heading("System Plan Overview");
    writer.paragraph(non_empty_or(&report.plan_summary, NO_SUMMARY));
    writer.spacer(4.0);

    writer.heading("Strengths");
    if report.strengths.is_empty() {
        writer.paragraph(NO_STRENGTHS);
    } else {
        for strength in &report.strengths {
            let label = match strength.dimension.as_deref() {
                Some(dimension) if !dimension.is_empty() => {
                    format!("{dimension}: {}", strength.point)
                }
                _ => strength.point.clone(),
            };
            writer.line_wrapped(&label, BODY_SIZE, true, TEXT_COLOR);
            writer.paragraph(&format!("Rationale: {}", strength.reason));
            writer.spacer(2.0);
        }
    }
    writer.spacer(4.0);

    writer.heading("Areas for Improvement");
    let improvements = report.sorted_improvements();
    if improvements.is_empty() {
        writer.paragraph(NO_IMPROVEMENTS);
    } else {
        for area in improvements {
            writer.line_wrapped(
                &format!("[{}] {}", area.severity, area.area),
                BODY_SIZE,
                true,
                area.severity.tier_color(),
            );
            writer.paragraph(&format!("Concern: {}", area.concern));
            writer.paragraph(&format!("Suggestion: {}", area.suggestion));
            if let Some(impact) = &area.impact {
                writer.paragraph(&format!("Impact: {impact}"));
            }
            if let Some(trade_offs) = &area.trade_offs_considered {
                writer.paragraph(&format!("Trade-offs: {trade_offs}"));
            }
            writer.spacer(2.0);
        }
    }
    writer.spacer(4.0);

    writer.heading("Strategic Recommendations");
    if report.strategic_recommendations.is_empty() {
        writer.paragraph(NO_RECOMMENDATIONS);
    } else {
        for rec in &report.strategic_recommendations {
            writer.line_wrapped(&rec.recommendation, BODY_SIZE, true, TEXT_COLOR);
            writer.paragraph(&format!("Rationale: {}", rec.rationale));
            if let Some(implications) = &rec.potential_implications {
                writer.paragraph(&format!("Implications: {implications}"));
            }
            writer.spacer(2.0);
        }
    }
    writer.spacer(4.0);

    writer.heading("Next Steps");
    if report.next_steps.is_empty() {
        writer.paragraph(NO_NEXT_STEPS);
    } else {
        for (i, step) in report.next_steps.iter().enumerate() {
            writer.paragraph(&format!("{}. {step}", i + 1));
        }
    }
    writer.spacer(4.0);

    writer.heading("Original Architecture Plan");
    for line in record.plan.lines() {
        writer.paragraph(line);
    }

    writer.finish(path)
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Top-down line flow over one or more A4 pages
struct PageWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter {
    fn new() -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            APP_TITLE,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn heading(&mut self, text: &str) {
        self.line(text, HEADING_SIZE, true, ACCENT_COLOR);
        self.spacer(1.0);
    }

    fn paragraph(&mut self, text: &str) {
        self.line_wrapped(text, BODY_SIZE, false, TEXT_COLOR);
    }

    /// Write text wrapped to the usable page width
    fn line_wrapped(&mut self, text: &str, size: f32, bold: bool, color: (u8, u8, u8)) {
        let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        // Helvetica averages roughly half an em per glyph
        let char_mm = size * 0.5 * PT_TO_MM;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let columns = ((usable_mm / char_mm) as usize).max(20);
        if text.is_empty() {
            self.line("", size, bold, color);
            return;
        }
        for piece in textwrap::wrap(text, columns) {
            self.line(&piece, size, bold, color);
        }
    }

    /// Write a single pre-wrapped line, breaking pages as needed
    fn line(&mut self, text: &str, size: f32, bold: bool, color: (u8, u8, u8)) {
        let line_height = size * 1.35 * PT_TO_MM;
        if self.y - line_height < MARGIN_MM {
            self.new_page();
        }
        self.y -= line_height;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(Color::Rgb(Rgb::new(
            f32::from(color.0) / 255.0,
            f32::from(color.1) / 255.0,
            f32::from(color.2) / 255.0,
            None,
        )));
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
    }

    fn spacer(&mut self, mm: f32) {
        self.y -= mm;
        if self.y < MARGIN_MM {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn finish(self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}
