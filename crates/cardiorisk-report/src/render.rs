//! PDF rendering via `printpdf`.
//!
//! Page geometry follows a plain A4 document: one-inch margins, 10pt text
//! on 12pt leading. Paragraphs wrap by character count and flow onto a new
//! page when the bottom margin is reached.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use cardiorisk_core::Assessment;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::info;

use crate::error::ReportError;
use crate::layout::{Block, ReportView, TITLE, layout};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_PT: f32 = 72.0;
const FONT_SIZE_PT: f32 = 10.0;
const LEADING_PT: f32 = 12.0;
const WRAP_CHARS: usize = 90;
const LAYER: &str = "Layer 1";

/// DejaVu Sans shipped with the repository, relative to the working directory.
pub const BUNDLED_FONT: &str = "assets/fonts/DejaVuSans.ttf";

/// Font used for every paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportFont {
    /// Builtin Helvetica. ASCII only: markers are dropped, bullets become `-`.
    Builtin,
    /// TrueType/OpenType font file covering the report's character set.
    TrueType(PathBuf),
}

impl Default for ReportFont {
    fn default() -> Self {
        Self::TrueType(PathBuf::from(BUNDLED_FONT))
    }
}

/// Writes the report for the last assessment to a fixed path.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
    font: ReportFont,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>, font: ReportFont) -> Self {
        Self {
            path: path.into(),
            font,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name offered to the browser for download.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.pdf".to_string())
    }

    /// Render the report, overwrite the file at [`Self::path`], and return its bytes.
    pub fn write(&self, last: Option<&Assessment>) -> Result<Vec<u8>, ReportError> {
        let view = ReportView::from_assessment(last);
        let bytes = render_pdf(&layout(&view), &self.font)?;

        std::fs::write(&self.path, &bytes).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            empty = last.is_none(),
            "wrote report"
        );
        Ok(bytes)
    }
}

/// Render blocks to PDF bytes.
pub fn render_pdf(blocks: &[Block], font: &ReportFont) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);

    let (font_ref, ascii_only) = match font {
        ReportFont::Builtin => (
            doc.add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_err)?,
            true,
        ),
        ReportFont::TrueType(path) => {
            let font_err = |reason: String| ReportError::Font {
                path: path.clone(),
                reason,
            };
            let file = File::open(path).map_err(|e| font_err(e.to_string()))?;
            let font_ref = doc
                .add_external_font(file)
                .map_err(|e| font_err(e.to_string()))?;
            (font_ref, false)
        }
    };

    let mut cursor = Cursor {
        layer: doc.get_page(page).get_layer(layer),
        y: page_top(),
    };

    for block in blocks {
        match block {
            Block::Paragraph(text) => {
                let text = if ascii_only {
                    to_builtin_charset(text)
                } else {
                    text.clone()
                };
                for line in wrap_text(&text, WRAP_CHARS) {
                    cursor.line(&doc, &line, &font_ref);
                }
            }
            Block::Spacer(height) => cursor.y -= *height,
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(pdf_err)?;
    buf.into_inner().map_err(|e| ReportError::Pdf(e.to_string()))
}

/// Current page layer and baseline position, in points from the page bottom.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    fn line(&mut self, doc: &PdfDocumentReference, text: &str, font: &IndirectFontRef) {
        if self.y - LEADING_PT < MARGIN_PT {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = page_top();
        }
        self.y -= LEADING_PT;
        self.layer
            .use_text(text, FONT_SIZE_PT, pt(MARGIN_PT), pt(self.y), font);
    }
}

fn page_top() -> f32 {
    PAGE_HEIGHT_MM / 25.4 * 72.0 - MARGIN_PT
}

fn pt(v: f32) -> Mm {
    Mm(v * 25.4 / 72.0)
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

/// Reduce text to what the builtin Helvetica encoding can show.
fn to_builtin_charset(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter_map(|c| match c {
            '•' => Some('-'),
            c if c.is_ascii() => Some(c),
            _ => None,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap on character count. Always yields at least one line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
