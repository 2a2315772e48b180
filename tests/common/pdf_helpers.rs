//! Real PDF fixtures for tests that go through MuPDF.
//!
//! Pages are written with printpdf using a builtin font, one `use_text`
//! call per line, so MuPDF extracts each line as written.

use anyhow::Result;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// MuPDF font loading is not thread-safe; tests that open documents in
/// process hold this lock.
static MUPDF_LOCK: Mutex<()> = Mutex::new(());

pub fn mupdf_lock() -> MutexGuard<'static, ()> {
    MUPDF_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Left margin of generated text.
const TEXT_LEFT_MM: f32 = 20.0;
/// Distance from the top edge to the first baseline.
const TEXT_TOP_MM: f32 = 30.0;
/// Baseline-to-baseline distance.
const LINE_SPACING_MM: f32 = 10.0;

/// Builder for test PDFs with one block of lines per page.
///
/// ```no_run
/// # use std::path::Path;
/// # fn main() -> anyhow::Result<()> {
/// let path = TestPdfBuilder::new()
///     .page(&["Call 030-12345678", "Mail jane@example.com"])
///     .build(Path::new("/tmp/contact.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    page_width: Mm,
    page_height: Mm,
    font_size: f32,
}

impl TestPdfBuilder {
    /// A4 pages, 12pt Helvetica.
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: Vec::new(),
            page_width: Mm(210.0),
            page_height: Mm(297.0),
            font_size: 12.0,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the page size of every page, in millimetres.
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.page_width = Mm(width);
        self.page_height = Mm(height);
        self
    }

    /// Appends a page holding `lines`, top to bottom.
    pub fn page(mut self, lines: &[&str]) -> Self {
        self.pages.push(lines.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Writes the PDF to `path` and returns the path.
    pub fn build(self, path: &Path) -> Result<PathBuf> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut targets = vec![(first_page, first_layer)];
        for _ in 1..self.pages.len() {
            targets.push(doc.add_page(self.page_width, self.page_height, "Layer 1"));
        }

        for ((page, layer), lines) in targets.into_iter().zip(&self.pages) {
            let layer = doc.get_page(page).get_layer(layer);
            for (i, line) in lines.iter().enumerate() {
                let baseline = self.page_height.0 - TEXT_TOP_MM - LINE_SPACING_MM * i as f32;
                layer.use_text(
                    line.as_str(),
                    self.font_size,
                    Mm(TEXT_LEFT_MM),
                    Mm(baseline),
                    &font,
                );
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(path)?))?;
        Ok(path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
