//! MuPDF-backed document access and secure redaction.
//!
//! [`MupdfDocument`] serves page text, bounds and glyph search to the
//! analysis pipeline. [`SecureRedactionWriter`] burns planned rectangles
//! into a copy of the document using MuPDF's redaction API, so redacted
//! content cannot be recovered.

use super::planner::RedactionDescriptor;
use super::strategy::{PageSource, RedactionResult, RedactionWriter};
use crate::error::{RedactorError, RedactorResult};
use crate::geometry::{GlyphSearch, PageBounds, PageSize, Quad};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use mupdf::pdf::{PdfAnnotationType, PdfDocument, PdfPage};
use mupdf::{Rect as MuRect, TextPageOptions};

const DEFAULT_MAX_HITS: u32 = crate::config::DEFAULT_MAX_HITS;

fn path_str<'a>(path: &'a Path, parameter: &str) -> RedactorResult<&'a str> {
    path.to_str().ok_or_else(|| RedactorError::InvalidInput {
        parameter: parameter.to_string(),
        reason: "Path contains invalid UTF-8".to_string(),
    })
}

fn page_error(message: String, page_index: usize, err: mupdf::Error) -> RedactorError {
    RedactorError::PdfProcessing {
        message,
        page: Some(page_index + 1),
        source: Some(Box::new(err)),
    }
}

/// Converts a page index into MuPDF's page handle type.
fn mupdf_index(page_index: usize) -> RedactorResult<i32> {
    i32::try_from(page_index).map_err(|_| RedactorError::InvalidInput {
        parameter: "page".to_string(),
        reason: format!("page index {} is beyond MuPDF's page range", page_index),
    })
}

/// A PDF opened for analysis.
///
/// Text, bounds and glyph search all come from the same MuPDF document, so
/// every string resolved from a page's text is one the search can find.
pub struct MupdfDocument {
    path: PathBuf,
    pdf: PdfDocument,
    page_count: usize,
    max_hits: u32,
}

impl MupdfDocument {
    pub fn open(path: &Path) -> RedactorResult<Self> {
        if !path.exists() {
            return Err(RedactorError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Input file does not exist",
                ),
            });
        }

        let pdf = PdfDocument::open(path_str(path, "input")?).map_err(|e| {
            RedactorError::PdfProcessing {
                message: "Failed to open PDF with MuPDF".to_string(),
                page: None,
                source: Some(Box::new(e)),
            }
        })?;

        let page_count = pdf
            .page_count()
            .map_err(|e| RedactorError::mupdf("Failed to get page count", e))?;

        debug!(path = %path.display(), pages = page_count, "opened document");

        Ok(Self {
            path: path.to_path_buf(),
            pdf,
            page_count: usize::try_from(page_count).unwrap_or(0),
            max_hits: DEFAULT_MAX_HITS,
        })
    }

    /// Sets the maximum number of search hits per literal and page.
    pub fn with_max_hits(mut self, max_hits: u32) -> Self {
        self.max_hits = max_hits;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_index(&self, page_index: usize) -> RedactorResult<()> {
        if page_index >= self.page_count {
            return Err(RedactorError::InvalidInput {
                parameter: "page".to_string(),
                reason: format!(
                    "page {} out of range (document has {})",
                    page_index + 1,
                    self.page_count
                ),
            });
        }
        Ok(())
    }

    fn load_page(&self, page_index: usize) -> RedactorResult<mupdf::Page> {
        self.check_index(page_index)?;
        self.pdf.load_page(mupdf_index(page_index)?).map_err(|e| {
            page_error(format!("Failed to load page {}", page_index + 1), page_index, e)
        })
    }
}

impl GlyphSearch for MupdfDocument {
    fn search(&self, page_index: usize, literal: &str) -> RedactorResult<Vec<Vec<Quad>>> {
        let page = self.load_page(page_index)?;
        let hits = page
            .search(literal, self.max_hits)
            .map_err(|e| RedactorError::mupdf(format!("Search failed for: {}", literal), e))?;

        // MuPDF reports one quad per matched line, without grouping them.
        Ok(hits
            .into_iter()
            .map(|q| {
                vec![Quad([
                    q.ul.x as f64,
                    q.ul.y as f64,
                    q.ur.x as f64,
                    q.ur.y as f64,
                    q.ll.x as f64,
                    q.ll.y as f64,
                    q.lr.x as f64,
                    q.lr.y as f64,
                ])]
            })
            .collect())
    }
}

impl PageSource for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page_index: usize) -> RedactorResult<String> {
        let page = self.load_page(page_index)?;
        let text_page = page
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| page_error("Failed to build structured text".to_string(), page_index, e))?;
        text_page.to_text().map_err(|e| RedactorError::TextExtraction {
            path: self.path.clone(),
            reason: format!("page {}: {}", page_index + 1, e),
        })
    }

    fn page_bounds(&self, page_index: usize) -> RedactorResult<PageBounds> {
        let page = self.load_page(page_index)?;
        let bounds = page.bounds().map_err(|e| {
            RedactorError::mupdf(format!("Failed to get bounds for page {}", page_index + 1), e)
        })?;
        Ok(PageBounds {
            x: bounds.x0 as f64,
            y: bounds.y0 as f64,
            width: (bounds.x1 - bounds.x0) as f64,
            height: (bounds.y1 - bounds.y0) as f64,
        })
    }
}

/// Extracts the full text of a PDF.
pub fn extract_text(input: &Path) -> RedactorResult<String> {
    let bytes = std::fs::read(input).map_err(|e| RedactorError::Io {
        path: input.to_path_buf(),
        source: e,
    })?;

    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| RedactorError::TextExtraction {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Redaction writer that physically removes content using MuPDF.
///
/// For every planned rectangle it:
/// 1. Rescales the rectangle into the page's own units
/// 2. Creates a PDF redaction annotation covering it
/// 3. Applies the page's redactions using `pdf_redact_page`
///
/// The output is saved once all pages are processed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureRedactionWriter;

impl SecureRedactionWriter {
    pub fn new() -> Self {
        Self
    }

    fn apply_page(
        &self,
        pdf_doc: &PdfDocument,
        page_index: usize,
        descriptor: &RedactionDescriptor,
    ) -> RedactorResult<usize> {
        let page = pdf_doc.load_page(mupdf_index(page_index)?).map_err(|e| {
            page_error(format!("Failed to load page {}", page_index + 1), page_index, e)
        })?;

        let bounds = page.bounds().map_err(|e| {
            RedactorError::mupdf(format!("Failed to get bounds for page {}", page_index + 1), e)
        })?;
        let page_size = PageSize::new(
            (bounds.x1 - bounds.x0) as f64,
            (bounds.y1 - bounds.y0) as f64,
        );

        let mut pdf_page = match PdfPage::try_from(page.clone()) {
            Ok(p) => p,
            Err(_) => {
                warn!(page = page_index + 1, "not a PDF page, skipping");
                return Ok(0);
            }
        };

        let mut page_redactions = 0;
        for rect in &descriptor.rects {
            let rect = rect.rescale(page_size)?;

            let annot = pdf_page
                .create_annotation(PdfAnnotationType::Redact)
                .map_err(|e| {
                    page_error(
                        "Failed to create redaction annotation".to_string(),
                        page_index,
                        e,
                    )
                })?;

            let area = MuRect {
                x0: rect.x1 as f32,
                y0: rect.y1 as f32,
                x1: rect.x2 as f32,
                y1: rect.y2 as f32,
            };

            unsafe {
                ffi::set_annotation_rect(&annot, area);
            }

            page_redactions += 1;
        }

        if page_redactions > 0 {
            pdf_page.redact().map_err(|e| {
                page_error(
                    format!("Failed to apply redactions on page {}", page_index + 1),
                    page_index,
                    e,
                )
            })?;
        }

        Ok(page_redactions)
    }
}

impl RedactionWriter for SecureRedactionWriter {
    fn apply(
        &self,
        input: &Path,
        output: &Path,
        plan: &[RedactionDescriptor],
    ) -> RedactorResult<RedactionResult> {
        if plan.iter().all(|d| d.rects.is_empty()) {
            std::fs::copy(input, output).map_err(|e| RedactorError::Io {
                path: output.to_path_buf(),
                source: e,
            })?;
            return Ok(RedactionResult::none());
        }

        let pdf_doc = PdfDocument::open(path_str(input, "input")?).map_err(|e| {
            RedactorError::PdfProcessing {
                message: "Failed to open PDF with MuPDF".to_string(),
                page: None,
                source: Some(Box::new(e)),
            }
        })?;

        let page_count = pdf_doc
            .page_count()
            .map_err(|e| RedactorError::mupdf("Failed to get page count", e))?;
        let page_count = usize::try_from(page_count).unwrap_or(0);

        let mut result = RedactionResult {
            pages_processed: page_count,
            secure: true,
            ..Default::default()
        };

        for descriptor in plan {
            let page_number = descriptor.page_number as usize;
            if page_number == 0 || page_number > page_count {
                warn!(
                    page = page_number,
                    pages = page_count,
                    "redaction targets a page outside the document, skipping"
                );
                continue;
            }

            let applied = self.apply_page(&pdf_doc, page_number - 1, descriptor)?;
            if applied > 0 {
                result.instances_redacted += applied;
                result.pages_modified += 1;
            }
        }

        pdf_doc
            .save(path_str(output, "output")?)
            .map_err(|e| RedactorError::PdfProcessing {
                message: "Failed to save redacted PDF".to_string(),
                page: None,
                source: Some(Box::new(e)),
            })?;

        info!(
            rects = result.instances_redacted,
            pages = result.pages_modified,
            output = %output.display(),
            "applied redactions"
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "SecureRedaction"
    }

    fn is_secure(&self) -> bool {
        true
    }
}

/// FFI helpers for MuPDF annotation operations.
mod ffi {
    use mupdf::pdf::PdfAnnotation;
    use mupdf::Rect;

    /// Sets the rectangle for a PDF annotation via FFI.
    ///
    /// # Safety
    /// The annotation must be valid and the context properly initialized.
    pub unsafe fn set_annotation_rect(annot: &PdfAnnotation, rect: Rect) {
        #[repr(C)]
        struct PdfAnnotRaw {
            inner: *mut mupdf_sys::pdf_annot,
        }

        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let fz_rect = mupdf_sys::fz_rect {
                x0: rect.x0,
                y0: rect.y0,
                x1: rect.x1,
                y1: rect.y1,
            };

            mupdf_sys::pdf_set_annot_rect(ctx, annot_raw.inner, fz_rect);
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_identity() {
        let writer = SecureRedactionWriter::new();
        assert_eq!(writer.name(), "SecureRedaction");
        assert!(writer.is_secure());
    }

    #[test]
    fn test_empty_plan_copies_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        std::fs::write(&input, b"%PDF-1.4 not really").unwrap();

        let result = SecureRedactionWriter::new()
            .apply(&input, &output, &[])
            .unwrap();
        assert!(!result.has_redactions());
        assert_eq!(std::fs::read(&output).unwrap(), b"%PDF-1.4 not really");
    }

    #[test]
    fn test_page_index_conversion() {
        assert_eq!(mupdf_index(3).unwrap(), 3);
        assert!(matches!(
            mupdf_index(usize::MAX),
            Err(RedactorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_open_missing_document() {
        let result = MupdfDocument::open(Path::new("/nonexistent/file.pdf"));
        assert!(matches!(result, Err(RedactorError::Io { .. })));
    }
}
