//! Collaborator traits and supporting types.
//!
//! The pipeline reads pages, classifies text and hands finished plans to a
//! writer through these traits, so document backends and models can be
//! swapped or faked in tests.

use super::planner::RedactionDescriptor;
use crate::domain::Token;
use crate::error::RedactorResult;
use crate::geometry::{GlyphSearch, PageBounds};
use std::path::Path;

/// Read access to a paginated document.
pub trait PageSource: GlyphSearch {
    fn page_count(&self) -> usize;

    /// Plain text of a page.
    fn page_text(&self, page_index: usize) -> RedactorResult<String>;

    /// Page bounds in page units.
    fn page_bounds(&self, page_index: usize) -> RedactorResult<PageBounds>;
}

/// Token classification model.
///
/// Implementations may fail transiently; the pipeline does not retry. The
/// page index lets precomputed outputs be looked up and is otherwise
/// ignorable.
pub trait TokenClassifier {
    fn classify(&self, page_index: usize, text: &str) -> RedactorResult<Vec<Token>>;
}

/// Statistics about a redaction operation.
#[derive(Debug, Clone, Default)]
pub struct RedactionResult {
    /// Number of rectangles redacted
    pub instances_redacted: usize,

    /// Pages processed
    pub pages_processed: usize,

    /// Pages with redactions
    pub pages_modified: usize,

    /// Whether text was physically removed (vs visually obscured)
    pub secure: bool,
}

impl RedactionResult {
    /// Creates a result indicating no redactions were needed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if any redactions were applied.
    pub fn has_redactions(&self) -> bool {
        self.instances_redacted > 0
    }
}

/// Writes planned redactions into an output document.
pub trait RedactionWriter: Send + Sync {
    /// Applies `plan` to `input` and writes the result to `output`.
    fn apply(
        &self,
        input: &Path,
        output: &Path,
        plan: &[RedactionDescriptor],
    ) -> RedactorResult<RedactionResult>;

    /// Returns a human-readable name for this writer.
    fn name(&self) -> &str;

    /// Returns whether this writer removes content rather than covering it.
    fn is_secure(&self) -> bool;
}
