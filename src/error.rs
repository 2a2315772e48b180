//! Error types for the entity redaction pipeline.
//!
//! Errors are categorized by their source so callers can tell a caller
//! mistake (bad scaling input) from a collaborator failure (classifier,
//! PDF backend) without string matching.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Error type for all pipeline and adapter operations.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error occurred during PDF processing
    #[error("PDF processing error{}: {message}", page_suffix(*page))]
    PdfProcessing {
        message: String,
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text extraction failed
    #[error("Text extraction failed for '{}': {reason}", path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// A viewport dimension that cannot be used as a scale divisor
    #[error("Cannot scale from viewport: {axis} is {value}")]
    InvalidScale { axis: &'static str, value: f64 },

    /// The token classifier failed for a page
    #[error("Classifier failed on page {page}: {reason}")]
    Classifier { page: usize, reason: String },

    /// Highlight or token JSON could not be read or written
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific error (MuPDF)
    #[error("{backend} backend error: {message}")]
    BackendError {
        backend: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn page_suffix(page: Option<usize>) -> String {
    page.map(|p| format!(" on page {}", p)).unwrap_or_default()
}

impl RedactorError {
    /// Wraps a MuPDF failure with a message.
    pub(crate) fn mupdf(message: impl Into<String>, err: mupdf::Error) -> Self {
        Self::BackendError {
            backend: "MuPDF".to_string(),
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}
