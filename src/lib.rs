//! Entity detection and secure redaction for PDF documents.
//!
//! Sensitive spans are found by merging sub-word classifier output with
//! deterministic patterns, located on the page through glyph search, and
//! finally burned out of the document with MuPDF's redaction API.
//!
//! # Features
//!
//! - **Token Reconstruction**: Rebuilds whole-word entities from BIO-tagged word pieces
//! - **Pattern Library**: Phone numbers, email addresses, monetary amounts and dates
//! - **Location Refinement**: Pulls adjacent street numbers into location entities
//! - **Geometry Mapping**: Highlight regions in page units, user regions in a logical page space
//! - **Secure Redaction**: Physically removes text from PDFs (not just visual overlay)
//!
//! # Architecture
//!
//! - [`domain`]: Tokens, entities, reconstruction and pattern matching
//! - [`geometry`]: Quads, rects and coordinate space conversion
//! - [`highlight`]: Highlight records and the per-document collection
//! - [`redaction`]: Page analysis, planning and redaction writers
//! - [`config`]: Pipeline settings
//! - [`error`]: Comprehensive error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use ner_redactor::{HighlightCollection, MupdfDocument, NoopClassifier, RedactionService};
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedactionService::with_secure_strategy();
//! let document = MupdfDocument::open(Path::new("input.pdf"))?;
//!
//! let mut highlights = HighlightCollection::new();
//! service.analyze_into(&document, &NoopClassifier, &mut highlights)?;
//!
//! service.redact(
//!     Path::new("input.pdf"),
//!     Path::new("output.pdf"),
//!     highlights.regions(),
//!     &HashSet::new(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! ## Resolving Entities
//!
//! ```
//! use ner_redactor::domain::{EntityKind, EntityResolver, Token};
//!
//! let text = "Call Jane Doe at 030-12345678.";
//! let tokens = vec![
//!     Token::new("Jane", "B-PER", 0.99),
//!     Token::new("Doe", "I-PER", 0.97),
//! ];
//!
//! let entities = EntityResolver::default().resolve(&tokens, text);
//! assert_eq!(entities[0].text, "Jane Doe");
//! assert_eq!(entities[1].kind, EntityKind::Phone);
//! ```

// Public API
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod redaction;

// Re-exports for convenient access
pub use config::AnalysisConfig;
pub use domain::{Entity, EntityKind, EntityResolver, PatternLibrary, Token};
pub use error::{RedactorError, RedactorResult};
pub use geometry::{GeometryMapper, PageSize, Rect};
pub use highlight::{HighlightCollection, HighlightRegion, NewHighlight};
pub use redaction::{
    JsonTokenClassifier, MupdfDocument, NoopClassifier, PageSource, RedactionDescriptor,
    RedactionPlanner, RedactionResult, RedactionService, RedactionWriter, SecureRedactionWriter,
    TokenClassifier,
};
