//! Page analysis, redaction planning and redaction writers.
//!
//! The pipeline reads a document through a [`PageSource`], tags tokens with a
//! [`TokenClassifier`], turns entities into highlights, and finally plans and
//! applies redactions through a [`RedactionWriter`].

pub mod analysis;
pub mod classifier;
pub mod planner;
pub mod secure;
pub mod strategy;

pub use analysis::{Analysis, PageHighlights};
pub use classifier::{JsonTokenClassifier, NoopClassifier};
pub use planner::{RedactionDescriptor, RedactionPlanner};
pub use secure::{MupdfDocument, SecureRedactionWriter};
pub use strategy::{PageSource, RedactionResult, RedactionWriter, TokenClassifier};

use crate::config::AnalysisConfig;
use crate::domain::EntityResolver;
use crate::error::{RedactorError, RedactorResult};
use crate::geometry::GeometryMapper;
use crate::highlight::{HighlightCollection, HighlightRegion};
use std::collections::HashSet;
use std::path::Path;

/// Redaction service coordinating analysis and writer execution.
pub struct RedactionService {
    resolver: EntityResolver,
    mapper: GeometryMapper,
    planner: RedactionPlanner,
    writer: Box<dyn RedactionWriter>,
}

impl RedactionService {
    /// Creates a new service with the given settings and writer.
    pub fn new(config: &AnalysisConfig, writer: Box<dyn RedactionWriter>) -> Self {
        Self {
            resolver: config.resolver(),
            mapper: config.mapper(),
            planner: RedactionPlanner::new(),
            writer,
        }
    }

    /// Creates a service with default settings and secure (physical removal)
    /// redaction.
    pub fn with_secure_strategy() -> Self {
        Self::new(
            &AnalysisConfig::default(),
            Box::new(SecureRedactionWriter::new()),
        )
    }

    pub fn mapper(&self) -> &GeometryMapper {
        &self.mapper
    }

    pub fn writer(&self) -> &dyn RedactionWriter {
        self.writer.as_ref()
    }

    /// Lazily analyzes `source` page by page.
    pub fn analyze<'a, S, C>(&'a self, source: &'a S, classifier: &'a C) -> Analysis<'a, S, C>
    where
        S: PageSource + ?Sized,
        C: TokenClassifier + ?Sized,
    {
        Analysis::new(source, classifier, &self.resolver, &self.mapper)
    }

    /// Runs the whole analysis, appending each page to `collection`.
    ///
    /// On failure, pages completed before the failing one remain in
    /// `collection`.
    pub fn analyze_into<S, C>(
        &self,
        source: &S,
        classifier: &C,
        collection: &mut HighlightCollection,
    ) -> RedactorResult<usize>
    where
        S: PageSource + ?Sized,
        C: TokenClassifier + ?Sized,
    {
        let mut pages = 0;
        for page in self.analyze(source, classifier) {
            collection.append_page(page?.highlights);
            pages += 1;
        }
        Ok(pages)
    }

    pub fn plan<'a, I>(&self, regions: I, excluded: &HashSet<String>) -> Vec<RedactionDescriptor>
    where
        I: IntoIterator<Item = &'a HighlightRegion>,
    {
        self.planner.plan(regions, excluded)
    }

    /// Plans redactions for `regions` and writes them from `input` to
    /// `output`.
    pub fn redact<'a, I>(
        &self,
        input: &Path,
        output: &Path,
        regions: I,
        excluded: &HashSet<String>,
    ) -> RedactorResult<RedactionResult>
    where
        I: IntoIterator<Item = &'a HighlightRegion>,
    {
        if !input.exists() {
            return Err(RedactorError::Io {
                path: input.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Input file does not exist",
                ),
            });
        }

        let plan = self.plan(regions, excluded);
        self.writer.apply(input, output, &plan)
    }
}
