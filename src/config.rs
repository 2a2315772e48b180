//! Pipeline configuration.

use crate::domain::extractor::DEFAULT_LOCATION_WINDOW;
use crate::domain::token::CONTINUATION_MARKER;
use crate::domain::{EntityResolver, PatternExtractor, PatternLibrary, TokenReconstructor};
use crate::geometry::{GeometryMapper, PageSize};

/// Default cap on glyph-search hits per literal and page.
pub const DEFAULT_MAX_HITS: u32 = 100;

/// Settings shared by the analysis stages.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Fixed unit system user-drawn regions are converted into
    pub logical_page: PageSize,

    /// Characters searched on each side of a location for street numbers
    pub location_window: usize,

    /// Maximum glyph-search hits per literal and page
    pub max_hits: u32,

    /// Word-piece continuation marker emitted by the classifier's tokenizer
    pub continuation_marker: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            logical_page: PageSize::A4_LOGICAL,
            location_window: DEFAULT_LOCATION_WINDOW,
            max_hits: DEFAULT_MAX_HITS,
            continuation_marker: CONTINUATION_MARKER.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logical_page(mut self, logical_page: PageSize) -> Self {
        self.logical_page = logical_page;
        self
    }

    pub fn with_location_window(mut self, window: usize) -> Self {
        self.location_window = window;
        self
    }

    pub fn with_max_hits(mut self, max_hits: u32) -> Self {
        self.max_hits = max_hits;
        self
    }

    pub fn with_continuation_marker(mut self, marker: impl Into<String>) -> Self {
        self.continuation_marker = marker.into();
        self
    }

    /// Entity resolver built from these settings with the standard patterns.
    pub fn resolver(&self) -> EntityResolver {
        EntityResolver::new(
            TokenReconstructor::new().with_marker(self.continuation_marker.clone()),
            PatternExtractor::new(PatternLibrary::standard()).with_window(self.location_window),
        )
    }

    pub fn mapper(&self) -> GeometryMapper {
        GeometryMapper::new(self.logical_page)
    }
}
