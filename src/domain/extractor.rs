//! Pattern-based entity extraction and location refinement.

use super::entity::{Entity, EntityKind};
use super::library::PatternLibrary;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default number of characters inspected on each side of a location.
pub const DEFAULT_LOCATION_WINDOW: usize = 20;

fn trailing_number() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[0-9]+\s*$").expect("Valid trailing number regex"));
    &PATTERN
}

fn leading_number() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*[0-9]+").expect("Valid leading number regex"));
    &PATTERN
}

/// Applies a [`PatternLibrary`] to page text and widens locations over
/// adjacent street or building numbers.
pub struct PatternExtractor {
    library: PatternLibrary,
    window: usize,
}

impl PatternExtractor {
    pub fn new(library: PatternLibrary) -> Self {
        Self {
            library,
            window: DEFAULT_LOCATION_WINDOW,
        }
    }

    /// Sets how many characters around a location are searched for numbers.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// All pattern matches in `text` as full-confidence entities.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        self.library.scan(text)
    }

    /// Extends every `LOC` entity over a digit run directly before or after
    /// it, optionally separated by whitespace.
    pub fn refine_locations(&self, text: &str, entities: &mut [Entity]) {
        if self.window == 0 {
            return;
        }

        for entity in entities
            .iter_mut()
            .filter(|e| e.kind == EntityKind::Location)
        {
            let mut start = entity.start;
            let mut end = entity.end;

            let before_start = text[..start]
                .char_indices()
                .rev()
                .nth(self.window - 1)
                .map_or(0, |(i, _)| i);
            if let Some(m) = trailing_number().find(&text[before_start..start]) {
                start = before_start + m.start();
            }

            let after_end = text[end..]
                .char_indices()
                .nth(self.window)
                .map_or(text.len(), |(i, _)| end + i);
            if let Some(m) = leading_number().find(&text[end..after_end]) {
                end += m.end();
            }

            if (start, end) != (entity.start, entity.end) {
                entity.start = start;
                entity.end = end;
                entity.text = text[start..end].to_string();
            }
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(PatternLibrary::standard())
    }
}
