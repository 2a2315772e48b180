//! Merges token-derived and pattern-derived entities for a page.

use super::entity::Entity;
use super::extractor::PatternExtractor;
use super::reconstruct::TokenReconstructor;
use super::token::Token;
use tracing::debug;

/// Produces the ordered entity list for one page.
///
/// Token entities come first, pattern entities second, then the list is
/// stable-sorted by start offset, so ties keep token-before-pattern order.
/// Overlapping spans from the two sources are kept as separate entities.
#[derive(Default)]
pub struct EntityResolver {
    reconstructor: TokenReconstructor,
    extractor: PatternExtractor,
}

impl EntityResolver {
    pub fn new(reconstructor: TokenReconstructor, extractor: PatternExtractor) -> Self {
        Self {
            reconstructor,
            extractor,
        }
    }

    pub fn resolve(&self, tokens: &[Token], text: &str) -> Vec<Entity> {
        let mut entities = self.reconstructor.reconstruct(tokens, text);
        let from_tokens = entities.len();

        entities.extend(self.extractor.extract(text));
        self.extractor.refine_locations(text, &mut entities);

        // `sort_by_key` is stable
        entities.sort_by_key(|e| e.start);

        debug!(
            from_tokens,
            from_patterns = entities.len() - from_tokens,
            "resolved page entities"
        );
        entities
    }
}
