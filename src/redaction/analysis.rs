//! Per-page analysis as a lazy sequence.
//!
//! Pages are processed one at a time, in order, as the iterator is advanced.
//! The first failing page is yielded as an error and ends the sequence;
//! results already yielded stay valid.

use super::strategy::{PageSource, TokenClassifier};
use crate::domain::{Entity, EntityResolver};
use crate::error::RedactorResult;
use crate::geometry::GeometryMapper;
use crate::highlight::NewHighlight;
use std::iter::FusedIterator;
use tracing::debug;

/// Everything found on one page.
#[derive(Debug, Clone)]
pub struct PageHighlights {
    /// Zero-based page index
    pub page_index: usize,
    pub entities: Vec<Entity>,
    pub highlights: Vec<NewHighlight>,
}

impl PageHighlights {
    /// One-based page number.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// Lazy, finite, non-restartable sequence of per-page results.
pub struct Analysis<'a, S: PageSource + ?Sized, C: TokenClassifier + ?Sized> {
    source: &'a S,
    classifier: &'a C,
    resolver: &'a EntityResolver,
    mapper: &'a GeometryMapper,
    next_page: usize,
    page_count: usize,
    failed: bool,
}

impl<'a, S: PageSource + ?Sized, C: TokenClassifier + ?Sized> Analysis<'a, S, C> {
    pub(crate) fn new(
        source: &'a S,
        classifier: &'a C,
        resolver: &'a EntityResolver,
        mapper: &'a GeometryMapper,
    ) -> Self {
        Self {
            page_count: source.page_count(),
            source,
            classifier,
            resolver,
            mapper,
            next_page: 0,
            failed: false,
        }
    }

    fn analyze_page(&self, page_index: usize) -> RedactorResult<PageHighlights> {
        let text = self.source.page_text(page_index)?;
        let tokens = self.classifier.classify(page_index, &text)?;
        let entities = self.resolver.resolve(&tokens, &text);
        let bounds = self.source.page_bounds(page_index)?;
        let highlights = self
            .mapper
            .map_entities(self.source, page_index, bounds, &entities)?;

        debug!(
            page = page_index + 1,
            tokens = tokens.len(),
            entities = entities.len(),
            highlights = highlights.len(),
            "analyzed page"
        );

        Ok(PageHighlights {
            page_index,
            entities,
            highlights,
        })
    }
}

impl<'a, S: PageSource + ?Sized, C: TokenClassifier + ?Sized> Iterator for Analysis<'a, S, C> {
    type Item = RedactorResult<PageHighlights>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_page >= self.page_count {
            return None;
        }

        let page_index = self.next_page;
        self.next_page += 1;

        let result = self.analyze_page(page_index);
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.page_count - self.next_page))
    }
}

impl<'a, S: PageSource + ?Sized, C: TokenClassifier + ?Sized> FusedIterator
    for Analysis<'a, S, C>
{
}
