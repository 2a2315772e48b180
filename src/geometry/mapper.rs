//! Maps located entities onto page geometry.

use super::scale::to_space;
use super::{page_number, PageBounds, PageSize, Quad, Rect};
use crate::domain::Entity;
use crate::error::RedactorResult;
use crate::highlight::{Comment, Content, NewHighlight, Position};
use tracing::trace;

/// Glyph search over a document's pages.
pub trait GlyphSearch {
    /// Every occurrence of `literal` on the page as a group of quads. Each
    /// group is one occurrence; multi-line or rotated text yields several
    /// quads in one group.
    fn search(&self, page_index: usize, literal: &str) -> RedactorResult<Vec<Vec<Quad>>>;
}

/// Turns entity spans into highlight regions and converts user regions into
/// the logical page space.
#[derive(Debug, Clone, Default)]
pub struct GeometryMapper {
    logical_page: PageSize,
}

impl GeometryMapper {
    pub fn new(logical_page: PageSize) -> Self {
        Self { logical_page }
    }

    pub fn logical_page(&self) -> PageSize {
        self.logical_page
    }

    /// Builds one highlight from the quads of a single occurrence.
    ///
    /// The bounding rect spans every corner; each quad also becomes its own
    /// rect. Returns `None` for an empty group.
    pub fn highlight_from_quads(
        &self,
        quads: &[Quad],
        page_index: usize,
        bounds: PageBounds,
        entity: &Entity,
    ) -> RedactorResult<Option<NewHighlight>> {
        let page_number = page_number(page_index)?;
        let space = bounds.size();
        let Some(bounding_rect) = Rect::bounding(quads, space, page_number) else {
            return Ok(None);
        };
        let rects = quads
            .iter()
            .filter_map(|quad| Rect::bounding(std::slice::from_ref(quad), space, page_number))
            .collect();

        Ok(Some(NewHighlight {
            content: Content {
                text: Some(entity.text.clone()),
                image: None,
            },
            comment: Comment {
                text: entity.comment_text(),
                emoji: String::new(),
            },
            position: Position {
                page_number,
                bounding_rect,
                rects,
            },
        }))
    }

    /// Highlights for every occurrence of `entity` on the page. A search
    /// miss yields no highlights.
    pub fn map_entity<S: GlyphSearch + ?Sized>(
        &self,
        search: &S,
        page_index: usize,
        bounds: PageBounds,
        entity: &Entity,
    ) -> RedactorResult<Vec<NewHighlight>> {
        let groups = search.search(page_index, &entity.text)?;
        if groups.is_empty() {
            trace!(page = page_index + 1, text = %entity.text, "glyph search miss");
        }

        let mut highlights = Vec::with_capacity(groups.len());
        for quads in &groups {
            highlights.extend(self.highlight_from_quads(quads, page_index, bounds, entity)?);
        }
        Ok(highlights)
    }

    /// Highlights for all entities of a page, in entity order.
    pub fn map_entities<S: GlyphSearch + ?Sized>(
        &self,
        search: &S,
        page_index: usize,
        bounds: PageBounds,
        entities: &[Entity],
    ) -> RedactorResult<Vec<NewHighlight>> {
        let mut highlights = Vec::new();
        for entity in entities {
            highlights.extend(self.map_entity(search, page_index, bounds, entity)?);
        }
        Ok(highlights)
    }

    /// Converts a viewport-space highlight into logical page units.
    ///
    /// Must be applied exactly once per highlight. Zero-sized viewports are
    /// rejected with [`crate::RedactorError::InvalidScale`].
    pub fn to_logical(&self, highlight: &NewHighlight) -> RedactorResult<NewHighlight> {
        to_space(highlight, self.logical_page)
    }
}
