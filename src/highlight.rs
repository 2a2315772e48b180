//! Highlight records and the per-document highlight collection.
//!
//! The JSON shape of [`HighlightRegion`] is an interop contract with viewer
//! front ends and must stay stable:
//!
//! ```json
//! {
//!   "id": "1",
//!   "content": { "text": "Jane Doe" },
//!   "comment": { "text": "PER (confidence: 99.1%)", "emoji": "" },
//!   "position": {
//!     "pageNumber": 1,
//!     "boundingRect": { "x1": 0, "y1": 0, "x2": 1, "y2": 1, "width": 595.32, "height": 841.92 },
//!     "rects": []
//!   }
//! }
//! ```

use crate::error::RedactorResult;
use crate::geometry::scale::to_space;
use crate::geometry::{PageSize, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub page_number: u32,
    pub bounding_rect: Rect,
    #[serde(default)]
    pub rects: Vec<Rect>,
}

/// A highlight that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHighlight {
    pub content: Content,
    pub comment: Comment,
    pub position: Position,
}

/// A highlight owned by a [`HighlightCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRegion {
    pub id: String,
    pub content: Content,
    pub comment: Comment,
    pub position: Position,
}

impl HighlightRegion {
    /// Entity-type label: the first whitespace-delimited word of the comment.
    pub fn label(&self) -> Option<&str> {
        self.comment.text.split_whitespace().next()
    }

    pub fn page_number(&self) -> u32 {
        self.position.page_number
    }
}

impl NewHighlight {
    fn with_id(self, id: String) -> HighlightRegion {
        HighlightRegion {
            id,
            content: self.content,
            comment: self.comment,
            position: self.position,
        }
    }
}

fn reading_order(a: &HighlightRegion, b: &HighlightRegion) -> Ordering {
    a.page_number()
        .cmp(&b.page_number())
        .then_with(|| {
            a.position
                .bounding_rect
                .y1
                .total_cmp(&b.position.bounding_rect.y1)
        })
}

/// Owned, ordered collection of a document's highlights.
///
/// Mutation goes through `append_page`, `add_user_highlight`, `update`,
/// `remove` and `reset`; sorting and filtering return views.
#[derive(Debug, Clone, Default)]
pub struct HighlightCollection {
    regions: Vec<HighlightRegion>,
    next_id: u64,
}

impl HighlightCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts previously saved regions, keeping their ids.
    pub fn from_regions(regions: Vec<HighlightRegion>) -> Self {
        let next_id = regions
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { regions, next_id }
    }

    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    /// Appends one page's model highlights in the order given.
    pub fn append_page(&mut self, highlights: Vec<NewHighlight>) -> Vec<String> {
        highlights
            .into_iter()
            .map(|h| {
                let id = self.assign_id();
                self.regions.push(h.with_id(id.clone()));
                id
            })
            .collect()
    }

    /// Adds a highlight captured in viewport units, converting it to
    /// `logical` units first. Nothing is inserted if the conversion fails.
    pub fn add_user_highlight(
        &mut self,
        highlight: NewHighlight,
        logical: PageSize,
    ) -> RedactorResult<String> {
        let converted = to_space(&highlight, logical)?;
        let id = self.assign_id();
        self.regions.push(converted.with_id(id.clone()));
        Ok(id)
    }

    /// Replaces the position and merges the content of a highlight.
    /// Returns `false` when no highlight has that id.
    pub fn update(&mut self, id: &str, position: Option<Position>, content: Option<Content>) -> bool {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if let Some(position) = position {
            region.position = position;
        }
        if let Some(content) = content {
            if content.text.is_some() {
                region.content.text = content.text;
            }
            if content.image.is_some() {
                region.content.image = content.image;
            }
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<HighlightRegion> {
        let index = self.regions.iter().position(|r| r.id == id)?;
        Some(self.regions.remove(index))
    }

    pub fn reset(&mut self) {
        self.regions.clear();
    }

    pub fn regions(&self) -> &[HighlightRegion] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<HighlightRegion> {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions ordered by page, then top edge.
    pub fn sorted(&self) -> Vec<&HighlightRegion> {
        let mut view: Vec<&HighlightRegion> = self.regions.iter().collect();
        view.sort_by(|a, b| reading_order(a, b));
        view
    }

    /// Regions whose label is not excluded. Unlabeled regions are always
    /// visible.
    pub fn visible(&self, excluded: &HashSet<String>) -> Vec<&HighlightRegion> {
        self.regions
            .iter()
            .filter(|r| r.label().map_or(true, |label| !excluded.contains(label)))
            .collect()
    }

    /// Number of regions per label.
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in self.regions.iter().filter_map(|r| r.label()) {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }
}
