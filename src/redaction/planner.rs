//! Turns confirmed highlights into per-page redaction descriptors.

use crate::geometry::Rect;
use crate::highlight::HighlightRegion;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The rectangles to remove from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionDescriptor {
    pub page_number: u32,
    pub rects: Vec<Rect>,
}

/// Pure planner from highlight regions to redaction descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionPlanner;

impl RedactionPlanner {
    pub fn new() -> Self {
        Self
    }

    /// One descriptor per page that has at least one non-excluded region,
    /// ascending by page number. Rects keep region order within a page.
    ///
    /// A region is excluded when its label (first word of the comment) is in
    /// `excluded`. Regions without rects contribute their bounding rect.
    pub fn plan<'a, I>(&self, regions: I, excluded: &HashSet<String>) -> Vec<RedactionDescriptor>
    where
        I: IntoIterator<Item = &'a HighlightRegion>,
    {
        let mut pages: BTreeMap<u32, Vec<Rect>> = BTreeMap::new();

        for region in regions {
            if region.label().is_some_and(|label| excluded.contains(label)) {
                continue;
            }
            let rects = pages.entry(region.page_number()).or_default();
            if region.position.rects.is_empty() {
                rects.push(region.position.bounding_rect);
            } else {
                rects.extend_from_slice(&region.position.rects);
            }
        }

        pages
            .into_iter()
            .map(|(page_number, rects)| RedactionDescriptor { page_number, rects })
            .collect()
    }
}
