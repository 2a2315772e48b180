//! Page geometry: quads, rectangles and coordinate spaces.
//!
//! A [`Rect`] always carries the width and height of the coordinate space it
//! was measured in, so moving it to another space needs no outside context.

pub mod mapper;
pub mod scale;

pub use mapper::{GeometryMapper, GlyphSearch};
pub use scale::{scale_factors, to_space, ScaleFactors};

use crate::error::{RedactorError, RedactorResult};
use serde::{Deserialize, Serialize};

/// Width and height of a coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// A4 in points, the fixed logical unit system for user regions.
    pub const A4_LOGICAL: PageSize = PageSize {
        width: 595.32,
        height: 841.92,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_LOGICAL
    }
}

/// One-based page number for a zero-based page index.
pub fn page_number(page_index: usize) -> RedactorResult<u32> {
    page_index
        .checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| RedactorError::InvalidInput {
            parameter: "page".to_string(),
            reason: format!("page index {} is beyond the addressable page range", page_index),
        })
}

/// Page bounds as reported by the document backend, in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageBounds {
    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }
}

/// A quadrilateral as eight numbers: upper-left, upper-right, lower-left,
/// lower-right corners, each `x, y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad(pub [f64; 8]);

impl Quad {
    pub fn xs(&self) -> [f64; 4] {
        let q = &self.0;
        [q[0], q[2], q[4], q[6]]
    }

    pub fn ys(&self) -> [f64; 4] {
        let q = &self.0;
        [q[1], q[3], q[5], q[7]]
    }
}

/// Axis-aligned box in a coordinate space of `width` x `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl Rect {
    /// Bounding box of all corners of `quads`, or `None` for no quads.
    pub fn bounding(quads: &[Quad], space: PageSize, page_number: u32) -> Option<Rect> {
        let mut corners = quads
            .iter()
            .flat_map(|q| q.xs().into_iter().zip(q.ys()))
            .peekable();
        corners.peek()?;

        let (mut x1, mut y1) = (f64::INFINITY, f64::INFINITY);
        let (mut x2, mut y2) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }

        Some(Rect {
            x1,
            y1,
            x2,
            y2,
            width: space.width,
            height: space.height,
            page_number: Some(page_number),
        })
    }

    /// The coordinate space this rect is expressed in.
    pub fn space(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }

    /// Multiplies coordinates by the factors and relabels the space.
    pub fn scaled(&self, factors: ScaleFactors, target: PageSize) -> Rect {
        Rect {
            x1: self.x1 * factors.x,
            y1: self.y1 * factors.y,
            x2: self.x2 * factors.x,
            y2: self.y2 * factors.y,
            width: target.width,
            height: target.height,
            page_number: self.page_number,
        }
    }

    /// Moves this rect from its own space into `target`.
    ///
    /// Fails with [`crate::RedactorError::InvalidScale`] when this rect's
    /// space has a zero or non-finite dimension.
    pub fn rescale(&self, target: PageSize) -> RedactorResult<Rect> {
        let factors = scale_factors(self.space(), target)?;
        Ok(self.scaled(factors, target))
    }
}
