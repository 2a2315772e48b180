//! Conversion between coordinate spaces.
//!
//! On-screen viewport rects are resolution and zoom dependent; they are moved
//! once into the fixed logical page space. Applying the conversion twice is a
//! caller error: the rect no longer remembers its viewport.

use super::PageSize;
use crate::error::{RedactorError, RedactorResult};
use crate::highlight::NewHighlight;

/// Independent per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    /// Factors undoing this scaling.
    pub fn inverse(&self) -> ScaleFactors {
        ScaleFactors {
            x: 1.0 / self.x,
            y: 1.0 / self.y,
        }
    }
}

fn check_dimension(axis: &'static str, value: f64) -> RedactorResult<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(RedactorError::InvalidScale { axis, value });
    }
    Ok(value)
}

/// Factors `target / from` per axis.
///
/// A zero or non-finite `from` dimension is rejected before dividing.
pub fn scale_factors(from: PageSize, target: PageSize) -> RedactorResult<ScaleFactors> {
    let width = check_dimension("width", from.width)?;
    let height = check_dimension("height", from.height)?;
    Ok(ScaleFactors {
        x: target.width / width,
        y: target.height / height,
    })
}

/// Moves a whole highlight into `target` space.
///
/// Factors come from the bounding rect's space and are applied to every
/// constituent rect as well.
pub fn to_space(highlight: &NewHighlight, target: PageSize) -> RedactorResult<NewHighlight> {
    let factors = scale_factors(highlight.position.bounding_rect.space(), target)?;

    let mut converted = highlight.clone();
    converted.position.bounding_rect = highlight.position.bounding_rect.scaled(factors, target);
    converted.position.rects = highlight
        .position
        .rects
        .iter()
        .map(|r| r.scaled(factors, target))
        .collect();
    Ok(converted)
}
