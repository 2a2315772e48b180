//! Custom assertions for entity and geometry testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use ner_redactor::geometry::Rect;
use ner_redactor::Entity;

/// Tolerance used when comparing scaled coordinates.
pub const EPSILON: f64 = 1e-6;

/// Asserts that every entity's offsets slice exactly its text out of `text`.
///
/// # Panics
/// Panics on the first entity whose span does not match.
pub fn assert_spans_valid(text: &str, entities: &[Entity]) {
    for entity in entities {
        let slice = text.get(entity.start..entity.end);
        assert_eq!(
            slice,
            Some(entity.text.as_str()),
            "Entity {:?} ({}..{}) does not match the page text",
            entity.text,
            entity.start,
            entity.end
        );
    }
}

/// Asserts that entities are ordered by start offset.
///
/// # Panics
/// Panics if any adjacent pair is out of order.
pub fn assert_sorted_by_start(entities: &[Entity]) {
    for pair in entities.windows(2) {
        assert!(
            pair[0].start <= pair[1].start,
            "Entities out of order: {:?} at {} before {:?} at {}",
            pair[0].text,
            pair[0].start,
            pair[1].text,
            pair[1].start
        );
    }
}

/// Asserts that two rects have the same coordinates within [`EPSILON`].
///
/// # Panics
/// Panics if any coordinate or dimension differs by more than the tolerance.
pub fn assert_rect_close(actual: &Rect, expected: &Rect) {
    let pairs = [
        ("x1", actual.x1, expected.x1),
        ("y1", actual.y1, expected.y1),
        ("x2", actual.x2, expected.x2),
        ("y2", actual.y2, expected.y2),
        ("width", actual.width, expected.width),
        ("height", actual.height, expected.height),
    ];
    for (field, a, e) in pairs {
        assert!(
            (a - e).abs() <= EPSILON,
            "Rect field {} differs: {} vs {}",
            field,
            a,
            e
        );
    }
}

/// Asserts that `entities` contains one entity with exactly `text`.
///
/// # Panics
/// Panics if no entity has that text.
pub fn assert_has_entity<'a>(entities: &'a [Entity], text: &str) -> &'a Entity {
    entities
        .iter()
        .find(|e| e.text == text)
        .unwrap_or_else(|| {
            panic!(
                "Expected entity {:?}, found {:?}",
                text,
                entities.iter().map(|e| &e.text).collect::<Vec<_>>()
            )
        })
}
