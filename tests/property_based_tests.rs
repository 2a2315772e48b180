//! Property-based tests for reconstruction, patterns, geometry and planning.
//!
//! Uses randomized inputs to check the invariants that must hold for every
//! page: spans slice the page text, output is ordered, scaling is reversible
//! and planning never leaks excluded labels.

use ner_redactor::domain::{EntityResolver, Token, TokenReconstructor};
use ner_redactor::geometry::scale_factors;
use ner_redactor::{PageSize, PatternLibrary, RedactionPlanner, RedactorError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

mod common;
use common::*;

/// Strategy for BIO tags over a few entity types
fn tag_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("O"),
        Just("B-PER"),
        Just("I-PER"),
        Just("B-LOC"),
        Just("I-LOC"),
        Just("B-ORG"),
        Just("I-ORG"),
    ]
}

/// Strategy for a page as words plus one tag per word
fn tagged_page_strategy() -> impl Strategy<Value = (String, Vec<Token>)> {
    prop::collection::vec(
        ("[A-Za-zäöü0-9]{1,8}", tag_strategy(), 0.0f64..=1.0),
        0..24,
    )
    .prop_map(|words| {
        let text = words
            .iter()
            .map(|(w, _, _)| w.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = words
            .into_iter()
            .map(|(w, tag, score)| Token::new(w, tag, score))
            .collect();
        (text, tokens)
    })
}

fn labels() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("PER"), Just("LOC"), Just("DATE"), Just("EMAIL"), Just("")]
}

proptest! {
    #[test]
    fn outside_tokens_never_produce_entities(words in prop::collection::vec("[a-z]{1,10}", 0..20)) {
        let text = words.join(" ");
        let tokens: Vec<Token> = words.iter().map(|w| Token::new(w.as_str(), "O", 0.9)).collect();
        prop_assert!(TokenReconstructor::new().reconstruct(&tokens, &text).is_empty());
    }

    #[test]
    fn reconstructed_spans_slice_the_text((text, tokens) in tagged_page_strategy()) {
        for entity in TokenReconstructor::new().reconstruct(&tokens, &text) {
            prop_assert_eq!(text.get(entity.start..entity.end), Some(entity.text.as_str()));
        }
    }

    #[test]
    fn reconstruction_is_repeatable((text, tokens) in tagged_page_strategy()) {
        let reconstructor = TokenReconstructor::new();
        prop_assert_eq!(
            reconstructor.reconstruct(&tokens, &text),
            reconstructor.reconstruct(&tokens, &text)
        );
    }

    #[test]
    fn resolved_entities_are_sorted_and_valid((text, tokens) in tagged_page_strategy()) {
        let entities = EntityResolver::default().resolve(&tokens, &text);
        for pair in entities.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        for entity in &entities {
            prop_assert_eq!(text.get(entity.start..entity.end), Some(entity.text.as_str()));
        }
    }

    #[test]
    fn pattern_scan_handles_arbitrary_text(text in "\\PC{0,200}") {
        for entity in PatternLibrary::standard().scan(&text) {
            prop_assert!(!entity.text.is_empty());
            prop_assert_eq!(text.get(entity.start..entity.end), Some(entity.text.as_str()));
            prop_assert_eq!(entity.score, 1.0);
        }
    }

    #[test]
    fn scaling_round_trips(
        x1 in 0.0f64..2000.0,
        y1 in 0.0f64..2000.0,
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
        vw in 1.0f64..4000.0,
        vh in 1.0f64..4000.0,
    ) {
        let viewport = PageSize::new(vw, vh);
        let original = rect(x1, y1, x1 + w, y1 + h, vw, vh);

        let factors = scale_factors(viewport, PageSize::A4_LOGICAL).unwrap();
        let back = original
            .scaled(factors, PageSize::A4_LOGICAL)
            .scaled(factors.inverse(), viewport);

        prop_assert!((back.x1 - original.x1).abs() < EPSILON);
        prop_assert!((back.y1 - original.y1).abs() < EPSILON);
        prop_assert!((back.x2 - original.x2).abs() < EPSILON);
        prop_assert!((back.y2 - original.y2).abs() < EPSILON);
    }

    #[test]
    fn zero_dimensions_are_always_rejected(other in 1.0f64..4000.0, zero_width in any::<bool>()) {
        let viewport = if zero_width {
            PageSize::new(0.0, other)
        } else {
            PageSize::new(other, 0.0)
        };
        let is_invalid_scale = matches!(
            scale_factors(viewport, PageSize::A4_LOGICAL),
            Err(RedactorError::InvalidScale { .. })
        );
        prop_assert!(is_invalid_scale);
    }

    #[test]
    fn planner_respects_exclusions(
        regions in prop::collection::vec((1u32..6, labels()), 0..30),
        excluded_labels in prop::collection::vec(labels(), 0..3),
    ) {
        let regions: Vec<_> = regions
            .iter()
            .enumerate()
            .map(|(i, (page, label))| {
                let builder = RegionBuilder::new(&i.to_string(), *page)
                    .rect(rect(0.0, i as f64, 10.0, i as f64 + 1.0, 595.32, 841.92));
                if label.is_empty() { builder.build() } else { builder.label(label).build() }
            })
            .collect();
        let excluded: HashSet<String> = excluded_labels.iter().map(|l| l.to_string()).collect();

        let plan = RedactionPlanner::new().plan(&regions, &excluded);

        let expected_pages: BTreeSet<u32> = regions
            .iter()
            .filter(|r| r.label().map_or(true, |l| !excluded.contains(l)))
            .map(|r| r.page_number())
            .collect();
        let planned_pages: Vec<u32> = plan.iter().map(|d| d.page_number).collect();
        prop_assert_eq!(planned_pages, expected_pages.into_iter().collect::<Vec<_>>());

        let planned_rects: usize = plan.iter().map(|d| d.rects.len()).sum();
        let kept = regions
            .iter()
            .filter(|r| r.label().map_or(true, |l| !excluded.contains(l)))
            .count();
        prop_assert_eq!(planned_rects, kept);
    }
}
