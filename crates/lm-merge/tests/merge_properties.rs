//! Property-Based Tests
//!
//! Invariants of a full merge over generated candidate sets:
//! - baseline concatenation is lossless
//! - collinear fragments merge in left-to-right order
//! - fused text contains every non-empty fragment exactly once

use lm_merge::{merge_lines, LineMerger, MergeConfig, MergeError};
use lm_types::{
    Baseline, DocumentContext, LayerId, Line, LineId, PartId, Point, TranscriptionLayer,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

const LAYER: LayerId = LayerId(1);

fn context() -> DocumentContext {
    DocumentContext::new(vec![TranscriptionLayer::new(LAYER, "manual")], ' ')
}

/// Collinear fragments in left-to-right order. Each carries a word under
/// [`LAYER`] (or nothing) and a baseline of 2 to 4 points.
fn collinear_lines() -> impl Strategy<Value = Vec<Line>> {
    prop::collection::vec(
        (1u32..100, 1u32..100, 0usize..3, prop::option::of("[a-z]{1,6}")),
        2..10,
    )
    .prop_map(|specs| {
        let mut x = 0.0;
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (gap, width, extra, word))| {
                x += f64::from(gap);
                let start = x;
                x += f64::from(width);
                let step = (x - start) / (extra as f64 + 1.0);
                let mut points = vec![Point::new(start, 20.0)];
                points.extend((1..=extra).map(|k| Point::new(start + step * k as f64, 20.0)));
                points.push(Point::new(x, 20.0));

                let line = Line::new(LineId(i as u64 + 1), PartId(1), Baseline::new(points));
                match word {
                    Some(w) => line.with_transcription(LAYER, w),
                    None => line,
                }
            })
            .collect()
    })
}

/// Left-to-right lines plus a permutation of them.
fn shuffled_lines() -> impl Strategy<Value = (Vec<Line>, Vec<Line>)> {
    collinear_lines().prop_flat_map(|lines| {
        let shuffled = Just(lines.clone()).prop_shuffle();
        (Just(lines), shuffled)
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn merge_restores_left_to_right_order((lines, shuffled) in shuffled_lines()) {
        let outcome = merge_lines(&shuffled, &context()).unwrap();
        let expected: Vec<LineId> = lines.iter().map(|l| l.id).collect();
        prop_assert_eq!(outcome.order, expected);
    }

    #[test]
    fn baseline_concatenation_is_lossless((_, shuffled) in shuffled_lines()) {
        let outcome = merge_lines(&shuffled, &context()).unwrap();
        let total: usize = shuffled.iter().map(|l| l.baseline.len()).sum();
        prop_assert_eq!(outcome.descriptor.baseline.len(), total);
    }

    #[test]
    fn fused_text_follows_reading_order((lines, shuffled) in shuffled_lines()) {
        let outcome = merge_lines(&shuffled, &context()).unwrap();
        let words: Vec<&str> = lines.iter().filter_map(|l| l.content(LAYER)).collect();
        match outcome.descriptor.content(LAYER) {
            Some(text) => {
                prop_assert_eq!(text, words.join(" "));
                prop_assert!(!text.contains("  "));
            }
            None => prop_assert!(words.is_empty()),
        }
    }

    #[test]
    fn consumed_matches_caller_order((_, shuffled) in shuffled_lines()) {
        let outcome = merge_lines(&shuffled, &context()).unwrap();
        let ids: Vec<LineId> = shuffled.iter().map(|l| l.id).collect();
        prop_assert_eq!(outcome.consumed, ids);
        prop_assert_eq!(outcome.descriptor.block, shuffled[0].block);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn hello_world_fusion() {
    let lines = vec![
        Line::new(
            LineId(2),
            PartId(1),
            Baseline::from_coords(&[(60.0, 10.0), (110.0, 10.0)]),
        )
        .with_transcription(LAYER, "World"),
        Line::new(
            LineId(1),
            PartId(1),
            Baseline::from_coords(&[(0.0, 10.0), (50.0, 10.0)]),
        )
        .with_transcription(LAYER, "Hello"),
    ];
    let outcome = merge_lines(&lines, &context()).unwrap();
    assert_eq!(outcome.descriptor.content(LAYER), Some("Hello World"));
}

#[test]
fn single_candidate_rejected() {
    let lines = vec![Line::new(
        LineId(1),
        PartId(1),
        Baseline::from_coords(&[(0.0, 0.0), (5.0, 0.0)]),
    )];
    assert!(matches!(
        merge_lines(&lines, &context()),
        Err(MergeError::InvalidCandidateSet { .. })
    ));
}

#[test]
fn merger_shared_across_threads() {
    let merger = LineMerger::new(MergeConfig::default());
    let ctx = context();
    std::thread::scope(|scope| {
        for offset in 0..4 {
            let merger = &merger;
            let ctx = &ctx;
            scope.spawn(move || {
                let y = f64::from(offset) * 100.0;
                let lines = vec![
                    Line::new(
                        LineId(2),
                        PartId(1),
                        Baseline::from_coords(&[(30.0, y), (40.0, y)]),
                    ),
                    Line::new(
                        LineId(1),
                        PartId(1),
                        Baseline::from_coords(&[(0.0, y), (20.0, y)]),
                    ),
                ];
                let outcome = merger.merge(&lines, ctx).unwrap();
                assert_eq!(outcome.order, vec![LineId(1), LineId(2)]);
            });
        }
    });
}
