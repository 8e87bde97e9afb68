//! Property tests for column detection.
//!
//! Column membership is a geometric property of the page, so it must not
//! depend on the order fragments arrive in, and every in-region fragment
//! must land in exactly one column.

use proptest::prelude::*;

use jenius_statement::fragment::Fragment;
use jenius_statement::geometry::Rect;
use jenius_statement::layout::{detect_columns, TableRegion};

fn full_region() -> TableRegion {
    TableRegion {
        y_min: 0.0,
        y_max: f32::INFINITY,
    }
}

fn fragments_from(intervals: &[(f32, f32)]) -> Vec<Fragment> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, &(x, width))| Fragment::new(Rect::new(x, i as f32 * 10.0, width, 10.0), "x"))
        .collect()
}

/// Horizontal intervals plus a permutation of their indices.
fn intervals_and_permutation() -> impl Strategy<Value = (Vec<(f32, f32)>, Vec<usize>)> {
    prop::collection::vec((0.0f32..2000.0, 1.0f32..150.0), 1..40).prop_flat_map(|intervals| {
        let n = intervals.len();
        let permutation = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
        (Just(intervals), permutation)
    })
}

proptest! {
    #[test]
    fn column_assignment_is_order_independent(
        (intervals, permutation) in intervals_and_permutation()
    ) {
        let original = fragments_from(&intervals);
        let shuffled: Vec<Fragment> = permutation
            .iter()
            .map(|&i| original[i].clone())
            .collect();

        let forward = detect_columns(&original, &full_region());
        let permuted = detect_columns(&shuffled, &full_region());

        prop_assert_eq!(forward.count, permuted.count);
        for (shuffled_idx, &original_idx) in permutation.iter().enumerate() {
            prop_assert_eq!(
                forward.assignments[&original_idx],
                permuted.assignments[&shuffled_idx]
            );
        }
    }

    #[test]
    fn every_in_region_fragment_gets_exactly_one_column(
        intervals in prop::collection::vec((0.0f32..2000.0, 1.0f32..150.0), 1..40)
    ) {
        let fragments = fragments_from(&intervals);
        let columns = detect_columns(&fragments, &full_region());

        prop_assert_eq!(columns.assignments.len(), fragments.len());
        for i in 0..fragments.len() {
            let col = columns.assignments[&i];
            prop_assert!(col < columns.count);
        }
    }

    #[test]
    fn column_indices_increase_left_to_right(
        intervals in prop::collection::vec((0.0f32..2000.0, 1.0f32..150.0), 2..40)
    ) {
        let fragments = fragments_from(&intervals);
        let columns = detect_columns(&fragments, &full_region());

        for i in 0..fragments.len() {
            for j in 0..fragments.len() {
                if columns.assignments[&i] < columns.assignments[&j] {
                    // A lower column index means a strictly smaller left edge
                    prop_assert!(fragments[i].bbox.x < fragments[j].bbox.x);
                }
            }
        }
    }
}
