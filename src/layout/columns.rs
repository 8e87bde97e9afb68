//! Column detection by horizontal interval merging.
//!
//! Columns are a purely geometric property of the page: the horizontal
//! extents of all in-region fragments are swept left to right and merged
//! wherever they touch or overlap. Each merged interval becomes one column,
//! indexed 0..k in left-to-right order. Strictly separated intervals never
//! merge, no matter how close — the boundary is exact overlap, not a
//! distance threshold.

use std::collections::HashMap;

use crate::fragment::Fragment;
use crate::layout::segmenter::TableRegion;
use crate::utils::safe_float_cmp;

/// Column assignments for the in-region fragments of one page.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    /// Fragment index (into the page's fragment list) to column index
    pub assignments: HashMap<usize, usize>,
    /// Number of detected columns
    pub count: usize,
}

/// Assign every in-region fragment to a column.
///
/// Fragments are sorted by `(x, x + width)` ascending, then swept: a
/// fragment whose left edge lies at or before the right edge of the current
/// interval is merged into it (extending the right edge as needed),
/// otherwise it starts a new interval. The result is independent of the
/// input order of `fragments`.
pub fn detect_columns(fragments: &[Fragment], region: &TableRegion) -> Columns {
    let mut content: Vec<usize> = (0..fragments.len())
        .filter(|&i| region.contains(fragments[i].bbox.y))
        .collect();

    content.sort_by(|&a, &b| {
        safe_float_cmp(fragments[a].bbox.x, fragments[b].bbox.x)
            .then_with(|| safe_float_cmp(fragments[a].bbox.right(), fragments[b].bbox.right()))
    });

    let mut right_edges: Vec<f32> = Vec::new();
    let mut assignments = HashMap::new();

    for idx in content {
        let left = fragments[idx].bbox.x;
        let right = fragments[idx].bbox.right();

        match right_edges.last_mut() {
            // Touching or overlapping the current interval: merge
            Some(edge) if left <= *edge => *edge = edge.max(right),
            // Positive gap: a new column starts here
            _ => right_edges.push(right),
        }
        assignments.insert(idx, right_edges.len() - 1);
    }

    log::debug!("detected {} columns", right_edges.len());

    Columns {
        assignments,
        count: right_edges.len(),
    }
}
