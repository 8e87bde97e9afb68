//! Row clustering anchored on timestamp fragments in column 0.
//!
//! Every transaction row starts with a date/time cell, so column 0 doubles
//! as the row index: each fragment matching the `HH:MM` time pattern (alone,
//! or as the second half of a date-line/time-line pair) anchors one row.
//! Anchors carve the table region into disjoint vertical bands; every
//! in-region fragment is then assigned to the band its y position falls in.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::fragment::{normalize, Fragment};
use crate::layout::columns::Columns;
use crate::layout::segmenter::TableRegion;
use crate::utils::safe_float_cmp;

/// Tolerance absorbing sub-pixel misalignment between a row's anchor and
/// its cell content, in layout units. Empirically tuned; do not derive.
pub const ROW_MARGIN: f32 = 2.0;

lazy_static! {
    static ref RE_TIME: Regex = Regex::new(r"\d\d:\d\d").unwrap();
}

/// One reconstructed table row.
#[derive(Debug, Clone)]
pub struct Row {
    /// Vertical position of the row's anchor fragment
    pub anchor_y: f32,
    /// Height of the row's vertical band
    pub height: f32,
    /// Fragment indices per column, each cell ordered by ascending y
    pub cells: Vec<Vec<usize>>,
}

/// Cluster in-region fragments into rows.
///
/// The first column-0 fragment (by ascending y) must be the table header
/// label; a page whose segmenter found the header but whose column 0 starts
/// with anything else is structurally broken. A date-only anchor line must
/// be immediately followed by a time line. Both violations are fatal.
///
/// A page with a header but no anchors yields an empty row list.
pub fn cluster_rows(
    fragments: &[Fragment],
    columns: &Columns,
    region: &TableRegion,
    config: &ParserConfig,
) -> Result<Vec<Row>> {
    let mut col0: Vec<usize> = columns
        .assignments
        .iter()
        .filter(|&(_, &col)| col == 0)
        .map(|(&idx, _)| idx)
        .collect();
    col0.sort_by(|&a, &b| safe_float_cmp(fragments[a].bbox.y, fragments[b].bbox.y));

    let header = config.column0_header();
    match col0.first() {
        Some(&idx) if normalize(&fragments[idx].text).starts_with(header) => {},
        _ => return Err(Error::MissingTableHeader(header.to_string())),
    }

    // Collect anchors: single time-line fragments, or date-line/time-line pairs
    let mut anchors: Vec<f32> = Vec::new();
    let mut scan = col0[1..].iter();
    while let Some(&idx) = scan.next() {
        if RE_TIME.is_match(&fragments[idx].text) {
            anchors.push(fragments[idx].bbox.y);
            continue;
        }

        let date_text = normalize(&fragments[idx].text);
        match scan.next() {
            Some(&next) if RE_TIME.is_match(&fragments[next].text) => {
                anchors.push(fragments[idx].bbox.y);
            },
            _ => return Err(Error::MissingTimeLine(date_text)),
        }
    }

    if anchors.is_empty() {
        log::debug!("table header present but no row anchors; empty page");
        return Ok(Vec::new());
    }

    let mut rows: Vec<Row> = anchors
        .iter()
        .map(|&anchor_y| Row {
            anchor_y,
            height: 0.0,
            cells: vec![Vec::new(); columns.count],
        })
        .collect();

    // Non-terminal row heights are measured from the next anchor; the
    // terminal row takes the maximum observed height. A single-row page has
    // nothing to measure against, so its band runs to the region's end.
    let mut max_height: f32 = 0.0;
    for i in 0..rows.len() - 1 {
        let height = rows[i + 1].anchor_y - rows[i].anchor_y;
        rows[i].height = height;
        max_height = max_height.max(height);
    }
    let last = rows.last_mut().unwrap();
    last.height = if max_height > 0.0 {
        max_height
    } else {
        region.y_max - last.anchor_y
    };

    // Assign fragments to bands, in stable index order
    let mut assigned: Vec<(usize, usize)> = columns
        .assignments
        .iter()
        .map(|(&idx, &col)| (idx, col))
        .collect();
    assigned.sort_unstable();

    for (idx, col) in assigned {
        let y = fragments[idx].bbox.y;
        for row in rows.iter_mut() {
            if y >= row.anchor_y - ROW_MARGIN && y < row.anchor_y + row.height {
                row.cells[col].push(idx);
                break;
            }
        }
    }

    for row in rows.iter_mut() {
        for cell in row.cells.iter_mut() {
            cell.sort_by(|&a, &b| safe_float_cmp(fragments[a].bbox.y, fragments[b].bbox.y));
        }
    }

    log::debug!("clustered {} rows", rows.len());
    Ok(rows)
}
