//! Page segmentation: locating the vertical table region.
//!
//! The statement carries no table tags, but two fixed marker vocabularies
//! bound the table reliably: the column header labels at the top and the
//! footer boilerplate at the bottom. The region between them is the table;
//! everything above is the detail panel; everything below is discarded.

use crate::config::ParserConfig;
use crate::fragment::{normalize, Fragment};

/// The vertical extent of the transaction table on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRegion {
    /// Minimum y of a header-marker match (inclusive)
    pub y_min: f32,
    /// Minimum y of a footer-marker match (exclusive); `f32::INFINITY`
    /// when the page has no footer
    pub y_max: f32,
}

impl TableRegion {
    /// Whether a fragment at vertical position `y` lies inside the table.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.y_min && y < self.y_max
    }
}

/// Scan a page's fragments for the table region.
///
/// Returns `None` when no header marker is found, meaning the page carries
/// no table content. This is an expected outcome for cover or disclaimer
/// pages, not an error. A missing footer defaults the lower boundary to the
/// end of the page.
pub fn locate_table(fragments: &[Fragment], config: &ParserConfig) -> Option<TableRegion> {
    let mut y_min: Option<f32> = None;
    let mut y_max: Option<f32> = None;

    for fragment in fragments {
        let text = normalize(&fragment.text);
        let y = fragment.bbox.y;

        if config.table_headers.iter().any(|m| text.starts_with(m)) {
            y_min = Some(y_min.map_or(y, |current| current.min(y)));
        }
        if config.footer_markers.iter().any(|m| text.starts_with(m)) {
            y_max = Some(y_max.map_or(y, |current| current.min(y)));
        }
    }

    let y_min = y_min?;
    let y_max = y_max.unwrap_or(f32::INFINITY);
    log::debug!("table region: y_min={:.1}, y_max={:.1}", y_min, y_max);

    Some(TableRegion { y_min, y_max })
}
