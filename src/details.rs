//! Detail panel extraction: label/value association above the table.
//!
//! The account detail panel scatters label and value fragments with no
//! structural relationship. The statement layout always places a value
//! immediately adjacent to its label, so plain nearest-neighbor search over
//! the panel fragments is sufficient; no direction or alignment constraint
//! is needed.

use indexmap::IndexMap;

use crate::config::ParserConfig;
use crate::fragment::{normalize, Fragment};
use crate::geometry::{squared_distance, Point};

/// Extract canonical detail fields from the fragments above `y_min`.
///
/// For every fragment whose normalized text matches a configured label, the
/// nearest other panel fragment (squared Euclidean distance on the fragment
/// origin) is taken as its value. A label with no other panel fragment to
/// pair with yields no entry.
pub fn extract_details(
    fragments: &[Fragment],
    y_min: f32,
    config: &ParserConfig,
) -> IndexMap<String, String> {
    let panel: Vec<(Point, String)> = fragments
        .iter()
        .filter(|f| f.bbox.y < y_min)
        .map(|f| (f.bbox.origin(), normalize(&f.text)))
        .collect();

    let mut details = IndexMap::new();

    for (idx, (pos, text)) in panel.iter().enumerate() {
        let Some(field) = config.detail_field(text) else {
            continue;
        };

        let mut closest: Option<(f32, &str)> = None;
        for (other_idx, (other_pos, other_text)) in panel.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            let dist = squared_distance(pos, other_pos);
            if closest.is_none_or(|(best, _)| dist < best) {
                closest = Some((dist, other_text));
            }
        }

        match closest {
            Some((_, value)) => {
                details.insert(field.to_string(), value.to_string());
            },
            None => log::warn!("detail label '{}' has no neighboring value", text),
        }
    }

    log::debug!("extracted {} detail fields", details.len());
    details
}
