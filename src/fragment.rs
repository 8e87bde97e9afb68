//! Positioned text fragments and text normalization.
//!
//! A [`Fragment`] is the unit the whole pipeline operates on: one run of
//! rendered text with a bounding box, produced once by the text stream
//! adapter and immutable thereafter. A forced line break inside one visual
//! cell is represented by the [`LINE_BREAK`] marker token embedded in the
//! fragment text, not by a separate fragment.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::utils::safe_float_cmp;

/// Marker token for a forced line break inside one fragment.
pub const LINE_BREAK: &str = "<br>";

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// A run of rendered text with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Bounding box in downward-increasing document coordinates
    pub bbox: Rect,
    /// Raw text, possibly containing [`LINE_BREAK`] markers
    pub text: String,
}

impl Fragment {
    /// Create a fragment from a bounding box and raw text.
    pub fn new(bbox: Rect, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Replace every line-break marker with a single space.
pub fn strip_breaks(text: &str) -> String {
    text.replace(LINE_BREAK, " ")
}

/// Normalize fragment text for vocabulary matching: line-break markers
/// become spaces, whitespace is collapsed and the ends trimmed.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(&strip_breaks(text))
}

/// Sort fragments into reading order: ascending y, then ascending x.
pub fn sort_reading_order(fragments: &mut [Fragment]) {
    fragments.sort_by(|a, b| {
        safe_float_cmp(a.bbox.y, b.bbox.y).then_with(|| safe_float_cmp(a.bbox.x, b.bbox.x))
    });
}
