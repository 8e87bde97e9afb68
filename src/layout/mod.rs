//! Table reconstruction from positioned fragments.
//!
//! Three passes run per page, in order:
//!
//! 1. [`segmenter`] finds the vertical table region from header and footer
//!    marker text;
//! 2. [`columns`] merges horizontal extents of in-region fragments into
//!    ordered column intervals;
//! 3. [`rows`] anchors row bands on timestamp fragments in column 0 and
//!    assigns every in-region fragment to a (row, column) cell.

pub mod columns;
pub mod rows;
pub mod segmenter;

pub use columns::{detect_columns, Columns};
pub use rows::{cluster_rows, Row, ROW_MARGIN};
pub use segmenter::{locate_table, TableRegion};
