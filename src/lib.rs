//! # Jenius Statement
//!
//! Parser for Jenius (Bank BTPN) e-statement documents: turns rendered text
//! fragments — each with a bounding box but no table or cell tags — into a
//! structured [`Statement`] of account detail fields and typed transaction
//! records, ready for ledger ingestion.
//!
//! ## Pipeline
//!
//! 1. **Text stream adapter** ([`adapter`]): flattens a rendered page tree
//!    (pages, figures, text boxes, text lines, glyphs) into positioned
//!    [`Fragment`]s, coalescing glyphs by font context and marking forced
//!    line breaks with a `<br>` token.
//! 2. **Page segmentation** ([`layout::segmenter`]): finds the vertical
//!    table region from fixed header/footer marker vocabularies.
//! 3. **Column detection** ([`layout::columns`]): merges horizontal extents
//!    of in-region fragments into ordered column intervals.
//! 4. **Row clustering** ([`layout::rows`]): anchors row bands on timestamp
//!    fragments in column 0 and assigns every fragment to a (row, column).
//! 5. **Detail extraction** ([`details`]): pairs label fragments above the
//!    table with their nearest value fragment.
//! 6. **Decoding** ([`decode`]): converts per-column row text into typed
//!    [`TransactionRecord`]s using the Indonesian locale conventions.
//! 7. **Aggregation** ([`parser`]): merges per-page results into one
//!    [`Statement`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use jenius_statement::{StatementParser, LedgerStore, MemoryLedger};
//!
//! let parser = StatementParser::new();
//! let statement = parser.parse_document(&pages)?;
//!
//! let mut ledger = MemoryLedger::new();
//! let summary = ledger.ingest("user1", &statement)?;
//! println!("{} new transactions", summary.inserted);
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Layout analysis
pub mod geometry;
pub mod layout;

// Input side: fragments and the render-tree adapter
pub mod adapter;
pub mod fragment;

// Decoding
pub mod decode;
pub mod details;

// Configuration
pub mod config;

// Document-level parsing
pub mod parser;

// Ingestion contract
pub mod ingest;

// Re-exports
pub use adapter::{RenderNode, TextStream};
pub use config::ParserConfig;
pub use decode::TransactionRecord;
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use ingest::{Account, IngestSummary, LedgerStore, MemoryLedger};
pub use parser::{DetailFields, Statement, StatementParser};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting never panics on NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "jenius_statement");
    }
}
