//! Statement parsing: per-page drive and cross-page aggregation.
//!
//! [`StatementParser`] runs segmentation, column detection, row clustering
//! and row decoding over every page, extracts the detail panel from the
//! first page, and merges the per-page results into one [`Statement`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::adapter::{RenderNode, TextStream};
use crate::config::ParserConfig;
use crate::decode::{decode_row, TransactionRecord};
use crate::details::extract_details;
use crate::error::Result;
use crate::fragment::{sort_reading_order, Fragment};
use crate::layout::{cluster_rows, detect_columns, locate_table};

/// Detail fields keyed by canonical name, in visual order.
pub type DetailFields = IndexMap<String, String>;

/// The parsed document: account details plus ordered transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Account detail fields from the first page that yielded any
    pub details: DetailFields,
    /// Transactions in document order, concatenated across pages
    pub transactions: Vec<TransactionRecord>,
}

/// Parser for one statement document.
///
/// # Examples
///
/// ```ignore
/// use jenius_statement::StatementParser;
///
/// let parser = StatementParser::new();
/// let statement = parser.parse_pages(pages_of_fragments)?;
/// for tx in &statement.transactions {
///     println!("{} {} {}", tx.date, tx.amount, tx.description);
/// }
/// ```
#[derive(Debug, Default)]
pub struct StatementParser {
    config: ParserConfig,
}

impl StatementParser {
    /// Create a parser with the default Jenius configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with an explicit configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a rendered document: flatten each page through the text stream
    /// adapter, then aggregate.
    pub fn parse_document(&self, pages: &[RenderNode]) -> Result<Statement> {
        let mut stream = TextStream::new();
        self.parse_pages(pages.iter().map(|page| stream.collect_page(page)))
    }

    /// Parse pre-flattened pages of fragments, in page order.
    ///
    /// Pages are processed synchronously, each to completion before the
    /// next; the only accumulating state is the statement under
    /// construction.
    pub fn parse_pages(
        &self,
        pages: impl IntoIterator<Item = Vec<Fragment>>,
    ) -> Result<Statement> {
        let mut details: Option<DetailFields> = None;
        let mut transactions = Vec::new();

        for (page_no, mut fragments) in pages.into_iter().enumerate() {
            sort_reading_order(&mut fragments);
            let (page_details, page_transactions) =
                self.process_page(&fragments, page_no == 0)?;

            log::debug!(
                "page {}: {} transactions, details: {}",
                page_no,
                page_transactions.len(),
                page_details.is_some(),
            );

            details = merge_details(details, page_details);
            transactions.extend(page_transactions);
        }

        Ok(Statement {
            details: details.unwrap_or_default(),
            transactions,
        })
    }

    fn process_page(
        &self,
        fragments: &[Fragment],
        find_details: bool,
    ) -> Result<(Option<DetailFields>, Vec<TransactionRecord>)> {
        let Some(region) = locate_table(fragments, &self.config) else {
            log::debug!("no table header on page; skipping");
            return Ok((None, Vec::new()));
        };

        let columns = detect_columns(fragments, &region);
        let rows = cluster_rows(fragments, &columns, &region, &self.config)?;

        let mut transactions = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            transactions.push(decode_row(i, row, fragments, &self.config)?);
        }

        let details =
            find_details.then(|| extract_details(fragments, region.y_min, &self.config));

        Ok((details, transactions))
    }
}

/// Merge per-page detail maps: the first non-empty map wins and later pages
/// never override it. Empty maps are treated as absent.
fn merge_details(first: Option<DetailFields>, second: Option<DetailFields>) -> Option<DetailFields> {
    let non_empty = |d: Option<DetailFields>| d.filter(|m| !m.is_empty());
    non_empty(first).or_else(|| non_empty(second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> DetailFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_none_takes_second() {
        let second = map(&[("name", "Budi")]);
        assert_eq!(merge_details(None, Some(second.clone())), Some(second));
    }

    #[test]
    fn test_merge_first_non_empty_wins() {
        let first = map(&[("name", "Budi")]);
        let second = map(&[("name", "Siti")]);
        assert_eq!(
            merge_details(Some(first.clone()), Some(second)),
            Some(first)
        );
    }

    #[test]
    fn test_merge_skips_empty_maps() {
        let second = map(&[("name", "Budi")]);
        assert_eq!(
            merge_details(Some(DetailFields::new()), Some(second.clone())),
            Some(second)
        );
        assert_eq!(merge_details(Some(DetailFields::new()), None), None);
    }
}
