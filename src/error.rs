//! Error types for statement parsing.
//!
//! This module defines all error types that can occur while reconstructing
//! the transaction table and decoding its rows.

/// Result type alias for statement parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during statement parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fixed table-header label was not found at the top of column 0
    #[error("Table header '{0}' not found in first column")]
    MissingTableHeader(String),

    /// A date-only anchor line was not followed by a time line
    #[error("Date line '{0}' is not followed by a time line")]
    MissingTimeLine(String),

    /// A row's cell content violated a decoding assumption
    #[error("Failed to decode row {row}: {reason}")]
    MalformedRow {
        /// Zero-based row index within the page
        row: usize,
        /// Reason the row could not be decoded
        reason: String,
    },

    /// A date string did not match the `D MonthAbbrev YYYY HH:MM` format
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// An amount string contained no parseable integer
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// A required detail field was absent at the ingestion boundary
    #[error("Statement details missing required field '{0}'")]
    IncompleteDetails(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_header_error() {
        let err = Error::MissingTableHeader("TANGGAL & JAM".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("TANGGAL & JAM"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_missing_time_line_error() {
        let err = Error::MissingTimeLine("5 Jan 2020".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("5 Jan 2020"));
        assert!(msg.contains("time line"));
    }

    #[test]
    fn test_malformed_row_error() {
        let err = Error::MalformedRow {
            row: 3,
            reason: "details column is empty".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("row 3"));
        assert!(msg.contains("details column is empty"));
    }

    #[test]
    fn test_incomplete_details_error() {
        let err = Error::IncompleteDetails("card_number".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("card_number"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
