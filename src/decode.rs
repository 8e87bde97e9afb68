//! Locale-aware domain parsers and the row-to-record decoder.
//!
//! The three leaf parsers ([`parse_amount`], [`parse_date`],
//! [`parse_currency_exchange`]) are pure functions over the statement's
//! fixed formatting conventions. [`decode_row`] applies them to the
//! per-column text of one reconstructed table row and produces a typed
//! [`TransactionRecord`].

use chrono::{DateTime, FixedOffset, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::fragment::{normalize, Fragment, LINE_BREAK};
use crate::layout::rows::Row;

lazy_static! {
    static ref RE_EXCHANGE: Regex = Regex::new(
        r"Transaksi dengan ([A-Z]{3}) \(([0-9.]+) ([A-Z]{3}) = ([0-9.]+) ([A-Z]{3})\)"
    )
    .unwrap();
}

/// One decoded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction timestamp in the statement time zone
    pub date: DateTime<FixedOffset>,
    /// Counterparty or transaction description
    pub description: String,
    /// Free-text reference line, when present
    pub reference: Option<String>,
    /// Bank-assigned transaction id
    pub id: String,
    /// Transaction category code
    pub category: String,
    /// Transaction type (e.g. `DEBIT`, `CREDIT`)
    pub r#type: String,
    /// User note, when present
    pub note: Option<String>,
    /// Signed amount in whole account-currency units
    pub amount: i64,
    /// Account currency, 3-letter code
    pub currency: String,
    /// Currency the transaction was made in, 3-letter code
    pub transaction_currency: String,
    /// Exchange rate from transaction currency to account currency
    pub exchange_rate: i64,
}

/// A parsed currency-exchange note, or its single-currency default.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyExchange {
    /// Currency the transaction was made in
    pub transaction_currency: String,
    /// Account currency
    pub account_currency: String,
    /// Units of account currency per transaction-currency unit
    pub rate: i64,
}

/// Parse an amount string into a signed integer.
///
/// Every character that is not an ASCII digit or a minus sign is stripped
/// and the remainder read as base 10. The statement formats amounts with
/// `.` as a thousands separator, so `Rp1.234.567` becomes `1234567`.
///
/// Known limitation, preserved deliberately: a genuine decimal fraction
/// would be misread the same way, since `.` is always discarded. Changing
/// this would silently alter financial totals.
pub fn parse_amount(text: &str) -> Result<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    cleaned
        .parse()
        .map_err(|_| Error::InvalidAmount(text.to_string()))
}

/// Parse a `D MonthAbbrev YYYY HH:MM` date string.
///
/// Month abbreviations come from the configuration's fixed vocabulary and
/// the result carries the configured UTC offset.
pub fn parse_date(text: &str, config: &ParserConfig) -> Result<DateTime<FixedOffset>> {
    let invalid = || Error::InvalidDate(text.to_string());

    let parts: Vec<&str> = text.split_whitespace().collect();
    let &[day, month, year, time] = parts.as_slice() else {
        return Err(invalid());
    };

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month = config.month_number(month).ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let (hour, minute) = time.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;

    config
        .utc_offset
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(invalid)
}

/// Parse a currency-exchange note.
///
/// Statements only carry the note on multi-currency transactions; its
/// absence is the common case and defaults both currencies to the local
/// code with a rate of 1.
pub fn parse_currency_exchange(text: &str, local_currency: &str) -> Result<CurrencyExchange> {
    let Some(caps) = RE_EXCHANGE.captures(text) else {
        return Ok(CurrencyExchange {
            transaction_currency: local_currency.to_string(),
            account_currency: local_currency.to_string(),
            rate: 1,
        });
    };

    Ok(CurrencyExchange {
        transaction_currency: caps[1].to_string(),
        account_currency: caps[5].to_string(),
        rate: parse_amount(&caps[4])?,
    })
}

/// Split a cell's fragments into logical lines.
///
/// Each fragment is trimmed, a trailing line-break marker dropped, then
/// split on the remaining markers; tabs inside a line become spaces.
fn cell_lines<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in texts {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix(LINE_BREAK).unwrap_or(trimmed);
        lines.extend(trimmed.split(LINE_BREAK).map(|line| line.replace('\t', " ")));
    }
    lines
}

/// Decode one reconstructed row into a [`TransactionRecord`].
///
/// `row_index` only labels decode errors; it has no effect on the result.
pub fn decode_row(
    row_index: usize,
    row: &Row,
    fragments: &[Fragment],
    config: &ParserConfig,
) -> Result<TransactionRecord> {
    let malformed = |reason: String| Error::MalformedRow {
        row: row_index,
        reason,
    };
    let cell_texts = |col: usize| -> Vec<&str> {
        row.cells
            .get(col)
            .map(|cell| cell.iter().map(|&idx| fragments[idx].text.as_str()).collect())
            .unwrap_or_default()
    };

    // Column 0: date and time, possibly split across stacked fragments
    let date_text = normalize(&cell_texts(0).join(" "));
    if date_text.is_empty() {
        return Err(malformed("date column is empty".to_string()));
    }
    let date = parse_date(&date_text, config).map_err(|e| malformed(e.to_string()))?;

    // Column 1: description / optional reference / "id|category"
    let details = cell_lines(cell_texts(1));
    let description = details
        .first()
        .ok_or_else(|| malformed("details column is empty".to_string()))?
        .clone();
    let reference = (details.len() > 2).then(|| details[1].clone());
    let tail = details.last().unwrap();
    let (id, category) = tail
        .split_once('|')
        .ok_or_else(|| malformed(format!("missing 'id|category' separator in '{}'", tail)))?;

    // Column 2: optional note above the transaction type
    let notes = cell_lines(cell_texts(2));
    let kind = notes
        .last()
        .ok_or_else(|| malformed("notes column is empty".to_string()))?
        .clone();
    let note = (notes.len() > 1).then(|| notes[0].clone());

    // Column 3: signed amount, then an optional currency-exchange note
    let amounts = cell_lines(cell_texts(3));
    let first = amounts
        .first()
        .ok_or_else(|| malformed("amount column is empty".to_string()))?;
    let amount = parse_amount(first).map_err(|e| malformed(e.to_string()))?;
    let exchange = parse_currency_exchange(amounts.last().unwrap(), &config.local_currency)
        .map_err(|e| malformed(e.to_string()))?;

    Ok(TransactionRecord {
        date,
        description,
        reference,
        id: id.trim().to_string(),
        category: category.trim().to_string(),
        r#type: kind,
        note,
        amount,
        currency: exchange.account_currency,
        transaction_currency: exchange.transaction_currency,
        exchange_rate: exchange.rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    #[test]
    fn test_parse_amount_strips_formatting() {
        assert_eq!(parse_amount("Rp1.234.567").unwrap(), 1_234_567);
        assert_eq!(parse_amount("-50.000").unwrap(), -50_000);
        assert_eq!(parse_amount("+1.000").unwrap(), 1_000);
        assert_eq!(parse_amount("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_amount_rejects_empty() {
        assert!(matches!(parse_amount("Rp"), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse_amount(""), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_date_jakarta_time() {
        let date = parse_date("5 Jan 2020 13:45", &config()).unwrap();
        assert_eq!(date.to_rfc3339(), "2020-01-05T13:45:00+07:00");
    }

    #[test]
    fn test_parse_date_indonesian_months() {
        let mei = parse_date("17 Mei 2021 08:00", &config()).unwrap();
        assert_eq!(mei.to_rfc3339(), "2021-05-17T08:00:00+07:00");

        let agt = parse_date("1 Agt 2021 23:59", &config()).unwrap();
        assert_eq!(agt.to_rfc3339(), "2021-08-01T23:59:00+07:00");
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(parse_date("5 Aug 2020 13:45", &config()).is_err());
        assert!(parse_date("5 Jan 2020", &config()).is_err());
        assert!(parse_date("32 Jan 2020 13:45", &config()).is_err());
        assert!(parse_date("5 Jan 2020 25:00", &config()).is_err());
    }

    #[test]
    fn test_parse_currency_exchange_match() {
        let fx = parse_currency_exchange("Transaksi dengan USD (1 USD = 14500 IDR)", "IDR").unwrap();
        assert_eq!(fx.transaction_currency, "USD");
        assert_eq!(fx.account_currency, "IDR");
        assert_eq!(fx.rate, 14_500);
    }

    #[test]
    fn test_parse_currency_exchange_default() {
        let fx = parse_currency_exchange("-45.000", "IDR").unwrap();
        assert_eq!(fx.transaction_currency, "IDR");
        assert_eq!(fx.account_currency, "IDR");
        assert_eq!(fx.rate, 1);
    }

    #[test]
    fn test_cell_lines_split_and_trim() {
        let lines = cell_lines(["Kopi Kenangan<br>123|FOOD<br>", "DEBIT\tBCA"]);
        assert_eq!(lines, vec!["Kopi Kenangan", "123|FOOD", "DEBIT BCA"]);
    }

    fn row_from(cells: Vec<Vec<usize>>) -> Row {
        Row {
            anchor_y: 0.0,
            height: 10.0,
            cells,
        }
    }

    fn frag(text: &str) -> Fragment {
        Fragment::new(Rect::new(0.0, 0.0, 10.0, 10.0), text)
    }

    #[test]
    fn test_decode_row_minimal() {
        let fragments = vec![
            frag("5 Jan 2020 13:45"),
            frag("Coffee Shop<br>123456|FOOD"),
            frag("DEBIT"),
            frag("-45.000"),
        ];
        let row = row_from(vec![vec![0], vec![1], vec![2], vec![3]]);
        let record = decode_row(0, &row, &fragments, &config()).unwrap();

        assert_eq!(record.description, "Coffee Shop");
        assert_eq!(record.reference, None);
        assert_eq!(record.id, "123456");
        assert_eq!(record.category, "FOOD");
        assert_eq!(record.r#type, "DEBIT");
        assert_eq!(record.note, None);
        assert_eq!(record.amount, -45_000);
        assert_eq!(record.currency, "IDR");
        assert_eq!(record.transaction_currency, "IDR");
        assert_eq!(record.exchange_rate, 1);
    }

    #[test]
    fn test_decode_row_with_reference_note_and_exchange() {
        let fragments = vec![
            frag("5 Jan 2020"),
            frag("13:45"),
            frag("Online Store<br>INV/2020/01<br>987654 | SHOPPING"),
            frag("lunch with team<br>DEBIT"),
            frag("-150.000<br>Transaksi dengan USD (1 USD = 14500 IDR)"),
        ];
        let row = row_from(vec![vec![0, 1], vec![2], vec![3], vec![4]]);
        let record = decode_row(0, &row, &fragments, &config()).unwrap();

        assert_eq!(record.description, "Online Store");
        assert_eq!(record.reference.as_deref(), Some("INV/2020/01"));
        assert_eq!(record.id, "987654");
        assert_eq!(record.category, "SHOPPING");
        assert_eq!(record.note.as_deref(), Some("lunch with team"));
        assert_eq!(record.r#type, "DEBIT");
        assert_eq!(record.amount, -150_000);
        assert_eq!(record.transaction_currency, "USD");
        assert_eq!(record.currency, "IDR");
        assert_eq!(record.exchange_rate, 14_500);
    }

    #[test]
    fn test_decode_row_missing_separator() {
        let fragments = vec![
            frag("5 Jan 2020 13:45"),
            frag("Coffee Shop<br>no separator here"),
            frag("DEBIT"),
            frag("-45.000"),
        ];
        let row = row_from(vec![vec![0], vec![1], vec![2], vec![3]]);
        let err = decode_row(7, &row, &fragments, &config()).unwrap_err();

        match err {
            Error::MalformedRow { row, reason } => {
                assert_eq!(row, 7);
                assert!(reason.contains("id|category"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_row_empty_columns() {
        let fragments = vec![frag("5 Jan 2020 13:45")];
        let row = row_from(vec![vec![0], vec![], vec![], vec![]]);
        let err = decode_row(0, &row, &fragments, &config()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }
}
