//! Configuration for statement parsing.
//!
//! All locale-specific vocabulary lives here: table header and footer
//! markers, the detail-panel label table, the month-name table and the
//! statement time zone. Components receive this configuration explicitly so
//! they stay pure functions of their inputs.

use chrono::FixedOffset;

/// Statement parsing configuration.
///
/// The default configuration carries the Jenius (Bank BTPN) vocabulary:
/// Indonesian month abbreviations, the `TANGGAL & JAM` / `RINCIAN` /
/// `CATATAN` / `JUMLAH` table headers and the Asia/Jakarta time zone.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Column header labels marking the top of the table, left to right
    pub table_headers: Vec<String>,
    /// Boilerplate strings marking the bottom of the table
    pub footer_markers: Vec<String>,
    /// Detail-panel label text mapped to its canonical field name
    pub detail_labels: Vec<(String, String)>,
    /// Month abbreviations in calendar order (index 0 = January)
    pub months: Vec<String>,
    /// Fixed UTC offset of the statement's civil times
    pub utc_offset: FixedOffset,
    /// Currency code assumed when a row carries no currency-exchange note
    pub local_currency: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create the default Jenius configuration.
    pub fn new() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            table_headers: to_strings(&["TANGGAL & JAM", "RINCIAN", "CATATAN", "JUMLAH"]),
            footer_markers: to_strings(&[
                "PT Bank BTPN",
                "www.jenius.com",
                "1500 365",
                "Jenius Help",
                "Disclaimer",
            ]),
            detail_labels: [
                ("Pemilik Rekening", "name"),
                ("Nomor rekening", "account_number"),
                ("$Cashtag", "cashtag"),
                ("Mata uang", "currency"),
                ("Menampilkan transaksi dari", "account"),
                ("Nomor Kartu", "card_number"),
            ]
            .iter()
            .map(|(label, field)| (label.to_string(), field.to_string()))
            .collect(),
            months: to_strings(&[
                "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agt", "Sep", "Okt", "Nov", "Des",
            ]),
            // Asia/Jakarta is UTC+7 year-round, no DST
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
            local_currency: "IDR".to_string(),
        }
    }

    /// Override the local currency code.
    pub fn with_local_currency(mut self, currency: impl Into<String>) -> Self {
        self.local_currency = currency.into();
        self
    }

    /// Override the statement time zone.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// The header label of column 0, used as the row-clustering sentinel.
    pub fn column0_header(&self) -> &str {
        &self.table_headers[0]
    }

    /// Look up a month abbreviation, returning its 1-based month number.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.months
            .iter()
            .position(|m| m == name)
            .map(|i| i as u32 + 1)
    }

    /// Look up a detail-panel label, returning its canonical field name.
    ///
    /// Matching is exact equality on the normalized label text.
    pub fn detail_field(&self, label: &str) -> Option<&str> {
        self.detail_labels
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, field)| field.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let config = ParserConfig::default();
        assert_eq!(config.column0_header(), "TANGGAL & JAM");
        assert_eq!(config.table_headers.len(), 4);
        assert_eq!(config.local_currency, "IDR");
        assert_eq!(config.utc_offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_month_number() {
        let config = ParserConfig::default();
        assert_eq!(config.month_number("Jan"), Some(1));
        assert_eq!(config.month_number("Mei"), Some(5));
        assert_eq!(config.month_number("Agt"), Some(8));
        assert_eq!(config.month_number("Des"), Some(12));
        assert_eq!(config.month_number("Aug"), None);
    }

    #[test]
    fn test_detail_field_exact_match() {
        let config = ParserConfig::default();
        assert_eq!(config.detail_field("Pemilik Rekening"), Some("name"));
        assert_eq!(config.detail_field("Nomor Kartu"), Some("card_number"));
        assert_eq!(config.detail_field("Pemilik"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ParserConfig::default()
            .with_local_currency("SGD")
            .with_utc_offset(FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(config.local_currency, "SGD");
        assert_eq!(config.utc_offset.local_minus_utc(), 8 * 3600);
    }
}
