//! Ledger ingestion contract.
//!
//! The parser's consumer upserts an account keyed by
//! `(owner, account name, card number)` and transactions keyed by
//! `(account, transaction id)`, so re-ingesting the same document never
//! duplicates anything and a changed category updates the stored row in
//! place. [`MemoryLedger`] is the in-memory reference implementation of
//! that contract; persistent stores live outside this crate.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::decode::TransactionRecord;
use crate::error::{Error, Result};
use crate::parser::Statement;

/// An upserted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Owner identifier supplied by the caller
    pub owner: String,
    /// Account display name (the statement's "Menampilkan transaksi dari")
    pub name: String,
    /// Account number
    pub number: String,
    /// Account currency code
    pub currency: String,
    /// Cashtag handle
    pub cashtag: String,
    /// Card number with whitespace stripped
    pub card_number: String,
}

/// Counters describing what one ingestion changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Whether the account was newly created
    pub created_account: bool,
    /// Transactions inserted
    pub inserted: usize,
    /// Transactions whose category was updated in place
    pub updated: usize,
    /// Transactions already stored unchanged
    pub unchanged: usize,
}

/// Sink for parsed statements.
pub trait LedgerStore {
    /// Upsert a statement's account and transactions for `owner`.
    fn ingest(&mut self, owner: &str, statement: &Statement) -> Result<IngestSummary>;
}

/// In-memory reference ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    accounts: Vec<Account>,
    transactions: HashMap<(usize, String), TransactionRecord>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All upserted accounts, in creation order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of transactions stored for the account at `account_id`.
    pub fn transaction_count(&self, account_id: usize) -> usize {
        self.transactions
            .keys()
            .filter(|(id, _)| *id == account_id)
            .count()
    }

    /// Look up a stored transaction by account and transaction id.
    pub fn transaction(&self, account_id: usize, transaction_id: &str) -> Option<&TransactionRecord> {
        self.transactions
            .get(&(account_id, transaction_id.to_string()))
    }

    fn required<'a>(statement: &'a Statement, field: &str) -> Result<&'a str> {
        statement
            .details
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| Error::IncompleteDetails(field.to_string()))
    }
}

impl LedgerStore for MemoryLedger {
    fn ingest(&mut self, owner: &str, statement: &Statement) -> Result<IngestSummary> {
        let name = Self::required(statement, "account")?;
        let card_number: String = Self::required(statement, "card_number")?
            .split_whitespace()
            .collect();

        let mut summary = IngestSummary::default();

        let account_id = match self.accounts.iter().position(|a| {
            a.owner == owner && a.name == name && a.card_number == card_number
        }) {
            Some(id) => {
                log::debug!("found existing account {} ({})", name, card_number);
                id
            },
            None => {
                let account = Account {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    number: Self::required(statement, "account_number")?.to_string(),
                    currency: Self::required(statement, "currency")?.to_string(),
                    cashtag: Self::required(statement, "cashtag")?.to_string(),
                    card_number,
                };
                log::info!("created account {} ({})", account.name, account.card_number);
                self.accounts.push(account);
                summary.created_account = true;
                self.accounts.len() - 1
            },
        };

        for tx in &statement.transactions {
            match self.transactions.entry((account_id, tx.id.clone())) {
                Entry::Occupied(mut entry) => {
                    if entry.get().category != tx.category {
                        log::info!(
                            "updated category on transaction {}: {} -> {}",
                            tx.id,
                            entry.get().category,
                            tx.category,
                        );
                        entry.get_mut().category = tx.category.clone();
                        summary.updated += 1;
                    } else {
                        summary.unchanged += 1;
                    }
                },
                Entry::Vacant(entry) => {
                    entry.insert(tx.clone());
                    summary.inserted += 1;
                },
            }
        }

        Ok(summary)
    }
}
