//! Transaction-related types for the bank ledger
//!
//! This module defines the immutable transaction record kept by the
//! transaction store, the draft form used before an id is assigned, and the
//! scalar aliases shared across the crate.

use std::collections::HashMap;

/// Money in minor currency units (kopecks, cents)
///
/// `100_00` is one hundred units of the card's currency.
pub type Amount = i64;

/// Transaction identifier
///
/// Assigned by the transaction store, starting from 1.
pub type TransactionId = u64;

/// Seconds since the Unix epoch, UTC
pub type Timestamp = i64;

/// Category label → summed transaction totals
pub type CategoryTotals = HashMap<String, Amount>;

/// Recorded money movement between two card numbers
///
/// `from` and `to` are card numbers rather than ledger references because
/// either side may belong to another bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,

    /// Source card number
    pub from: String,

    /// Destination card number
    pub to: String,

    /// Requested transfer amount
    pub amount: Amount,

    /// Amount plus commission, i.e. what the source was debited
    pub total: Amount,

    pub timestamp: Timestamp,

    /// Merchant category code; empty for peer transfers
    pub category_code: String,
}

/// A transaction that has not been appended yet
///
/// Produced by importers; the store turns it into a [`Transaction`] by
/// assigning the next identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub from: String,
    pub to: String,
    pub amount: Amount,
    pub total: Amount,
    pub timestamp: Timestamp,
    pub category_code: String,
}

impl TransactionDraft {
    /// Attach the store-assigned identifier
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            from: self.from,
            to: self.to,
            amount: self.amount,
            total: self.total,
            timestamp: self.timestamp,
            category_code: self.category_code,
        }
    }
}
