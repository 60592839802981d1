//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `card`: Card records and issuing requests
//! - `transaction`: Transaction records, identifiers and money aliases
//! - `error`: Error type for the ledger

pub mod card;
pub mod error;
pub mod transaction;

pub use card::{Card, CardId, CardKind, HolderId, NewCard};
pub use error::LedgerError;
pub use transaction::{
    Amount, CategoryTotals, Timestamp, Transaction, TransactionDraft, TransactionId,
};
