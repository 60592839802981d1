//! Core business logic module
//!
//! This module contains the ledger components:
//! - `card_number` - Luhn validation and card number generation
//! - `traits` - Trait abstractions for interchangeable implementations
//! - `routing` - Issuer prefix routing
//! - `card_ledger` - Card registry and balance operations
//! - `commission` - Commission policy per transfer shape
//! - `transaction_store` - Append-only transaction history
//! - `transfer` - Transfer orchestration between cards
//! - `category` - Merchant category labels
//! - `aggregation` - Per-category spending computation shared by strategies

pub mod aggregation;
pub mod card_ledger;
pub mod card_number;
pub mod category;
pub mod commission;
pub mod routing;
pub mod traits;
pub mod transaction_store;
pub mod transfer;

pub use card_ledger::CardLedger;
pub use category::{CategoryTable, UNCATEGORIZED};
pub use commission::{CommissionPolicy, CommissionRule, TransferShape};
pub use routing::PrefixRouting;
pub use traits::IssuerRouting;
pub use transaction_store::TransactionStore;
pub use transfer::TransferEngine;
