//! Bank Ledger Library
//! # Overview
//!
//! This library models a bank's card ledger: issuing cards, moving money
//! between them with commissions, keeping an append-only transaction history,
//! and aggregating a card's spending by merchant category with interchangeable
//! concurrent strategies.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Card, Transaction, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`core`] - Business logic components:
//!   - [`core::card_number`] - Luhn validation and number generation
//!   - [`core::card_ledger`] - Card registry and balance operations
//!   - [`core::transfer`] - Transfers with commission and issuer routing
//!   - [`core::transaction_store`] - Append-only transaction history
//!   - [`core::aggregation`] - Per-category spending computation
//! - [`strategy`] - Sequential, shared-accumulator and message-passing aggregation
//! - [`io`] - CSV reading and writing
//!
//! # Transfer Shapes
//!
//! A card is *inner* when the ledger tracks it and *outer* otherwise. The
//! issuer prefix only tells an unknown number of this bank (`CardNotFound`)
//! apart from another bank's card. The commission depends on both sides:
//!
//! - **Inner → inner**: source debited, destination credited
//! - **Inner ↔ outer**: only the inner side changes
//! - **Outer → outer**: no balance changes, the transfer is only recorded

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    CardLedger, CategoryTable, CommissionPolicy, CommissionRule, PrefixRouting, TransactionStore,
    TransferEngine,
};
pub use io::{write_category_totals_csv, write_spending_csv, write_transactions_csv};
pub use strategy::{create_strategy, AggregationStrategy};
pub use types::{
    Amount, Card, CategoryTotals, LedgerError, NewCard, Transaction, TransactionDraft,
    TransactionId,
};
