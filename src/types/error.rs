//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while issuing cards,
//! transferring money and importing transaction history.
//!
//! # Error Categories
//!
//! - **Transfer Errors**: Non-positive amounts, invalid numbers, unknown cards,
//!   insufficient funds
//! - **Ledger Errors**: Duplicate card numbers, negative opening balances
//! - **Arithmetic Errors**: Overflow while computing totals or crediting
//! - **Import Errors**: File I/O, malformed CSV rows, unparseable amounts

use super::transaction::Amount;
use rust_decimal::Decimal;
use thiserror::Error;

/// Render minor units as a two-place decimal for messages
fn money(amount: Amount) -> Decimal {
    Decimal::new(amount, 2)
}

/// Main error type for the ledger
///
/// Every failing operation returns one of these variants to its immediate
/// caller. Each variant carries the context needed to explain the failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Transfer amount is zero or negative
    ///
    /// Checked before anything else.
    #[error("Attempt to transfer non-positive amount {}", money(*amount))]
    NonPositiveAmount {
        /// The rejected amount
        amount: Amount,
    },

    /// Card number failed the checksum
    #[error("Card number '{number}' is invalid")]
    InvalidCardNumber {
        /// The rejected number
        number: String,
    },

    /// Number belongs to this bank but no card with it is registered
    #[error("Card {number} not found in bank")]
    CardNotFound {
        /// The missing card number
        number: String,
    },

    /// Source card cannot cover the transfer total
    ///
    /// `total` is what the transfer would have debited, commission included.
    #[error(
        "Not enough money on card {number}: balance {}, required {}",
        money(*balance),
        money(*total)
    )]
    NotEnoughMoney {
        /// Source card number
        number: String,
        /// Balance at the time of the check
        balance: Amount,
        /// Amount plus commission
        total: Amount,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected and no balance changes.
    #[error("Arithmetic overflow in {operation} for card {number}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Card involved
        number: String,
    },

    /// A card with this number is already registered
    #[error("Card {number} is already issued")]
    DuplicateCard {
        /// The duplicated number
        number: String,
    },

    /// Card cannot be issued with a negative opening balance
    #[error("Card {number} cannot be issued with negative balance {}", money(*balance))]
    NegativeBalance {
        /// Card number
        number: String,
        /// Requested opening balance
        balance: Amount,
    },

    /// Amount field could not be read as a two-place decimal
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The raw field
        amount: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the importer skips the row and continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Amount) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create an InvalidCardNumber error
    pub fn invalid_card_number(number: &str) -> Self {
        LedgerError::InvalidCardNumber {
            number: number.to_string(),
        }
    }

    /// Create a CardNotFound error
    pub fn card_not_found(number: &str) -> Self {
        LedgerError::CardNotFound {
            number: number.to_string(),
        }
    }

    /// Create a NotEnoughMoney error
    pub fn not_enough_money(number: &str, balance: Amount, total: Amount) -> Self {
        LedgerError::NotEnoughMoney {
            number: number.to_string(),
            balance,
            total,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, number: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            number: number.to_string(),
        }
    }

    /// Create a DuplicateCard error
    pub fn duplicate_card(number: &str) -> Self {
        LedgerError::DuplicateCard {
            number: number.to_string(),
        }
    }

    /// Create a NegativeBalance error
    pub fn negative_balance(number: &str, balance: Amount) -> Self {
        LedgerError::NegativeBalance {
            number: number.to_string(),
            balance,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Total a failed transfer reports back to its caller
    ///
    /// `NotEnoughMoney` reports the computed total so callers can see what was
    /// required; every other failure reports zero.
    pub fn reported_total(&self) -> Amount {
        match self {
            LedgerError::NotEnoughMoney { total, .. } => *total,
            _ => 0,
        }
    }
}
