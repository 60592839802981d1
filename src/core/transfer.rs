//! Card-to-card transfer engine
//!
//! This module provides the TransferEngine that orchestrates a single transfer
//! by coordinating between the CardLedger, the TransactionStore and the
//! commission policy.
//!
//! The engine enforces business rules such as:
//! - Positive amounts only, checked before anything else
//! - Card numbers must pass the Luhn checksum
//! - A number routed to this bank must exist in the ledger
//! - The source must cover amount plus commission before anything is credited

use crate::core::card_ledger::CardLedger;
use crate::core::card_number;
use crate::core::commission::{CommissionPolicy, TransferShape};
use crate::core::routing::PrefixRouting;
use crate::core::traits::IssuerRouting;
use crate::core::transaction_store::TransactionStore;
use crate::types::{Amount, LedgerError};
use std::sync::Arc;

/// Transfer processing engine
///
/// Shares the ledger and the store with the rest of the application; the
/// commission policy and issuer routing are fixed at construction.
#[derive(Debug)]
pub struct TransferEngine<R = PrefixRouting> {
    ledger: Arc<CardLedger>,
    store: Arc<TransactionStore>,
    commissions: CommissionPolicy,
    routing: R,
}

impl<R: IssuerRouting> TransferEngine<R> {
    /// Create a new TransferEngine
    ///
    /// # Arguments
    ///
    /// * `ledger` - Cards this bank tracks
    /// * `store` - History every successful transfer is appended to
    /// * `commissions` - Fee functions by transfer shape
    /// * `routing` - Decides which numbers belong to this bank
    pub fn new(
        ledger: Arc<CardLedger>,
        store: Arc<TransactionStore>,
        commissions: CommissionPolicy,
        routing: R,
    ) -> Self {
        TransferEngine {
            ledger,
            store,
            commissions,
            routing,
        }
    }

    pub fn ledger(&self) -> &CardLedger {
        &self.ledger
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// Move `amount` from one card number to another
    ///
    /// Either side may be a card of another bank; only cards found in the
    /// ledger have their balances changed.
    ///
    /// # Arguments
    ///
    /// * `from` - Source card number
    /// * `to` - Destination card number
    /// * `amount` - Requested amount in minor units
    ///
    /// # Returns
    ///
    /// * `Ok(Amount)` - The total debited from the source (amount + commission)
    /// * `Err(LedgerError)` - If the transfer was rejected; no balance changed
    ///   and nothing was recorded
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - Either number fails the checksum
    /// - A number belongs to this bank but is not in the ledger
    /// - The source card cannot cover the total (the error carries the total)
    /// - The total or the destination balance would overflow
    pub fn transfer(&self, from: &str, to: &str, amount: Amount) -> Result<Amount, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::non_positive_amount(amount));
        }

        if !card_number::is_valid(from) {
            return Err(LedgerError::invalid_card_number(from));
        }
        if !card_number::is_valid(to) {
            return Err(LedgerError::invalid_card_number(to));
        }

        let from_inner = self.resolve(from)?;
        let to_inner = self.resolve(to)?;

        let shape = TransferShape::classify(from_inner, to_inner);
        let commission = self.commissions.commission(amount, shape);
        let total = amount
            .checked_add(commission)
            .ok_or_else(|| LedgerError::arithmetic_overflow("commission", from))?;

        if from_inner {
            self.ledger.withdraw(from, total)?;
        }

        if to_inner {
            if let Err(e) = self.ledger.deposit(to, amount) {
                // Undo the debit so neither side settles. The debit freed room
                // for exactly `total`, so the refund can only overflow if another
                // transfer credited the source in between.
                if from_inner && self.ledger.deposit(from, total).is_err() {
                    return Err(LedgerError::arithmetic_overflow("refund", from));
                }
                return Err(e);
            }
        }

        self.store.add(from, to, amount, total, "");

        Ok(total)
    }

    /// Decide whether a side is inner (tracked) or outer
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The ledger holds a card with this number
    /// * `Ok(false)` - The number belongs to another bank
    /// * `Err(LedgerError::CardNotFound)` - The number is ours but unknown
    fn resolve(&self, number: &str) -> Result<bool, LedgerError> {
        if self.ledger.contains(number) {
            Ok(true)
        } else if self.routing.belongs_to_issuer(number) {
            Err(LedgerError::card_not_found(number))
        } else {
            Ok(false)
        }
    }
}
