//! Thread-safe card ledger
//!
//! This module provides the `CardLedger` struct, which owns every card issued
//! by the bank and is the only place balances change.
//!
//! # Design
//!
//! Cards are stored in a `DashMap` keyed by card number. Each entry is guarded
//! by its shard lock, so a balance check and the mutation that follows it run
//! as one critical section per card: two transfers touching the same card
//! cannot lose an update, while transfers on different cards proceed in
//! parallel.
//!
//! Callers only receive clones of cards. Balance changes go through
//! [`CardLedger::withdraw`] and [`CardLedger::deposit`], which check before
//! they mutate and leave the card untouched on failure.

use crate::types::{Amount, Card, CardId, HolderId, LedgerError, NewCard};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory store of cards with per-card atomic balance updates
///
/// Cards cannot be edited in place from outside the ledger; balances move
/// only through `withdraw` and `deposit`:
///
/// ```compile_fail
/// use bank_ledger::{CardLedger, LedgerError};
///
/// let ledger = CardLedger::new();
/// let _ = ledger.update("5106 2107 0000 0000", |card| {
///     card.balance = -500;
///     Ok::<(), LedgerError>(())
/// });
/// ```
#[derive(Debug)]
pub struct CardLedger {
    /// Cards by exact card number
    cards: DashMap<String, Card>,

    /// Next identifier to hand out
    next_id: AtomicU64,
}

impl CardLedger {
    /// Create an empty ledger
    ///
    /// The first issued card receives id 1.
    pub fn new() -> Self {
        Self {
            cards: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue a new card
    ///
    /// # Arguments
    ///
    /// * `request` - Card data without an identifier
    ///
    /// # Returns
    ///
    /// * `Ok(Card)` - A copy of the registered card with its assigned id
    /// * `Err(LedgerError)` - If the balance is negative or the number is taken
    pub fn issue(&self, request: NewCard) -> Result<Card, LedgerError> {
        if request.balance < 0 {
            return Err(LedgerError::negative_balance(
                &request.number,
                request.balance,
            ));
        }

        let number = request.number.clone();
        let mut issued = None;
        self.cards.entry(number.clone()).or_insert_with(|| {
            // Assigned under the entry lock so a rejected duplicate never burns an id
            let id: CardId = self.next_id.fetch_add(1, Ordering::SeqCst);
            let card = request.into_card(id);
            issued = Some(card.clone());
            card
        });

        issued.ok_or_else(|| LedgerError::duplicate_card(&number))
    }

    /// Find a card by its exact number
    pub fn find(&self, number: &str) -> Option<Card> {
        self.cards.get(number).map(|entry| entry.value().clone())
    }

    /// Check if a card with this exact number is registered
    pub fn contains(&self, number: &str) -> bool {
        self.cards.contains_key(number)
    }

    /// Current balance of a card, if it exists
    pub fn balance(&self, number: &str) -> Option<Amount> {
        self.cards.get(number).map(|entry| entry.balance)
    }

    /// All cards of one holder, ordered by id
    pub fn find_by_holder(&self, holder_id: HolderId) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|entry| entry.holder_id == holder_id)
            .map(|entry| entry.value().clone())
            .collect();
        cards.sort_by_key(|card| card.id);
        cards
    }

    /// Every card in the ledger, ordered by id
    pub fn all(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        cards.sort_by_key(|card| card.id);
        cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Run a closure against a card while holding its lock
    ///
    /// The closure sees the live card; whatever it changes is visible to the
    /// next caller only after it returns. It must leave the card unchanged
    /// when it returns an error.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The closure's result
    /// * `Err(LedgerError::CardNotFound)` - If no card has this number
    /// * `Err(LedgerError)` - Whatever the closure returned
    fn update<F, T>(&self, number: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Card) -> Result<T, LedgerError>,
    {
        let mut entry = self
            .cards
            .get_mut(number)
            .ok_or_else(|| LedgerError::card_not_found(number))?;
        f(entry.value_mut())
    }

    /// Atomically check the balance and debit `amount`
    ///
    /// # Returns
    ///
    /// * `Ok(Amount)` - The balance after the debit
    /// * `Err(LedgerError::NotEnoughMoney)` - If the balance is below `amount`;
    ///   the error carries `amount` as the required total
    pub fn withdraw(&self, number: &str, amount: Amount) -> Result<Amount, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::non_positive_amount(amount));
        }

        self.update(number, |card| {
            if card.balance < amount {
                return Err(LedgerError::not_enough_money(number, card.balance, amount));
            }
            card.balance -= amount;
            Ok(card.balance)
        })
    }

    /// Atomically credit `amount`
    ///
    /// # Returns
    ///
    /// * `Ok(Amount)` - The balance after the credit
    /// * `Err(LedgerError::ArithmeticOverflow)` - If the balance would overflow
    pub fn deposit(&self, number: &str, amount: Amount) -> Result<Amount, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::non_positive_amount(amount));
        }

        self.update(number, |card| {
            card.balance = card
                .balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", number))?;
            Ok(card.balance)
        })
    }
}

impl Default for CardLedger {
    fn default() -> Self {
        Self::new()
    }
}
