//! Card-related types for the bank ledger
//!
//! This module defines the Card structure owned by the card ledger and the
//! request used to issue new cards.

use super::transaction::Amount;

/// Card identifier
///
/// Assigned by the ledger, starting from 1.
pub type CardId = u64;

/// Card holder identifier
pub type HolderId = u64;

/// Physical form of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Plastic,
    Virtual,
}

/// Card record held by the ledger
///
/// Callers only ever see clones; the ledger is the sole owner of the live
/// balance and mutates it through withdraw/deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Ledger-assigned identifier, unique and monotonically increasing
    pub id: CardId,

    /// Owner of the card
    pub holder_id: HolderId,

    pub kind: CardKind,

    /// Payment system that issued the card (e.g. "visa")
    pub issuer: String,

    /// Balance in minor currency units, never negative
    pub balance: Amount,

    /// ISO currency code
    pub currency: String,

    /// Card number, qualified by this bank's issuer prefix
    pub number: String,

    /// Icon URI shown next to the card
    pub icon: String,
}

/// Everything needed to issue a card except its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub holder_id: HolderId,
    pub kind: CardKind,
    pub issuer: String,
    pub balance: Amount,
    pub currency: String,
    pub number: String,
    pub icon: String,
}

impl NewCard {
    /// Create an issuing request for a plastic card with no icon
    ///
    /// # Arguments
    ///
    /// * `holder_id` - Owner of the new card
    /// * `number` - Card number to register
    /// * `balance` - Opening balance in minor units
    pub fn plastic(holder_id: HolderId, number: impl Into<String>, balance: Amount) -> Self {
        NewCard {
            holder_id,
            kind: CardKind::Plastic,
            issuer: "visa".to_string(),
            balance,
            currency: "RUB".to_string(),
            number: number.into(),
            icon: String::new(),
        }
    }

    /// Attach the ledger-assigned identifier
    pub fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            holder_id: self.holder_id,
            kind: self.kind,
            issuer: self.issuer,
            balance: self.balance,
            currency: self.currency,
            number: self.number,
            icon: self.icon,
        }
    }
}
