//! Core traits at the seams of the ledger
//!
//! This module defines the trait abstractions that let the transfer engine
//! stay unaware of how a bank decides which card numbers it owns.

/// Decides whether a card number was issued by this bank
///
/// The transfer engine uses this to tell "our card, but missing from the
/// ledger" (an error) apart from "another bank's card" (an outer side).
/// Implementations range from plain prefix matching to BIN-range tables.
pub trait IssuerRouting: Send + Sync {
    /// Check if `number` belongs to this bank's issuer range
    fn belongs_to_issuer(&self, number: &str) -> bool;
}
