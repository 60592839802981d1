//! Commission policy for card-to-card transfers
//!
//! A transfer's commission depends only on its shape: whether each side is a
//! card tracked by this bank ("inner") or not ("outer"). The policy holds one
//! injected function per shape; the crate defines no default fees.

use crate::types::Amount;
use std::fmt;

/// Classification of a transfer by the inner/outer status of its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferShape {
    /// Both cards are tracked by the ledger
    InnerToInner,

    /// Exactly one side is tracked (inner→outer and outer→inner alike)
    CrossBoundary,

    /// Neither side is tracked
    OuterToOuter,
}

impl TransferShape {
    /// Classify a transfer from the inner status of its source and destination
    pub fn classify(from_inner: bool, to_inner: bool) -> Self {
        match (from_inner, to_inner) {
            (true, true) => TransferShape::InnerToInner,
            (false, false) => TransferShape::OuterToOuter,
            _ => TransferShape::CrossBoundary,
        }
    }
}

/// Percentage fee with a floor, expressed in basis points
///
/// `CommissionRule::new(50, 10_00)` is "0.5%, at least 10.00".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionRule {
    /// Fee rate in hundredths of a percent
    pub basis_points: i64,

    /// Smallest fee charged, in minor units
    pub minimum: Amount,
}

impl CommissionRule {
    pub fn new(basis_points: i64, minimum: Amount) -> Self {
        CommissionRule {
            basis_points,
            minimum,
        }
    }

    /// Fee for `amount`: the percentage, rounded down, or the minimum
    pub fn evaluate(&self, amount: Amount) -> Amount {
        let percentage = amount.saturating_mul(self.basis_points) / 10_000;
        percentage.max(self.minimum)
    }
}

type CommissionFn = Box<dyn Fn(Amount) -> Amount + Send + Sync>;

/// Commission functions keyed by transfer shape
///
/// Built once from configuration and handed to the transfer engine.
pub struct CommissionPolicy {
    inner_to_inner: CommissionFn,
    cross_boundary: CommissionFn,
    outer_to_outer: CommissionFn,
}

impl CommissionPolicy {
    /// Create a policy from one function per transfer shape
    ///
    /// # Arguments
    ///
    /// * `inner_to_inner` - Fee when both cards belong to the ledger
    /// * `cross_boundary` - Fee when exactly one card belongs to the ledger
    /// * `outer_to_outer` - Fee when neither card belongs to the ledger
    pub fn new<I, C, O>(inner_to_inner: I, cross_boundary: C, outer_to_outer: O) -> Self
    where
        I: Fn(Amount) -> Amount + Send + Sync + 'static,
        C: Fn(Amount) -> Amount + Send + Sync + 'static,
        O: Fn(Amount) -> Amount + Send + Sync + 'static,
    {
        CommissionPolicy {
            inner_to_inner: Box::new(inner_to_inner),
            cross_boundary: Box::new(cross_boundary),
            outer_to_outer: Box::new(outer_to_outer),
        }
    }

    /// Create a policy from three percentage-with-floor rules
    pub fn from_rules(
        inner_to_inner: CommissionRule,
        cross_boundary: CommissionRule,
        outer_to_outer: CommissionRule,
    ) -> Self {
        Self::new(
            move |amount| inner_to_inner.evaluate(amount),
            move |amount| cross_boundary.evaluate(amount),
            move |amount| outer_to_outer.evaluate(amount),
        )
    }

    /// Commission for `amount` under the given shape
    ///
    /// Negative results from an injected function are treated as zero.
    pub fn commission(&self, amount: Amount, shape: TransferShape) -> Amount {
        let evaluate = match shape {
            TransferShape::InnerToInner => &self.inner_to_inner,
            TransferShape::CrossBoundary => &self.cross_boundary,
            TransferShape::OuterToOuter => &self.outer_to_outer,
        };
        evaluate(amount).max(0)
    }
}

impl fmt::Debug for CommissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommissionPolicy").finish_non_exhaustive()
    }
}
