//! Sequential aggregation strategy
//!
//! Runs the baseline computation on the calling thread. The worker count is
//! accepted for interface compatibility and ignored.

use crate::core::aggregation;
use crate::core::CategoryTable;
use crate::strategy::AggregationStrategy;
use crate::types::{CategoryTotals, Transaction};
use std::sync::Arc;

/// Single-threaded aggregation strategy
#[derive(Debug, Clone)]
pub struct SequentialStrategy {
    table: Arc<CategoryTable>,
}

impl SequentialStrategy {
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }
}

impl AggregationStrategy for SequentialStrategy {
    fn categorize(
        &self,
        transactions: &[Transaction],
        source: &str,
        _workers: usize,
    ) -> CategoryTotals {
        aggregation::categorize(&self.table, transactions, source)
    }
}
