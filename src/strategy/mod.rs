//! Aggregation strategy module
//!
//! This module defines the Strategy pattern for per-category spending
//! aggregation. Every strategy computes the same mapping as the sequential
//! baseline in [`crate::core::aggregation::categorize`]; they differ only in
//! how the history is split across threads and how partial results meet.
//! The concrete strategy is selected at runtime through [`create_strategy`].

use crate::cli::StrategyType;
use crate::core::CategoryTable;
use crate::types::{CategoryTotals, Transaction};
use std::sync::Arc;

pub mod channel;
pub mod sequential;
pub mod shared;

pub use channel::MessagePassingStrategy;
pub use sequential::SequentialStrategy;
pub use shared::SharedAccumulatorStrategy;

/// Aggregation strategy trait for per-category spending
///
/// Implementations must be safe to share across threads and must return
/// exactly what the sequential baseline returns for the same input,
/// regardless of `workers`.
pub trait AggregationStrategy: Send + Sync {
    /// Sum the spending of `source` per category label
    ///
    /// # Arguments
    ///
    /// * `transactions` - History snapshot to aggregate
    /// * `source` - Card number whose outgoing transactions are counted
    /// * `workers` - Number of chunks processed concurrently; 0 is treated as 1
    ///   and values above the history length are capped to it
    ///
    /// # Returns
    ///
    /// Label → summed total. Empty when no transaction matches `source`.
    fn categorize(&self, transactions: &[Transaction], source: &str, workers: usize)
        -> CategoryTotals;
}

/// Create an aggregation strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Which implementation to build
/// * `table` - Category table shared by all workers
///
/// # Returns
///
/// A boxed trait object implementing the AggregationStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    table: Arc<CategoryTable>,
) -> Box<dyn AggregationStrategy> {
    match strategy_type {
        StrategyType::Sequential => Box::new(SequentialStrategy::new(table)),
        StrategyType::Shared => Box::new(SharedAccumulatorStrategy::new(table)),
        StrategyType::Channel => Box::new(MessagePassingStrategy::new(table)),
    }
}
