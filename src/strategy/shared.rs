//! Shared-accumulator aggregation strategy
//!
//! Splits the history into contiguous chunks, one scoped thread per chunk,
//! with no more chunks than transactions.
//! Each thread computes its partial mapping without holding any lock and then
//! folds it into a single accumulator guarded by a `parking_lot::Mutex`.
//!
//! # Thread Safety
//!
//! The lock is held only for the merge, never for the scan. All threads are
//! joined before `categorize` returns; a panic in any of them is resumed on the
//! calling thread.

use crate::core::aggregation::{self, merge_into, partition, worker_count};
use crate::core::CategoryTable;
use crate::strategy::AggregationStrategy;
use crate::types::{CategoryTotals, Transaction};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

/// Aggregation through one lock-protected accumulator
#[derive(Debug, Clone)]
pub struct SharedAccumulatorStrategy {
    table: Arc<CategoryTable>,
}

impl SharedAccumulatorStrategy {
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }
}

impl AggregationStrategy for SharedAccumulatorStrategy {
    fn categorize(
        &self,
        transactions: &[Transaction],
        source: &str,
        workers: usize,
    ) -> CategoryTotals {
        let accumulator = Mutex::new(CategoryTotals::new());
        let table = self.table.as_ref();
        let ranges = partition(transactions.len(), worker_count(transactions.len(), workers));

        thread::scope(|scope| {
            let handles: Vec<_> = ranges
                .into_iter()
                .map(|range| {
                    let chunk = &transactions[range];
                    let accumulator = &accumulator;
                    scope.spawn(move || {
                        let partial = aggregation::categorize(table, chunk, source);
                        merge_into(&mut accumulator.lock(), partial);
                    })
                })
                .collect();

            for handle in handles {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            }
        });

        accumulator.into_inner()
    }
}
