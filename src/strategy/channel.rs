//! Message-passing aggregation strategy
//!
//! Worker threads never touch shared mutable state. Each one computes the
//! partial mapping of its chunk and sends it over a `tokio::sync::mpsc`
//! channel; a single collector thread receives exactly one partial per worker
//! and folds them into the result. There are never more workers than
//! transactions.
//!
//! # Architecture
//!
//! ```text
//! chunk 0 ── worker ──┐
//! chunk 1 ── worker ──┼── mpsc ──> collector ──> CategoryTotals
//! chunk N ── worker ──┘
//! ```
//!
//! The channel is used through its blocking API from plain scoped threads, so
//! no async runtime is involved.

use crate::core::aggregation::{self, merge_into, partition, worker_count};
use crate::core::CategoryTable;
use crate::strategy::AggregationStrategy;
use crate::types::{CategoryTotals, Transaction};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

/// Aggregation through per-worker partials sent to one collector
#[derive(Debug, Clone)]
pub struct MessagePassingStrategy {
    table: Arc<CategoryTable>,
}

impl MessagePassingStrategy {
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }
}

impl AggregationStrategy for MessagePassingStrategy {
    fn categorize(
        &self,
        transactions: &[Transaction],
        source: &str,
        workers: usize,
    ) -> CategoryTotals {
        let ranges = partition(transactions.len(), worker_count(transactions.len(), workers));
        let expected = ranges.len();
        let (tx, mut rx) = mpsc::channel::<CategoryTotals>(expected);
        let table = self.table.as_ref();

        thread::scope(|scope| {
            let collector = scope.spawn(move || {
                let mut totals = CategoryTotals::new();
                for _ in 0..expected {
                    // None means every sender is gone early, i.e. a worker panicked
                    match rx.blocking_recv() {
                        Some(partial) => merge_into(&mut totals, partial),
                        None => break,
                    }
                }
                totals
            });

            let handles: Vec<_> = ranges
                .into_iter()
                .map(|range| {
                    let chunk = &transactions[range];
                    let tx = tx.clone();
                    scope.spawn(move || {
                        let partial = aggregation::categorize(table, chunk, source);
                        // Fails only if the collector panicked; the join below reports it
                        let _ = tx.blocking_send(partial);
                    })
                })
                .collect();
            drop(tx);

            for handle in handles {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            }
            collector
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::{history, OTHER, SOURCE};
    use rstest::rstest;

    #[rstest]
    #[case::single_worker(1)]
    #[case::uneven_chunks(7)]
    #[case::one_per_item(40)]
    #[case::more_workers_than_items(100)]
    #[case::zero_workers(0)]
    fn test_matches_baseline(#[case] workers: usize) {
        let table = Arc::new(CategoryTable::standard());
        let transactions = history(40);
        let strategy = MessagePassingStrategy::new(Arc::clone(&table));

        assert_eq!(
            strategy.categorize(&transactions, SOURCE, workers),
            aggregation::categorize(&table, &transactions, SOURCE)
        );
    }

    #[test]
    fn test_empty_history() {
        let strategy = MessagePassingStrategy::new(Arc::new(CategoryTable::standard()));
        assert!(strategy.categorize(&[], SOURCE, 4).is_empty());
    }

    #[test]
    fn test_other_source_is_isolated() {
        let table = Arc::new(CategoryTable::standard());
        let transactions = history(40);
        let strategy = MessagePassingStrategy::new(Arc::clone(&table));

        let mine = strategy.categorize(&transactions, SOURCE, 3);
        let theirs = strategy.categorize(&transactions, OTHER, 3);

        assert_eq!(mine, aggregation::categorize(&table, &transactions, SOURCE));
        assert_eq!(theirs, aggregation::categorize(&table, &transactions, OTHER));
        assert_ne!(mine, theirs);
    }

    #[test]
    fn test_huge_worker_count_on_short_history() {
        let table = Arc::new(CategoryTable::standard());
        let transactions = history(3);
        let strategy = MessagePassingStrategy::new(Arc::clone(&table));

        assert_eq!(
            strategy.categorize(&transactions, SOURCE, 100_000),
            aggregation::categorize(&table, &transactions, SOURCE)
        );
    }
}
