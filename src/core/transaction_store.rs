//! Append-only transaction history
//!
//! This module provides the TransactionStore component that keeps every
//! recorded transaction in creation order. Transfers append to it; analysis
//! reads consistent snapshots of it.
//!
//! # Concurrency
//!
//! The history sits behind a read/write lock. Appends take the write lock, so
//! id assignment and insertion happen together: ids are never duplicated or
//! skipped. Snapshots take the read lock and therefore observe each
//! transaction either completely or not at all.

use crate::core::aggregation::{self, sort_by_total_desc};
use crate::core::category::CategoryTable;
use crate::types::{Amount, Transaction, TransactionDraft};
use chrono::Utc;
use parking_lot::RwLock;

/// Ordered, append-only store of transactions
#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction stamped with the current time
    ///
    /// # Arguments
    ///
    /// * `from` - Source card number
    /// * `to` - Destination card number
    /// * `amount` - Requested amount
    /// * `total` - Amount plus commission
    /// * `category_code` - Merchant category code, empty for peer transfers
    ///
    /// # Returns
    ///
    /// A copy of the stored transaction, including its assigned id
    pub fn add(
        &self,
        from: &str,
        to: &str,
        amount: Amount,
        total: Amount,
        category_code: &str,
    ) -> Transaction {
        self.append(TransactionDraft {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            total,
            timestamp: Utc::now().timestamp(),
            category_code: category_code.to_string(),
        })
    }

    /// Record a prepared transaction, keeping its timestamp
    ///
    /// Used by importers replaying a history.
    pub fn append(&self, draft: TransactionDraft) -> Transaction {
        let mut transactions = self.transactions.write();
        let id = transactions.last().map_or(1, |last| last.id + 1);
        let transaction = draft.into_transaction(id);
        transactions.push(transaction.clone());
        transaction
    }

    /// Copy of the history in creation order
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.read().clone()
    }

    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }

    /// The largest individual transactions of one card
    ///
    /// Returns up to `limit` transactions whose source is `source`, ordered by
    /// total, largest first. Ties keep creation order.
    pub fn top(&self, source: &str, limit: usize) -> Vec<Transaction> {
        let mut spending: Vec<Transaction> = self
            .transactions
            .read()
            .iter()
            .filter(|tx| tx.from == source)
            .cloned()
            .collect();
        sort_by_total_desc(&mut spending);
        spending.truncate(limit);
        spending
    }

    /// Category where `source` spent the most, with the summed total
    pub fn most_expensive_spending(
        &self,
        table: &CategoryTable,
        source: &str,
    ) -> Option<(String, Amount)> {
        aggregation::most_expensive_spending(table, &self.transactions.read(), source)
    }

    /// Category `source` spent in most often, with the transaction count
    pub fn most_popular_spending(
        &self,
        table: &CategoryTable,
        source: &str,
    ) -> Option<(String, usize)> {
        aggregation::most_popular_spending(table, &self.transactions.read(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    fn draft(from: &str, total: Amount) -> TransactionDraft {
        TransactionDraft {
            from: from.to_string(),
            to: "5106 2105 0000 0002".to_string(),
            amount: total,
            total,
            timestamp: 1_611_837_340,
            category_code: "5411".to_string(),
        }
    }

    #[test]
    fn test_add_to_empty_store() {
        let store = TransactionStore::new();

        let tx = store.add("4561 2612 1234 5464", "2612 4561 1234 5464", 100_00, 100_00, "2222");

        assert_eq!(tx.id, 1);
        assert_eq!(tx.amount, 100_00);
        assert_eq!(tx.category_code, "2222");
        assert!(tx.timestamp > 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_to_store_with_one_transaction() {
        let store = TransactionStore::new();
        store.add("4561 2612 1234 5464", "2612 4561 1234 5464", 100_00, 100_00, "0000");

        let tx = store.add("4561 2612 1234 5464", "2612 4561 1234 5464", 100_00, 100_00, "2222");

        assert_eq!(tx.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_append_keeps_draft_timestamp() {
        let store = TransactionStore::new();

        let tx = store.append(draft("A", 10));

        assert_eq!(tx.timestamp, 1_611_837_340);
        assert_eq!(store.snapshot(), vec![tx]);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_appends() {
        let store = TransactionStore::new();
        store.append(draft("A", 10));

        let snapshot = store.snapshot();
        store.append(draft("A", 20));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_store() {
        let store = TransactionStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_appends_assign_unique_sequential_ids() {
        let store = TransactionStore::new();

        thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..125 {
                        store.append(draft("A", worker * 1000 + i));
                    }
                });
            }
            // Readers racing the writers only ever see complete prefixes
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = store.snapshot();
                    for (index, tx) in snapshot.iter().enumerate() {
                        assert_eq!(tx.id, index as u64 + 1);
                    }
                }
            });
        });

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1000);
        let ids: Vec<u64> = snapshot.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, (1..=1000).collect::<Vec<_>>());
        let totals: HashSet<Amount> = snapshot.iter().map(|tx| tx.total).collect();
        assert_eq!(totals.len(), 1000);
    }

    #[test]
    fn test_top_orders_by_total_descending() {
        let store = TransactionStore::new();
        store.append(draft("A", 100_00));
        store.append(draft("A", 300_00));
        store.append(draft("B", 900_00));
        store.append(draft("A", 200_00));

        let top = store.top("A", 2);

        let totals: Vec<Amount> = top.iter().map(|tx| tx.total).collect();
        assert_eq!(totals, vec![300_00, 200_00]);
        assert!(top.iter().all(|tx| tx.from == "A"));
    }

    #[test]
    fn test_top_keeps_creation_order_on_ties() {
        let store = TransactionStore::new();
        store.append(draft("A", 100));
        store.append(draft("A", 100));
        store.append(draft("A", 100));

        let ids: Vec<u64> = store.top("A", 10).iter().map(|tx| tx.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    fn categorized(from: &str, code: &str, total: Amount) -> TransactionDraft {
        TransactionDraft {
            category_code: code.to_string(),
            ..draft(from, total)
        }
    }

    #[test]
    fn test_most_expensive_spending_sums_per_category() {
        let store = TransactionStore::new();
        store.append(categorized("X", "5411", 100_00));
        store.append(categorized("X", "5411", 100_00));
        store.append(categorized("X", "5411", 100_00));
        store.append(categorized("X", "5812", 250_00));
        store.append(categorized("Y", "5812", 900_00));

        let table = CategoryTable::standard();

        assert_eq!(
            store.most_expensive_spending(&table, "X"),
            Some(("Supermarkets".to_string(), 300_00))
        );
        // The single largest transaction is still available separately
        assert_eq!(store.top("X", 1)[0].total, 250_00);
    }

    #[test]
    fn test_most_popular_spending_counts_per_category() {
        let store = TransactionStore::new();
        store.append(categorized("X", "5812", 10_00));
        store.append(categorized("X", "5812", 10_00));
        store.append(categorized("X", "5411", 500_00));

        let table = CategoryTable::standard();

        assert_eq!(
            store.most_popular_spending(&table, "X"),
            Some(("Restaurants".to_string(), 2))
        );
        assert_eq!(store.most_popular_spending(&table, "Z"), None);
    }
}
