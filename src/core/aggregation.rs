//! Sequential aggregation over transaction history
//!
//! This module holds the building blocks every aggregation strategy shares:
//! the per-category baseline computation, the chunking of a history into
//! contiguous ranges, and the merge of partial results. The strategies in
//! [`crate::strategy`] only decide how chunks are scheduled and how partials
//! meet; the arithmetic lives here so every strategy computes the same thing.

use crate::core::category::CategoryTable;
use crate::types::{Amount, CategoryTotals, Timestamp, Transaction};
use chrono::{Datelike, TimeZone, Utc};
use std::collections::HashMap;
use std::ops::Range;
use std::thread;

/// Sum the spending of one card per category label
///
/// Transactions whose source is not `source` are ignored. Totals are first
/// grouped by category code and then folded into label buckets, so several
/// codes sharing a label (notably the fallback) add up.
///
/// # Returns
///
/// Label → summed `total`. Empty when no transaction matches.
pub fn categorize(
    table: &CategoryTable,
    transactions: &[Transaction],
    source: &str,
) -> CategoryTotals {
    let mut by_code: HashMap<&str, Amount> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.from == source) {
        let sum = by_code.entry(tx.category_code.as_str()).or_insert(0);
        *sum = sum.saturating_add(tx.total);
    }

    let mut by_label = CategoryTotals::new();
    for (code, sum) in by_code {
        let bucket = by_label.entry(table.label(code).to_string()).or_insert(0);
        *bucket = bucket.saturating_add(sum);
    }
    by_label
}

/// Fold `partial` into `target`, summing values that share a label
pub fn merge_into(target: &mut CategoryTotals, partial: CategoryTotals) {
    for (label, sum) in partial {
        let bucket = target.entry(label).or_insert(0);
        *bucket = bucket.saturating_add(sum);
    }
}

/// Split `len` items into `workers` contiguous ranges
///
/// Every range but the last has `len / workers` items; the last one absorbs
/// the remainder. When `workers` exceeds `len` the leading ranges are empty.
/// A worker count of 0 is treated as 1.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let size = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * size;
            let end = if i == workers - 1 { len } else { start + size };
            start..end
        })
        .collect()
}

/// Number of chunks actually worth a thread
///
/// Clamps `workers` to `[1, max(len, 1)]`: chunks beyond the input length
/// would be empty and contribute nothing.
pub fn worker_count(len: usize, workers: usize) -> usize {
    workers.clamp(1, len.max(1))
}

/// Category where `source` spent the most
///
/// Built on [`categorize`]; ties go to the alphabetically first label.
///
/// # Returns
///
/// `(label, summed total)`, or `None` when `source` has no spending.
pub fn most_expensive_spending(
    table: &CategoryTable,
    transactions: &[Transaction],
    source: &str,
) -> Option<(String, Amount)> {
    categorize(table, transactions, source)
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
}

/// Category `source` spent in most often
///
/// Ties go to the alphabetically first label.
///
/// # Returns
///
/// `(label, transaction count)`, or `None` when `source` has no spending.
pub fn most_popular_spending(
    table: &CategoryTable,
    transactions: &[Transaction],
    source: &str,
) -> Option<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.from == source) {
        *counts.entry(table.label(&tx.category_code)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(label, count)| (label.to_string(), count))
}

/// Sum of `total` over the given transactions
pub fn sum(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .fold(0, |acc: Amount, tx| acc.saturating_add(tx.total))
}

/// Transactions stamped within `[from, to)`
pub fn between(transactions: &[Transaction], from: Timestamp, to: Timestamp) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.timestamp >= from && tx.timestamp < to)
        .cloned()
        .collect()
}

/// First instant of the calendar month (UTC) following `ts`
fn next_month_start(ts: Timestamp) -> Option<Timestamp> {
    let date = Utc.timestamp_opt(ts, 0).single()?;
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .map(|start| start.timestamp())
}

/// Split `[from, to)` at calendar-month boundaries (UTC)
///
/// The first and last windows may be partial months. Empty when `from >= to`.
pub fn month_windows(from: Timestamp, to: Timestamp) -> Vec<Range<Timestamp>> {
    if from >= to {
        return Vec::new();
    }

    let mut bounds = vec![from];
    let mut next = next_month_start(from);
    while let Some(start) = next {
        if start >= to {
            break;
        }
        bounds.push(start);
        next = next_month_start(start);
    }
    bounds.push(to);

    bounds.windows(2).map(|pair| pair[0]..pair[1]).collect()
}

/// Per-month totals over `[from, to)`, computed concurrently
///
/// The month windows are spread over at most `workers` scoped threads; each
/// window is summed with [`between`] and [`sum`].
///
/// # Returns
///
/// One `(window, total)` pair per month, in chronological order.
pub fn monthly_sums(
    transactions: &[Transaction],
    from: Timestamp,
    to: Timestamp,
    workers: usize,
) -> Vec<(Range<Timestamp>, Amount)> {
    let windows = month_windows(from, to);
    let ranges = partition(windows.len(), worker_count(windows.len(), workers));

    thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let chunk = &windows[range];
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|window| {
                            let total = sum(&between(transactions, window.start, window.end));
                            (window.clone(), total)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
}

/// Total spent over `[from, to)`, summed month by month concurrently
pub fn period_sum(
    transactions: &[Transaction],
    from: Timestamp,
    to: Timestamp,
    workers: usize,
) -> Amount {
    monthly_sums(transactions, from, to, workers)
        .into_iter()
        .fold(0, |acc: Amount, (_, total)| acc.saturating_add(total))
}

/// Order transactions by `total`, largest first
///
/// The sort is stable: equal totals keep their relative order.
pub fn sort_by_total_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.total.cmp(&a.total));
}
