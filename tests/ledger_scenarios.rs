//! Integration tests across the ledger, transfer engine and aggregation
//!
//! These tests wire the public components together the way an embedding
//! application would: issue cards, move money, then analyse the history.

use bank_ledger::cli::StrategyType;
use bank_ledger::core::aggregation;
use bank_ledger::core::card_number;
use bank_ledger::{
    create_strategy, Amount, CardLedger, CategoryTable, CommissionPolicy, CommissionRule,
    LedgerError, NewCard, PrefixRouting, Transaction, TransactionStore, TransferEngine,
};
use rstest::{fixture, rstest};
use std::sync::Arc;

const ISSUER: &str = "5106 21";
const CARD_A: &str = "5106 2107 0000 0000";
const CARD_B: &str = "5106 2105 0000 0002";
const OUTER: &str = "4561 2612 1234 5467";
const STRATEGIES: [StrategyType; 3] = [
    StrategyType::Sequential,
    StrategyType::Shared,
    StrategyType::Channel,
];

#[fixture]
fn engine() -> TransferEngine {
    let ledger = Arc::new(CardLedger::new());
    ledger.issue(NewCard::plastic(1, CARD_A, 1000_00)).unwrap();
    ledger.issue(NewCard::plastic(2, CARD_B, 1000_00)).unwrap();

    let inner = CommissionRule::new(50, 10_00);
    let outer = CommissionRule::new(150, 30_00);
    TransferEngine::new(
        ledger,
        Arc::new(TransactionStore::new()),
        CommissionPolicy::from_rules(inner, inner, outer),
        PrefixRouting::new(ISSUER),
    )
}

fn spending(from: &str, code: &str, total: Amount, id: u64) -> Transaction {
    Transaction {
        id,
        from: from.to_string(),
        to: OUTER.to_string(),
        amount: total,
        total,
        timestamp: 1_611_837_340 + id as i64,
        category_code: code.to_string(),
    }
}

#[rstest]
fn test_transfer_then_rank(engine: TransferEngine) {
    assert_eq!(engine.transfer(CARD_A, CARD_B, 500_00).unwrap(), 510_00);
    assert_eq!(engine.transfer(CARD_A, OUTER, 100_00).unwrap(), 110_00);

    let top = engine.store().top(CARD_A, 5);

    let totals: Vec<Amount> = top.iter().map(|tx| tx.total).collect();
    assert_eq!(totals, vec![510_00, 110_00]);
    assert_eq!(engine.ledger().balance(CARD_A), Some(1000_00 - 620_00));
    assert_eq!(aggregation::sum(&top), 620_00);
}

#[rstest]
fn test_failed_transfer_records_nothing(engine: TransferEngine) {
    let err = engine.transfer(CARD_A, CARD_B, 1000_00).unwrap_err();

    assert_eq!(err.reported_total(), 1010_00);
    assert!(matches!(err, LedgerError::NotEnoughMoney { .. }));
    assert!(engine.store().is_empty());
}

#[rstest]
fn test_peer_transfers_are_uncategorized(engine: TransferEngine) {
    engine.transfer(CARD_A, CARD_B, 100_00).unwrap();
    engine.transfer(CARD_A, CARD_B, 200_00).unwrap();

    let history = engine.store().snapshot();
    let table = Arc::new(CategoryTable::standard());

    for strategy_type in STRATEGIES {
        let strategy = create_strategy(strategy_type, Arc::clone(&table));
        let totals = strategy.categorize(&history, CARD_A, 2);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Uncategorized"], 110_00 + 210_00);
    }
}

#[test]
fn test_generated_numbers_route_to_issuer() {
    let ledger = CardLedger::new();
    for sequence in 1..=20 {
        let number = card_number::generate(ISSUER, sequence).unwrap();
        assert!(card_number::is_valid(&number));
        ledger.issue(NewCard::plastic(sequence, number, 0)).unwrap();
    }
    assert_eq!(ledger.len(), 20);
}

#[test]
fn test_large_history_strategies_agree() {
    let codes = ["5411", "5533", "5812", "5912", "0000"];
    let mut history = Vec::new();
    for i in 0..1000u64 {
        let code = codes[i as usize % codes.len()];
        history.push(spending(CARD_A, code, (i as Amount + 1) * 10, i));
        history.push(spending(CARD_B, code, 7, i + 1000));
    }
    let table = Arc::new(CategoryTable::standard());
    let baseline = aggregation::categorize(&table, &history, CARD_A);

    assert_eq!(baseline.len(), 5);
    for strategy_type in STRATEGIES {
        let strategy = create_strategy(strategy_type, Arc::clone(&table));
        for workers in [1, 7, 1000] {
            assert_eq!(
                strategy.categorize(&history, CARD_A, workers),
                baseline,
                "strategy {:?} with {} workers",
                strategy_type,
                workers
            );
        }
    }
}

#[test]
fn test_every_worker_count_matches_baseline() {
    let codes = ["5411", "9999", "", "5812"];
    let history: Vec<Transaction> = (0..24u64)
        .map(|i| {
            let from = if i % 4 == 0 { CARD_B } else { CARD_A };
            spending(from, codes[i as usize % codes.len()], i as Amount * 3 + 1, i)
        })
        .collect();
    let table = Arc::new(CategoryTable::standard());
    let baseline = aggregation::categorize(&table, &history, CARD_A);

    for strategy_type in STRATEGIES {
        let strategy = create_strategy(strategy_type, Arc::clone(&table));
        for workers in 1..=history.len() {
            assert_eq!(
                strategy.categorize(&history, CARD_A, workers),
                baseline,
                "strategy {:?} with {} workers",
                strategy_type,
                workers
            );
        }
    }
}
