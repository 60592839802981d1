// CLI module
// Command-line interface, argument parsing and command execution

mod args;

pub use args::{CategorizeArgs, CliArgs, Command, SpendingArgs, StrategyType, TopArgs};

use crate::core::{CategoryTable, TransactionStore};
use crate::io::{
    write_category_totals_csv, write_spending_csv, write_transactions_csv, TransactionReader,
};
use crate::strategy::create_strategy;
use crate::types::LedgerError;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// `--help`), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Replay a history file into a transaction store
///
/// Malformed rows are logged and skipped. Ids are re-assigned in file order.
///
/// # Returns
///
/// * `Ok(count)` - Number of rows appended
/// * `Err(LedgerError::IoError)` - The file could not be opened
pub fn load_history(path: &Path, store: &TransactionStore) -> Result<usize, LedgerError> {
    let mut loaded = 0;
    let mut skipped = 0;

    for row in TransactionReader::open(path)? {
        match row {
            Ok(draft) => {
                store.append(draft);
                loaded += 1;
            }
            Err(e) => {
                warn!("Skipping row: {}", e);
                skipped += 1;
            }
        }
    }

    debug!(loaded, skipped, path = %path.display(), "history loaded");
    Ok(loaded)
}

/// Execute a parsed command, writing its CSV result to `output`
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let store = TransactionStore::new();

    match &args.command {
        Command::Categorize(categorize) => {
            load_history(&categorize.input_file, &store)?;
            let workers = categorize.worker_count();
            let table = Arc::new(CategoryTable::standard());
            let strategy = create_strategy(categorize.strategy, table);
            debug!(strategy = ?categorize.strategy, workers, "categorizing");

            let totals = strategy.categorize(&store.snapshot(), &categorize.card, workers);
            write_category_totals_csv(&totals, output)
        }
        Command::Top(top) => {
            load_history(&top.input_file, &store)?;
            let spending = store.top(&top.card, top.limit);
            write_transactions_csv(&spending, output)
        }
        Command::Spending(spending) => {
            load_history(&spending.input_file, &store)?;
            let table = CategoryTable::standard();
            write_spending_csv(
                store.most_expensive_spending(&table, &spending.card),
                store.most_popular_spending(&table, &spending.card),
                output,
            )
        }
    }
}
