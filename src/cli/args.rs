use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

/// Analyse a bank's transaction history
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Analyse card spending from a transaction history CSV", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sum a card's spending per merchant category
    Categorize(CategorizeArgs),
    /// List a card's most expensive transactions
    Top(TopArgs),
    /// Report the categories a card spends the most on and most often in
    Spending(SpendingArgs),
}

#[derive(Args, Debug)]
pub struct CategorizeArgs {
    /// Input CSV file path containing transaction history
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Card number whose outgoing transactions are aggregated
    #[arg(long = "card", value_name = "NUMBER")]
    pub card: String,

    /// Aggregation strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "shared",
        help = "Aggregation strategy: 'sequential', 'shared' (lock-protected accumulator) or 'channel' (message passing)"
    )]
    pub strategy: StrategyType,

    /// Number of worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

#[derive(Args, Debug)]
pub struct TopArgs {
    /// Input CSV file path containing transaction history
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Card number whose outgoing transactions are ranked
    #[arg(long = "card", value_name = "NUMBER")]
    pub card: String,

    /// Maximum number of transactions to print
    #[arg(long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct SpendingArgs {
    /// Input CSV file path containing transaction history
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Card number whose outgoing transactions are analysed
    #[arg(long = "card", value_name = "NUMBER")]
    pub card: String,
}

/// Available aggregation strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sequential,
    Shared,
    Channel,
}

impl CategorizeArgs {
    /// Resolve the worker count
    ///
    /// Falls back to the number of CPU cores when the option is absent, and
    /// with a warning when it is 0.
    pub fn worker_count(&self) -> usize {
        let default = num_cpus::get();
        match self.workers {
            None => default,
            Some(0) => {
                warn!("Invalid worker count (0), using default ({})", default);
                default
            }
            Some(workers) => workers,
        }
    }
}
