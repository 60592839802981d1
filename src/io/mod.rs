//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, money formatting, output serialization)
//! - `sync_reader` - Streaming CSV reader of transaction history with iterator interface

pub mod csv_format;
pub mod sync_reader;

pub use csv_format::{
    convert_csv_record, format_amount, parse_amount, write_category_totals_csv,
    write_spending_csv, write_transactions_csv, CsvTransaction,
};
pub use sync_reader::TransactionReader;
