//! Streaming CSV reader of transaction history
//!
//! Provides an iterator over transaction drafts read from a CSV file in the
//! history format. Delegates format concerns to the csv_format module.
//!
//! # Design
//!
//! The TransactionReader wraps a `csv::Reader` and deserializes one row at a
//! time, so memory use does not grow with the file. Every yielded error carries
//! the line it came from; the caller decides whether to skip it.
//!
//! ```no_run
//! use bank_ledger::io::TransactionReader;
//! use std::path::Path;
//!
//! let reader = TransactionReader::open(Path::new("history.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(draft) => println!("{} -> {}", draft.from, draft.to),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_csv_record, CsvTransaction};
use crate::types::{LedgerError, TransactionDraft};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Iterator over the rows of a history file
#[derive(Debug)]
pub struct TransactionReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl TransactionReader {
    /// Open a history file for streaming
    ///
    /// Fields are trimmed and rows may omit trailing columns (an absent `mcc`
    /// reads as empty).
    ///
    /// # Returns
    ///
    /// * `Ok(TransactionReader)` if the file opened
    /// * `Err(LedgerError::IoError)` if it could not be opened
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for TransactionReader {
    type Item = Result<TransactionDraft, LedgerError>;

    /// Read the next row
    ///
    /// Deserialization and conversion failures are reported as
    /// `LedgerError::ParseError` with the row's line number, header included.
    fn next(&mut self) -> Option<Self::Item> {
        let row = self.reader.deserialize::<CsvTransaction>().next()?;
        self.line_num += 1;
        let line = Some(self.line_num);

        Some(
            row.map_err(|e| LedgerError::ParseError {
                line,
                message: e.to_string(),
            })
            .and_then(|record| {
                convert_csv_record(record).map_err(|e| LedgerError::ParseError {
                    line,
                    message: e.to_string(),
                })
            }),
        )
    }
}
