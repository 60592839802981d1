//! CSV format handling for transaction history and category totals
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvTransaction structure for deserialization
//! - Conversion from CSV records to transaction drafts
//! - Decimal money parsing and formatting
//! - Transaction and category total output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    Amount, CategoryTotals, LedgerError, Timestamp, Transaction, TransactionDraft, TransactionId,
};
use csv::Writer;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Column order of the history format
pub const TRANSACTION_HEADER: [&str; 7] =
    ["id", "from", "to", "amount", "total", "timestamp", "mcc"];

/// CSV record structure for deserialization
///
/// Matches the history format with columns: id, from, to, amount, total,
/// timestamp, mcc. The id is informational; the store assigns its own.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransaction {
    pub id: Option<TransactionId>,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub total: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub mcc: String,
}

/// Parse a decimal money string into minor units
///
/// Accepts non-negative values with at most two fractional digits, e.g.
/// `"100"`, `"100.5"`, `"100.50"`.
pub fn parse_amount(raw: &str) -> Result<Amount, LedgerError> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed).map_err(|_| LedgerError::invalid_amount(trimmed))?;

    if value.is_sign_negative() || value.scale() > 2 {
        return Err(LedgerError::invalid_amount(trimmed));
    }

    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| LedgerError::invalid_amount(trimmed))
}

/// Render minor units as a two-place decimal string
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", Decimal::new(amount, 2))
}

/// Convert a CsvTransaction to a TransactionDraft
///
/// # Returns
///
/// * `Ok(TransactionDraft)` - Successfully converted record
/// * `Err(LedgerError::InvalidAmount)` - An amount field is malformed
/// * `Err(LedgerError::ParseError)` - A card number field is empty
pub fn convert_csv_record(record: CsvTransaction) -> Result<TransactionDraft, LedgerError> {
    if record.from.is_empty() || record.to.is_empty() {
        return Err(LedgerError::ParseError {
            line: None,
            message: "Transaction requires both 'from' and 'to' card numbers".to_string(),
        });
    }

    Ok(TransactionDraft {
        amount: parse_amount(&record.amount)?,
        total: parse_amount(&record.total)?,
        from: record.from,
        to: record.to,
        timestamp: record.timestamp,
        category_code: record.mcc,
    })
}

fn write_error(error: csv::Error) -> LedgerError {
    LedgerError::IoError {
        message: error.to_string(),
    }
}

/// Write transactions to CSV in the history format
///
/// Rows are written in the order given; reading the output back yields the
/// same drafts.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(TRANSACTION_HEADER).map_err(write_error)?;

    for tx in transactions {
        writer
            .write_record([
                tx.id.to_string(),
                tx.from.clone(),
                tx.to.clone(),
                format_amount(tx.amount),
                format_amount(tx.total),
                tx.timestamp.to_string(),
                tx.category_code.clone(),
            ])
            .map_err(write_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write category totals to CSV
///
/// Writes `category,total` rows sorted by label for deterministic output.
pub fn write_category_totals_csv(
    totals: &CategoryTotals,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["category", "total"]).map_err(write_error)?;

    let mut sorted: Vec<(&String, &Amount)> = totals.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    for (label, total) in sorted {
        writer
            .write_record([label.as_str(), format_amount(*total).as_str()])
            .map_err(write_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a card's spending summary to CSV
///
/// Writes `metric,category,value` rows: `most_expensive` with the summed
/// total and `most_popular` with the transaction count. Absent metrics are
/// omitted.
pub fn write_spending_csv(
    most_expensive: Option<(String, Amount)>,
    most_popular: Option<(String, usize)>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["metric", "category", "value"])
        .map_err(write_error)?;

    if let Some((label, total)) = most_expensive {
        writer
            .write_record(["most_expensive", label.as_str(), format_amount(total).as_str()])
            .map_err(write_error)?;
    }
    if let Some((label, count)) = most_popular {
        writer
            .write_record(["most_popular", label.as_str(), count.to_string().as_str()])
            .map_err(write_error)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(amount: &str, total: &str, mcc: &str) -> CsvTransaction {
        CsvTransaction {
            id: Some(1),
            from: "5106 2107 0000 0000".to_string(),
            to: "4561 2612 1234 5467".to_string(),
            amount: amount.to_string(),
            total: total.to_string(),
            timestamp: 1_611_837_340,
            mcc: mcc.to_string(),
        }
    }

    #[rstest]
    #[case("100.00", 100_00)]
    #[case("100", 100_00)]
    #[case("100.5", 100_50)]
    #[case("  0.01  ", 1)]
    #[case("0", 0)]
    #[case("92233720368547758.07", Amount::MAX)]
    fn test_parse_amount_valid(#[case] raw: &str, #[case] expected: Amount) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case::three_places("100.001")]
    #[case::negative("-5.00")]
    #[case::not_a_number("abc")]
    #[case::empty("")]
    #[case::too_large("92233720368547758.08")]
    fn test_parse_amount_invalid(#[case] raw: &str) {
        let err = parse_amount(raw).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
    }

    #[rstest]
    #[case(100_00, "100.00")]
    #[case(1, "0.01")]
    #[case(0, "0.00")]
    #[case(1234_56, "1234.56")]
    fn test_format_amount(#[case] amount: Amount, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    #[test]
    fn test_convert_csv_record_valid() {
        let draft = convert_csv_record(record("500.00", "510.00", "5411")).unwrap();

        assert_eq!(draft.from, "5106 2107 0000 0000");
        assert_eq!(draft.to, "4561 2612 1234 5467");
        assert_eq!(draft.amount, 500_00);
        assert_eq!(draft.total, 510_00);
        assert_eq!(draft.timestamp, 1_611_837_340);
        assert_eq!(draft.category_code, "5411");
    }

    #[test]
    fn test_convert_csv_record_keeps_empty_mcc() {
        let draft = convert_csv_record(record("1.00", "1.00", "")).unwrap();
        assert_eq!(draft.category_code, "");
    }

    #[rstest]
    #[case::bad_amount(record("x", "1.00", ""), "Invalid amount")]
    #[case::bad_total(record("1.00", "1.001", ""), "Invalid amount")]
    #[case::missing_from(CsvTransaction { from: String::new(), ..record("1.00", "1.00", "") }, "requires both")]
    #[case::missing_to(CsvTransaction { to: String::new(), ..record("1.00", "1.00", "") }, "requires both")]
    fn test_convert_csv_record_errors(#[case] input: CsvTransaction, #[case] expected_error: &str) {
        let err = convert_csv_record(input).unwrap_err();
        assert!(err.to_string().contains(expected_error), "got: {}", err);
    }

    #[test]
    fn test_write_transactions_csv() {
        let transactions = vec![Transaction {
            id: 7,
            from: "5106 2107 0000 0000".to_string(),
            to: "5106 2105 0000 0002".to_string(),
            amount: 500_00,
            total: 510_00,
            timestamp: 1_611_837_340,
            category_code: String::new(),
        }];
        let mut output = Vec::new();

        write_transactions_csv(&transactions, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,from,to,amount,total,timestamp,mcc\n\
             7,5106 2107 0000 0000,5106 2105 0000 0002,500.00,510.00,1611837340,\n"
        );
    }

    #[rstest]
    #[case::sorted_by_label(
        vec![("Supermarkets", 100_00), ("Restaurants", 12_50), ("Uncategorized", 1)],
        "category,total\nRestaurants,12.50\nSupermarkets,100.00\nUncategorized,0.01\n"
    )]
    #[case::empty(vec![], "category,total\n")]
    fn test_write_category_totals_csv(
        #[case] pairs: Vec<(&str, Amount)>,
        #[case] expected_output: &str,
    ) {
        let totals: CategoryTotals = pairs
            .into_iter()
            .map(|(label, sum)| (label.to_string(), sum))
            .collect();
        let mut output = Vec::new();

        write_category_totals_csv(&totals, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }

    #[rstest]
    #[case::both(
        Some(("Supermarkets".to_string(), 300_00)),
        Some(("Restaurants".to_string(), 4)),
        "metric,category,value\nmost_expensive,Supermarkets,300.00\nmost_popular,Restaurants,4\n"
    )]
    #[case::no_spending(None, None, "metric,category,value\n")]
    fn test_write_spending_csv(
        #[case] most_expensive: Option<(String, Amount)>,
        #[case] most_popular: Option<(String, usize)>,
        #[case] expected_output: &str,
    ) {
        let mut output = Vec::new();

        write_spending_csv(most_expensive, most_popular, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }
}
