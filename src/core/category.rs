//! Merchant category classification
//!
//! Maps merchant-category codes to human-readable labels. The table is built
//! once and shared read-only; unknown codes fall back to a fixed label.

use std::collections::HashMap;

/// Label returned for codes absent from the standard table
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Immutable code → label lookup with a fallback label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    labels: HashMap<String, String>,
    fallback: String,
}

impl CategoryTable {
    /// Create a table from `(code, label)` pairs and a fallback label
    pub fn new<I, C, L>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        CategoryTable {
            labels: entries
                .into_iter()
                .map(|(code, label)| (code.into(), label.into()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    /// The bank's standard categories
    pub fn standard() -> Self {
        Self::new(
            [
                ("0000", "Transfer"),
                ("5411", "Supermarkets"),
                ("5533", "Auto services"),
                ("5812", "Restaurants"),
                ("5912", "Pharmacies"),
            ],
            UNCATEGORIZED,
        )
    }

    /// Label for `code`, or the fallback label for unknown codes
    pub fn label(&self, code: &str) -> &str {
        self.labels
            .get(code)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}
