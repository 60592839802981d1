//! Prefix-based issuer routing

use crate::core::traits::IssuerRouting;

/// Check whether `number` starts with the issuer `prefix`
///
/// Spaces are ignored on both sides, so `"5106 21"` matches
/// `"5106 2107 0000 0000"` as well as `"5106210700000000"`.
pub fn belongs_to_issuer(number: &str, prefix: &str) -> bool {
    let mut number = number.chars().filter(|c| *c != ' ');
    prefix
        .chars()
        .filter(|c| *c != ' ')
        .all(|p| number.next() == Some(p))
}

/// Routes card numbers to this bank by issuer prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRouting {
    prefix: String,
}

impl PrefixRouting {
    /// Create routing for the given issuer prefix (e.g. `"5106 21"`)
    pub fn new(prefix: impl Into<String>) -> Self {
        PrefixRouting {
            prefix: prefix.into(),
        }
    }

    /// The configured issuer prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl IssuerRouting for PrefixRouting {
    fn belongs_to_issuer(&self, number: &str) -> bool {
        belongs_to_issuer(number, &self.prefix)
    }
}
