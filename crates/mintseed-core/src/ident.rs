//! Ledger and request identifiers.
//!
//! Addresses are opaque identifiers assigned by the ledger; this crate only
//! validates that they are well-formed enough to appear in an intent. The
//! `IntentId` is a client-side logical request identifier attached to every
//! mutating intent so a retry can be reconciled against the ledger's record
//! of the original submission.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Maximum accepted length for a ledger address.
const MAX_ADDRESS_LEN: usize = 64;

/// Maximum accepted length for a display symbol.
const MAX_SYMBOL_LEN: usize = 10;

/// Opaque ledger identifier (mint address, account address, market address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Validate and wrap a ledger address.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidAddress` if the value is empty, too long,
    /// or contains characters outside the ledger's identifier alphabet.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(CoreError::InvalidAddress("empty".to_string()));
        }
        if value.len() > MAX_ADDRESS_LEN {
            return Err(CoreError::InvalidAddress(format!(
                "length {} exceeds {MAX_ADDRESS_LEN}",
                value.len()
            )));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidAddress(format!(
                "non-alphanumeric character in '{value}'"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display symbol for a launched asset (not ledger-enforced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Validate and wrap a display symbol.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidSymbol` if the value is empty, longer than
    /// ten characters, or not ASCII alphanumeric.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(CoreError::InvalidSymbol("empty".to_string()));
        }
        if value.len() > MAX_SYMBOL_LEN {
            return Err(CoreError::InvalidSymbol(format!(
                "length {} exceeds {MAX_SYMBOL_LEN}",
                value.len()
            )));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidSymbol(format!(
                "non-alphanumeric character in '{value}'"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-side logical request identifier.
///
/// Attached to every mutating intent. Monotone enough for log correlation
/// and unique enough for ledger-side reconciliation after a timeout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(String);

impl IntentId {
    /// Create a new unique intent ID.
    ///
    /// Format: `seed_{timestamp_ms}_{uuid_short}`
    pub fn new() -> Self {
        let ts = chrono::Utc::now().timestamp_millis();
        let uuid_short = &Uuid::new_v4().to_string()[..8];
        Self(format!("seed_{ts}_{uuid_short}"))
    }

    /// Create from an existing string (for parsing responses).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accepts_base58_and_hex_forms() {
        assert!(Address::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").is_ok());
        assert!(Address::new("a1b2c3d4e5f60718293a4b5c6d7e8f90").is_ok());
    }

    #[test]
    fn address_rejects_empty_and_oversized() {
        assert!(Address::new("").is_err());
        assert!(Address::new("x".repeat(65)).is_err());
    }

    #[test]
    fn address_rejects_punctuation() {
        assert!(Address::new("abc/def").is_err());
        assert!(Address::new("abc def").is_err());
    }

    #[test]
    fn symbol_enforces_length_convention() {
        assert!(Symbol::new("EXT").is_ok());
        assert!(Symbol::new("ABCDEFGHIJ").is_ok());
        assert!(Symbol::new("ABCDEFGHIJK").is_err());
        assert!(Symbol::new("").is_err());
    }

    #[test]
    fn intent_ids_are_unique() {
        let a = IntentId::new();
        let b = IntentId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("seed_"));
    }
}
