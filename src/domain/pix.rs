use crate::error::LedgerError;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// A pix key: a globally unique alias string addressing exactly one account.
///
/// Validated at construction so an empty alias cannot enter the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PixKey(String);

impl PixKey {
    pub fn new(raw: &str) -> Result<Self, LedgerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidAlias);
        }
        Ok(Self(trimmed.to_string()))
    }

    // Adapters rebuild keys from rows that were validated on insert.
    #[cfg(feature = "storage-rocksdb")]
    pub(crate) fn from_trusted(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PixKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PixKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(PixKey::new(""), Err(LedgerError::InvalidAlias)));
        assert!(matches!(PixKey::new("   "), Err(LedgerError::InvalidAlias)));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let key = PixKey::new("  alice@pay ").unwrap();
        assert_eq!(key.as_str(), "alice@pay");
    }

    #[test]
    fn test_accepts_any_non_empty_string() {
        assert!(PixKey::new("+55 11 91234-5678").is_ok());
        assert!(PixKey::new("alice@pay").is_ok());
    }
}
