//! # Operation ID Tracking
//!
//! Correlation identifiers for multi-step operations such as cascade deletions.
//! Every log line emitted inside an operation's span carries the same id.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::str::FromStr;

/// An operation ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(String);

impl OperationId {
    /// Generate a new random operation ID.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Get the operation ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for OperationId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl FromStr for OperationId {
    type Err = String;

    /// Accept an externally supplied id (e.g. forwarded from a caller).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if (20 ..= 32).contains(&s.len()) &&
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Self(s.to_string()))
        }
        else {
            Err("Invalid operation ID format".to_string())
        }
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_id_uniqueness() {
        let a = OperationId::new();
        let b = OperationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_operation_id_from_str() {
        let raw = "k192v2g4w3zq8h6j5k1abc";
        let id: OperationId = raw.parse().unwrap();
        assert_eq!(id.as_str(), raw);
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_operation_id_from_str_invalid() {
        assert!("short".parse::<OperationId>().is_err());
        assert!("invalid!@#invalid!@#invalid".parse::<OperationId>().is_err());
    }
}
