//! Store-native document identity using ULIDs
//!
//! Every stored document carries an `_id` assigned at insert time. It is
//! never shown to the user and never used as a lookup key; `part_id` is.
//! ULIDs sort by creation time, which gives collections a stable
//! insertion order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// A store-native document key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(Ulid);

impl DocumentId {
    /// Create a fresh DocumentId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Create a DocumentId that sorts strictly after `previous`
    ///
    /// Two ids minted in the same millisecond are random relative to each
    /// other, so when a fresh id would not sort after the newest existing
    /// one we bump the newest instead.
    pub fn after(previous: Option<DocumentId>) -> Self {
        let fresh = Ulid::new();
        match previous {
            Some(DocumentId(prev)) if fresh <= prev => {
                Self(prev.increment().unwrap_or(fresh))
            }
            _ => Self(fresh),
        }
    }

    /// Parse a DocumentId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| IdParseError::InvalidUlid(s.to_string(), e.to_string()))
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing document IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_generation() {
        let id = DocumentId::new();
        assert_eq!(id.to_string().len(), 26);
    }

    #[test]
    fn test_document_id_parsing() {
        let original = DocumentId::new();
        let parsed = DocumentId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_document_id_invalid_ulid() {
        let err = DocumentId::parse("notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_after_sorts_strictly_later() {
        let mut last = None;
        for _ in 0..200 {
            let id = DocumentId::after(last);
            if let Some(prev) = last {
                assert!(id > prev);
            }
            last = Some(id);
        }
    }

    #[test]
    fn test_after_bumps_future_id() {
        // An id from the far future still gets a successor
        let future = DocumentId(Ulid::from_parts(u64::MAX >> 16, 0));
        let next = DocumentId::after(Some(future));
        assert!(next > future);
    }
}
