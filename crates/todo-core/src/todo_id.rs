use crate::error::IdError;
use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

/// Number of hex characters in an encoded identifier (12 bytes).
pub const TODO_ID_LENGTH: usize = 24;

/// A validated todo identifier.
///
/// Identifiers are 12-byte ObjectIds, the native key type of the document
/// store, and travel over HTTP as 24 hex characters. Parsing accepts either
/// letter case; the canonical rendering is lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Allocates a fresh identifier.
    ///
    /// ObjectIds lead with a big-endian timestamp followed by a process
    /// counter, so identifiers minted by one process sort in creation order.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses and validates an identifier taken from a request path.
    ///
    /// The checks run in order and each produces its own error: the input
    /// must be non-empty, exactly [`TODO_ID_LENGTH`] characters long, and
    /// valid hex.
    pub fn parse(raw: &str) -> std::result::Result<Self, IdError> {
        if raw.is_empty() {
            return Err(IdError::Missing);
        }

        if raw.len() != TODO_ID_LENGTH {
            return Err(IdError::InvalidLength(raw.len()));
        }

        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|e| IdError::Malformed(e.to_string()))
    }

    /// Returns the lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Returns the underlying ObjectId.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TodoId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl FromStr for TodoId {
    type Err = IdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

// JSON clients see plain hex strings, not the extended-JSON `{"$oid": ...}` form.
impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
