//! Strongly-typed identifiers for Vellum.
//!
//! Model, record, and token identifiers are opaque strings. Each identifier
//! type is a thin wrapper around a `String` with a phantom type parameter so
//! that a record ID can never be passed where a model ID is expected.
//!
//! Identifiers starting with [`RESERVED_PREFIX`] are rejected. That namespace
//! belongs to the pseudo-principals (see [`crate::types::Principal`]), so a
//! real token can never collide with `Anyone` or `Authenticated`.
//!
//! # Examples
//!
//! ```
//! use vellum_core::id::{ModelId, TokenId};
//! use std::str::FromStr;
//!
//! // Create new random IDs
//! let model_id = ModelId::new();
//! assert_eq!(model_id.as_str().len(), 32);
//!
//! // Create from string
//! let token_id = TokenId::from_str("alice").unwrap();
//! assert_eq!(token_id.to_string(), "alice");
//!
//! // The pseudo-principal namespace is reserved
//! assert!(TokenId::from_str("system.Everyone").is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Prefix reserved for pseudo-principals.
pub const RESERVED_PREFIX: &str = "system.";

/// A type-safe opaque identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier (a hyphen-less UUID v4).
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4().simple().to_string(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Create an identifier from an existing string.
    ///
    /// Fails if the string is empty or starts with [`RESERVED_PREFIX`].
    pub fn from_string(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();

        if value.is_empty() {
            return Err(Error::InvalidIdentifier("identifier is empty".to_string()));
        }
        if value.starts_with(RESERVED_PREFIX) {
            return Err(Error::InvalidIdentifier(format!(
                "{value:?} uses the reserved {RESERVED_PREFIX:?} prefix"
            )));
        }

        Ok(Self {
            value,
            _marker: std::marker::PhantomData,
        })
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_string(value).map_err(serde::de::Error::custom)
    }
}

/// Marker type for models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelMarker;
/// Identifier for a model.
pub type ModelId = Id<ModelMarker>;

/// Marker type for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordMarker;
/// Identifier for a record within a model.
pub type RecordId = Id<RecordMarker>;

/// Marker type for API tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenMarker;
/// Identifier for an API token.
pub type TokenId = Id<TokenMarker>;
