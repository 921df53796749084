//! Error types for the Vellum document store.
//!
//! Errors are organized by subsystem. The root error type, `Error`, wraps
//! each subsystem-specific error so callers can handle everything uniformly
//! at the top level.
//!
//! The data-absence variants of `StoreError` (`ModelNotFound`,
//! `RecordNotFound`, `TokenNotFound`) are expected conditions on the
//! authorization path. The engine and the principal resolver interpret them
//! as narrower permission sets and never surface them to their callers.

use crate::id::{ModelId, RecordId, TokenId};
use crate::types::Action;
use thiserror::Error;

/// Result alias used throughout Vellum.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for Vellum.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authorization policy errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed identifiers
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Model with the given ID does not exist
    #[error("Model not found: {0}")]
    ModelNotFound(ModelId),

    /// Record does not exist under the given model
    #[error("Record not found: ({model_id}, {record_id})")]
    RecordNotFound {
        /// Model the record was looked up under
        model_id: ModelId,

        /// Record that was not found
        record_id: RecordId,
    },

    /// Token with the given ID does not exist
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    /// Token with the given ID is already registered
    #[error("Token already exists: {0}")]
    TokenAlreadyExists(TokenId),

    /// The backend could not answer (connection loss, corrupt document, ...)
    #[error("Backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error only says that the requested data is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound(_) | Self::RecordNotFound { .. } | Self::TokenNotFound(_)
        )
    }
}

/// Errors related to the authorization policy itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Action identifier is not part of the action table
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Permission name is not part of the leaf permission enumeration
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// The action table is missing entries
    #[error("Action table has no requirement for: {0:?}")]
    IncompleteTable(Vec<Action>),

    /// An ACL payload is unusable
    #[error("Invalid ACL: {0}")]
    InvalidAcl(String),
}

/// Errors raised while loading startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A principal name could not be mapped
    #[error("Invalid principal: {0:?}")]
    InvalidPrincipal(String),

    /// The configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Unknown log level name
    #[error("Invalid log level: {0:?}")]
    InvalidLogLevel(String),
}
