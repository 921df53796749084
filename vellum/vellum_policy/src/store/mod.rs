//! ACL storage.
//!
//! The authorization engine reads model ACLs, record authors, and token
//! secrets through the [`AclStore`] trait. Storage engines implement it; this
//! crate ships an in-memory implementation.

mod in_memory;

pub use in_memory::{InMemoryStore, ModelDocument, RecordDocument};

use std::sync::Arc;

use vellum_core::{ModelId, Principal, RecordId, StoreError, TokenId};

use crate::model::ResourceAcl;

/// Read interface the authorization engine depends on.
///
/// All three operations are plain reads. No snapshot spans two calls: an ACL
/// and an author list read during one decision may come from different
/// points in time. Backends that need a consistent view should provide it
/// below this trait.
pub trait AclStore: Send + Sync {
    /// Get the ACL of a model.
    ///
    /// # Errors
    ///
    /// * `StoreError::ModelNotFound` - If the model does not exist.
    fn get_acl(&self, model_id: &ModelId) -> Result<ResourceAcl, StoreError>;

    /// Get every principal that ever wrote a record.
    ///
    /// # Errors
    ///
    /// * `StoreError::RecordNotFound` - If the record does not exist.
    fn get_record_authors(
        &self,
        model_id: &ModelId,
        record_id: &RecordId,
    ) -> Result<Vec<Principal>, StoreError>;

    /// Get the secret registered for a token.
    ///
    /// # Errors
    ///
    /// * `StoreError::TokenNotFound` - If the token does not exist.
    fn get_token_secret(&self, token_id: &TokenId) -> Result<String, StoreError>;
}

impl<S: AclStore + ?Sized> AclStore for Arc<S> {
    fn get_acl(&self, model_id: &ModelId) -> Result<ResourceAcl, StoreError> {
        (**self).get_acl(model_id)
    }

    fn get_record_authors(
        &self,
        model_id: &ModelId,
        record_id: &RecordId,
    ) -> Result<Vec<Principal>, StoreError> {
        (**self).get_record_authors(model_id, record_id)
    }

    fn get_token_secret(&self, token_id: &TokenId) -> Result<String, StoreError> {
        (**self).get_token_secret(token_id)
    }
}
