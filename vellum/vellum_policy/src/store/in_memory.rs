//! In-memory store.
//!
//! This module provides an in-memory implementation of the ACL store, along
//! with the model, record, and token writes the document store performs.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use vellum_core::{ModelId, Principal, RecordId, StoreError, TokenId};

use super::AclStore;
use crate::model::ResourceAcl;

/// A stored model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// The record schema. Opaque to the authorization layer.
    pub definition: Value,

    /// Who may do what to the model and its records.
    pub acls: ResourceAcl,
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    /// The record body.
    pub record: Value,

    /// Every principal that ever wrote the record.
    pub authors: Vec<Principal>,
}

/// An in-memory store.
///
/// Clones share the same underlying maps. Writes to a model's records hold
/// that model's map entry, so they cannot interleave with the model being
/// replaced or deleted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// Models, indexed by ID.
    models: Arc<DashMap<ModelId, ModelDocument>>,

    /// Records, indexed by model and record ID.
    records: Arc<DashMap<(ModelId, RecordId), RecordDocument>>,

    /// Token secrets, indexed by token ID.
    tokens: Arc<DashMap<TokenId, String>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a model.
    ///
    /// A fresh ID is generated when `model_id` is `None`. Replacing a model
    /// drops all of its records.
    pub fn put_model(
        &self,
        definition: Value,
        acls: ResourceAcl,
        model_id: Option<ModelId>,
    ) -> ModelId {
        let model_id = model_id.unwrap_or_default();

        let slot = self
            .models
            .entry(model_id.clone())
            .insert(ModelDocument { definition, acls });
        self.records.retain(|(owner, _), _| owner != &model_id);
        drop(slot);

        log::debug!("Stored model {model_id}");
        model_id
    }

    /// Get a model.
    pub fn get_model(&self, model_id: &ModelId) -> Result<ModelDocument, StoreError> {
        self.models
            .get(model_id)
            .map(|doc| doc.value().clone())
            .ok_or_else(|| StoreError::ModelNotFound(model_id.clone()))
    }

    /// Get a model's definition.
    pub fn get_model_definition(&self, model_id: &ModelId) -> Result<Value, StoreError> {
        Ok(self.get_model(model_id)?.definition)
    }

    /// Delete a model together with its records.
    pub fn delete_model(&self, model_id: &ModelId) -> Result<ModelDocument, StoreError> {
        let Entry::Occupied(slot) = self.models.entry(model_id.clone()) else {
            return Err(StoreError::ModelNotFound(model_id.clone()));
        };
        self.records.retain(|(owner, _), _| owner != model_id);
        let (_, doc) = slot.remove_entry();

        log::debug!("Deleted model {model_id}");
        Ok(doc)
    }

    /// Create or update a record.
    ///
    /// A fresh ID is generated when `record_id` is `None`. When the record
    /// already exists its body is replaced and `authors` is unioned into the
    /// stored author list, which is never pruned.
    pub fn put_record(
        &self,
        model_id: &ModelId,
        record: Value,
        authors: Vec<Principal>,
        record_id: Option<RecordId>,
    ) -> Result<RecordId, StoreError> {
        // Held until the record is written
        let Some(_model) = self.models.get(model_id) else {
            return Err(StoreError::ModelNotFound(model_id.clone()));
        };

        let record_id = record_id.unwrap_or_default();
        match self.records.entry((model_id.clone(), record_id.clone())) {
            Entry::Occupied(mut entry) => {
                let doc = entry.get_mut();
                doc.record = record;
                for author in authors {
                    if !doc.authors.contains(&author) {
                        doc.authors.push(author);
                    }
                }
            }
            Entry::Vacant(entry) => {
                let mut unique: Vec<Principal> = Vec::with_capacity(authors.len());
                for author in authors {
                    if !unique.contains(&author) {
                        unique.push(author);
                    }
                }
                entry.insert(RecordDocument {
                    record,
                    authors: unique,
                });
            }
        }

        Ok(record_id)
    }

    /// Get a record body.
    pub fn get_record(&self, model_id: &ModelId, record_id: &RecordId) -> Result<Value, StoreError> {
        self.get_record_document(model_id, record_id)
            .map(|doc| doc.record)
    }

    /// Get every record of a model.
    pub fn get_records(&self, model_id: &ModelId) -> Result<Vec<(RecordId, Value)>, StoreError> {
        if !self.models.contains_key(model_id) {
            return Err(StoreError::ModelNotFound(model_id.clone()));
        }

        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| &entry.key().0 == model_id)
            .map(|entry| (entry.key().1.clone(), entry.value().record.clone()))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(records)
    }

    /// Delete one record.
    pub fn delete_record(
        &self,
        model_id: &ModelId,
        record_id: &RecordId,
    ) -> Result<RecordDocument, StoreError> {
        self.records
            .remove(&(model_id.clone(), record_id.clone()))
            .map(|(_, doc)| doc)
            .ok_or_else(|| StoreError::RecordNotFound {
                model_id: model_id.clone(),
                record_id: record_id.clone(),
            })
    }

    /// Delete every record of a model, returning how many were removed.
    pub fn delete_records(&self, model_id: &ModelId) -> Result<usize, StoreError> {
        if !self.models.contains_key(model_id) {
            return Err(StoreError::ModelNotFound(model_id.clone()));
        }

        let before = self.records.len();
        self.records.retain(|(owner, _), _| owner != model_id);
        Ok(before.saturating_sub(self.records.len()))
    }

    /// Register a token and its secret.
    pub fn add_token(&self, token_id: TokenId, secret: impl Into<String>) -> Result<(), StoreError> {
        match self.tokens.entry(token_id) {
            Entry::Occupied(entry) => Err(StoreError::TokenAlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(secret.into());
                Ok(())
            }
        }
    }

    /// Revoke a token. The next request presenting it is anonymous.
    pub fn remove_token(&self, token_id: &TokenId) -> Result<(), StoreError> {
        if self.tokens.remove(token_id).is_none() {
            return Err(StoreError::TokenNotFound(token_id.clone()));
        }

        log::debug!("Revoked token {token_id}");
        Ok(())
    }

    fn get_record_document(
        &self,
        model_id: &ModelId,
        record_id: &RecordId,
    ) -> Result<RecordDocument, StoreError> {
        self.records
            .get(&(model_id.clone(), record_id.clone()))
            .map(|doc| doc.value().clone())
            .ok_or_else(|| StoreError::RecordNotFound {
                model_id: model_id.clone(),
                record_id: record_id.clone(),
            })
    }
}

impl AclStore for InMemoryStore {
    fn get_acl(&self, model_id: &ModelId) -> Result<ResourceAcl, StoreError> {
        Ok(self.get_model(model_id)?.acls)
    }

    fn get_record_authors(
        &self,
        model_id: &ModelId,
        record_id: &RecordId,
    ) -> Result<Vec<Principal>, StoreError> {
        Ok(self.get_record_document(model_id, record_id)?.authors)
    }

    fn get_token_secret(&self, token_id: &TokenId) -> Result<String, StoreError> {
        self.tokens
            .get(token_id)
            .map(|secret| secret.value().clone())
            .ok_or_else(|| StoreError::TokenNotFound(token_id.clone()))
    }
}
