//! Fixture loading
//!
//! A fixture describes the models, records, and tokens a check runs
//! against. It is written in TOML, or JSON when the file ends in `.json`:
//!
//! ```toml
//! [[models]]
//! id = "todo"
//! definition = { title = "Todo list" }
//!
//! [models.acls]
//! read_definition = ["system.Everyone"]
//! create_record = ["system.Authenticated"]
//!
//! [[records]]
//! model = "todo"
//! id = "r1"
//! authors = ["alice"]
//!
//! [[tokens]]
//! id = "alice"
//! secret = "s3cret"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use vellum_core::{ModelId, Principal, RecordId, TokenId};
use vellum_policy::{InMemoryStore, ResourceAcl};

/// A model entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFixture {
    pub id: ModelId,

    #[serde(default)]
    pub definition: Value,

    #[serde(default)]
    pub acls: ResourceAcl,
}

/// A record entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordFixture {
    pub model: ModelId,

    pub id: RecordId,

    #[serde(default)]
    pub authors: Vec<Principal>,

    #[serde(default)]
    pub record: Value,
}

/// A token entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenFixture {
    pub id: TokenId,

    pub secret: String,
}

/// Contents of a fixture file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub models: Vec<ModelFixture>,

    #[serde(default)]
    pub records: Vec<RecordFixture>,

    #[serde(default)]
    pub tokens: Vec<TokenFixture>,
}

impl Fixture {
    /// Read a fixture file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let document = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let fixture = if is_json {
            serde_json::from_str(&document)
                .with_context(|| format!("Invalid JSON fixture {}", path.display()))?
        } else {
            toml::from_str(&document)
                .with_context(|| format!("Invalid TOML fixture {}", path.display()))?
        };

        Ok(fixture)
    }

    /// Populate an in-memory store.
    ///
    /// Records must reference a model listed in the same fixture.
    pub fn into_store(self) -> Result<InMemoryStore> {
        let store = InMemoryStore::new();

        for model in self.models {
            store.put_model(model.definition, model.acls, Some(model.id));
        }

        for record in self.records {
            let context = format!("Record {} of model {}", record.id, record.model);
            store
                .put_record(&record.model, record.record, record.authors, Some(record.id))
                .context(context)?;
        }

        for token in self.tokens {
            store.add_token(token.id, token.secret)?;
        }

        Ok(store)
    }
}
