//! Actions.
//!
//! An action is what a caller asks to do. Each action has a descriptive
//! identifier (`replace-record`) and the short view name used by the HTTP
//! layer (`put_record`); both parse.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// An action a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Create a new model with a generated ID.
    CreateModel,

    /// Read a model's definition and ACL.
    ReadModel,

    /// Create or replace a model at a given ID.
    ReplaceModel,

    /// Delete a model and its records.
    DeleteModel,

    /// Read a model's definition only.
    ReadDefinition,

    /// Create a record with a generated ID.
    CreateRecord,

    /// List all records of a model.
    ListRecords,

    /// Delete all records of a model.
    DeleteRecords,

    /// Read one record.
    ReadRecord,

    /// Create or replace one record.
    ReplaceRecord,

    /// Partially update one record.
    PatchRecord,

    /// Delete one record.
    DeleteRecord,
}

impl Action {
    /// Every action.
    pub const ALL: [Action; 12] = [
        Self::CreateModel,
        Self::ReadModel,
        Self::ReplaceModel,
        Self::DeleteModel,
        Self::ReadDefinition,
        Self::CreateRecord,
        Self::ListRecords,
        Self::DeleteRecords,
        Self::ReadRecord,
        Self::ReplaceRecord,
        Self::PatchRecord,
        Self::DeleteRecord,
    ];

    /// Get the descriptive identifier of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateModel => "create-model",
            Self::ReadModel => "read-model",
            Self::ReplaceModel => "replace-model",
            Self::DeleteModel => "delete-model",
            Self::ReadDefinition => "read-definition",
            Self::CreateRecord => "create-record",
            Self::ListRecords => "list-records",
            Self::DeleteRecords => "delete-records",
            Self::ReadRecord => "read-record",
            Self::ReplaceRecord => "replace-record",
            Self::PatchRecord => "patch-record",
            Self::DeleteRecord => "delete-record",
        }
    }

    /// Get the HTTP view name of this action.
    pub fn view_name(&self) -> &'static str {
        match self {
            Self::CreateModel => "post_model",
            Self::ReadModel => "get_model",
            Self::ReplaceModel => "put_model",
            Self::DeleteModel => "delete_model",
            Self::ReadDefinition => "get_definition",
            Self::CreateRecord => "post_record",
            Self::ListRecords => "get_records",
            Self::DeleteRecords => "delete_records",
            Self::ReadRecord => "get_record",
            Self::ReplaceRecord => "put_record",
            Self::PatchRecord => "patch_record",
            Self::DeleteRecord => "delete_record",
        }
    }
}

impl FromStr for Action {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s || action.view_name() == s)
            .ok_or_else(|| PolicyError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
