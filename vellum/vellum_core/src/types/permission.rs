//! Leaf permissions.
//!
//! Leaf permissions are the atomic units that ACLs grant and action
//! requirements demand. The enumeration is closed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// A leaf permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    /// Create new models. Held by configured model creators, never by an ACL.
    CreateModel,

    /// Read a model's definition.
    ReadDefinition,

    /// Read a model's ACL.
    ReadAcls,

    /// Replace a model's definition.
    UpdateDefinition,

    /// Replace a model's ACL.
    UpdateAcls,

    /// Delete a model and its records.
    DeleteModel,

    /// Create records.
    CreateRecord,

    /// Read every record of the model.
    ReadAllRecords,

    /// Update every record of the model.
    UpdateAllRecords,

    /// Delete every record of the model.
    DeleteAllRecords,

    /// Read records the caller authored.
    ReadMyRecord,

    /// Update records the caller authored.
    UpdateMyRecord,

    /// Delete records the caller authored.
    DeleteMyRecord,
}

impl Permission {
    /// The full leaf permission enumeration.
    pub const ALL: [Permission; 13] = [
        Self::CreateModel,
        Self::ReadDefinition,
        Self::ReadAcls,
        Self::UpdateDefinition,
        Self::UpdateAcls,
        Self::DeleteModel,
        Self::CreateRecord,
        Self::ReadAllRecords,
        Self::UpdateAllRecords,
        Self::DeleteAllRecords,
        Self::ReadMyRecord,
        Self::UpdateMyRecord,
        Self::DeleteMyRecord,
    ];

    /// Permissions a model ACL can grant.
    ///
    /// `CreateModel` is a process-wide capability and is not part of it.
    pub const MODEL_SCOPED: [Permission; 12] = [
        Self::ReadDefinition,
        Self::ReadAcls,
        Self::UpdateDefinition,
        Self::UpdateAcls,
        Self::DeleteModel,
        Self::CreateRecord,
        Self::ReadAllRecords,
        Self::UpdateAllRecords,
        Self::DeleteAllRecords,
        Self::ReadMyRecord,
        Self::UpdateMyRecord,
        Self::DeleteMyRecord,
    ];

    /// Permissions only honored for recorded authors of a record.
    pub const AUTHOR_SCOPED: [Permission; 3] = [
        Self::ReadMyRecord,
        Self::UpdateMyRecord,
        Self::DeleteMyRecord,
    ];

    /// Get the wire name of this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateModel => "create_model",
            Self::ReadDefinition => "read_definition",
            Self::ReadAcls => "read_acls",
            Self::UpdateDefinition => "update_definition",
            Self::UpdateAcls => "update_acls",
            Self::DeleteModel => "delete_model",
            Self::CreateRecord => "create_record",
            Self::ReadAllRecords => "read_all_records",
            Self::UpdateAllRecords => "update_all_records",
            Self::DeleteAllRecords => "delete_all_records",
            Self::ReadMyRecord => "read_my_record",
            Self::UpdateMyRecord => "update_my_record",
            Self::DeleteMyRecord => "delete_my_record",
        }
    }

    /// Check if this permission is restricted to record authors.
    pub fn is_author_scoped(&self) -> bool {
        matches!(
            self,
            Self::ReadMyRecord | Self::UpdateMyRecord | Self::DeleteMyRecord
        )
    }
}

impl FromStr for Permission {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownPermission(s.to_string()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
