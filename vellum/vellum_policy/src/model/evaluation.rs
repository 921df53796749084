//! Authorization decision model.
//!
//! This module defines the effective permission set computed for a single
//! decision and the record describing how the decision was reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use vellum_core::{Action, Permission, Resource};

/// The leaf permissions a caller holds on one resource, for one decision.
///
/// Computed fresh for every decision and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivePermissions {
    permissions: BTreeSet<Permission>,
}

impl EffectivePermissions {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Check if a permission is held.
    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Drop the `*_my_record` permissions.
    pub fn remove_author_scoped(&mut self) {
        self.permissions.retain(|p| !p.is_author_scoped());
    }

    /// Iterate in permission order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    /// Number of held permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl Extend<Permission> for EffectivePermissions {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.permissions.extend(iter);
    }
}

impl FromIterator<Permission> for EffectivePermissions {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for EffectivePermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, permission) in self.permissions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{permission}")?;
        }
        write!(f, "}}")
    }
}

/// How a decision was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The effective set satisfied the action's requirement.
    Allowed,

    /// The effective set did not satisfy the action's requirement.
    Denied,

    /// No model existed yet. Only model-creation capability was consulted.
    CreatorShortCircuit {
        /// Whether the caller may create models.
        allowed: bool,
    },

    /// The store failed with something other than "not found". Denied.
    StoreUnavailable(String),
}

impl Outcome {
    /// Whether the action is permitted.
    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            Self::Allowed | Self::CreatorShortCircuit { allowed: true }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "Allowed"),
            Self::Denied => write!(f, "Denied"),
            Self::CreatorShortCircuit { allowed: true } => {
                write!(f, "Allowed (model creator)")
            }
            Self::CreatorShortCircuit { allowed: false } => {
                write!(f, "Denied (not a model creator)")
            }
            Self::StoreUnavailable(reason) => write!(f, "Denied (store unavailable: {reason})"),
        }
    }
}

/// The record of one authorization decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// The requested action.
    pub action: Action,

    /// The targeted resource.
    pub resource: Resource,

    /// The permissions the caller was found to hold.
    pub effective: EffectivePermissions,

    /// The decision.
    pub outcome: Outcome,

    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
}

impl Evaluation {
    /// Create a new decision record.
    pub fn new(
        action: Action,
        resource: Resource,
        effective: EffectivePermissions,
        outcome: Outcome,
    ) -> Self {
        Self {
            action,
            resource,
            effective,
            outcome,
            timestamp: Utc::now(),
        }
    }

    /// Whether the action is permitted.
    pub fn is_allowed(&self) -> bool {
        self.outcome.is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::ModelId;

    #[test]
    fn test_remove_author_scoped() {
        let mut effective: EffectivePermissions = [
            Permission::ReadMyRecord,
            Permission::UpdateMyRecord,
            Permission::DeleteMyRecord,
            Permission::ReadAllRecords,
        ]
        .into_iter()
        .collect();

        effective.remove_author_scoped();
        assert_eq!(
            effective.iter().collect::<Vec<_>>(),
            vec![Permission::ReadAllRecords]
        );

        // Narrowing twice changes nothing
        let once = effective.clone();
        effective.remove_author_scoped();
        assert_eq!(effective, once);
    }

    #[test]
    fn test_effective_display() {
        let effective: EffectivePermissions = [Permission::CreateRecord, Permission::CreateModel]
            .into_iter()
            .collect();
        assert_eq!(effective.to_string(), "{create_model, create_record}");
        assert_eq!(EffectivePermissions::new().to_string(), "{}");
    }

    #[test]
    fn test_outcome_is_allowed() {
        assert!(Outcome::Allowed.is_allowed());
        assert!(Outcome::CreatorShortCircuit { allowed: true }.is_allowed());
        assert!(!Outcome::CreatorShortCircuit { allowed: false }.is_allowed());
        assert!(!Outcome::Denied.is_allowed());
        assert!(!Outcome::StoreUnavailable("timeout".to_string()).is_allowed());
    }

    #[test]
    fn test_evaluation_new() {
        let resource = Resource::model(ModelId::from_string("todo").unwrap());
        let evaluation = Evaluation::new(
            Action::ReadDefinition,
            resource.clone(),
            [Permission::ReadDefinition].into_iter().collect(),
            Outcome::Allowed,
        );

        assert_eq!(evaluation.action, Action::ReadDefinition);
        assert_eq!(evaluation.resource, resource);
        assert!(evaluation.is_allowed());
        assert!(evaluation.timestamp <= Utc::now());
    }

    #[test]
    fn test_evaluation_serialization() {
        let evaluation = Evaluation::new(
            Action::DeleteRecord,
            Resource::new_model(),
            EffectivePermissions::new(),
            Outcome::Denied,
        );
        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["action"], "delete-record");
        assert_eq!(json["outcome"], "Denied");
        assert_eq!(json["effective"], serde_json::json!([]));
    }
}
