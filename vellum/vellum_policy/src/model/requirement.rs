//! Permission requirement trees.
//!
//! A requirement says which leaf permissions a caller must hold for an
//! action. Requirements nest: `ALL` and `ANY` combine child requirements,
//! which are themselves leaves or combinators.
//!
//! ```
//! use vellum_core::Permission;
//! use vellum_policy::model::{EffectivePermissions, Requirement};
//!
//! let requirement = Requirement::all([
//!     Requirement::leaf(Permission::CreateRecord),
//!     Requirement::any([Permission::UpdateMyRecord, Permission::UpdateAllRecords]),
//! ]);
//!
//! let held: EffectivePermissions =
//!     [Permission::CreateRecord, Permission::UpdateAllRecords].into_iter().collect();
//! assert!(requirement.matches(&held));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use vellum_core::Permission;

use crate::model::EffectivePermissions;

/// A boolean tree over leaf permissions.
///
/// Requirements are built once, when the action table is constructed, and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Holds iff the permission is in the effective set.
    Leaf(Permission),

    /// Holds iff every child holds. An empty list holds.
    All(Vec<Requirement>),

    /// Holds iff at least one child holds. An empty list does not hold.
    Any(Vec<Requirement>),
}

impl Requirement {
    /// A single-permission requirement.
    pub fn leaf(permission: Permission) -> Self {
        Self::Leaf(permission)
    }

    /// Conjunction of the given children.
    pub fn all<I, R>(children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Requirement>,
    {
        Self::All(children.into_iter().map(Into::into).collect())
    }

    /// Disjunction of the given children.
    pub fn any<I, R>(children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Requirement>,
    {
        Self::Any(children.into_iter().map(Into::into).collect())
    }

    /// Evaluate this requirement against an effective permission set.
    pub fn matches(&self, held: &EffectivePermissions) -> bool {
        match self {
            Self::Leaf(permission) => held.contains(*permission),
            Self::All(children) => children.iter().all(|child| child.matches(held)),
            Self::Any(children) => children.iter().any(|child| child.matches(held)),
        }
    }

    /// Every leaf permission mentioned anywhere in the tree.
    pub fn permissions(&self) -> BTreeSet<Permission> {
        let mut found = BTreeSet::new();
        self.collect_permissions(&mut found);
        found
    }

    fn collect_permissions(&self, found: &mut BTreeSet<Permission>) {
        match self {
            Self::Leaf(permission) => {
                found.insert(*permission);
            }
            Self::All(children) | Self::Any(children) => {
                for child in children {
                    child.collect_permissions(found);
                }
            }
        }
    }
}

impl From<Permission> for Requirement {
    fn from(permission: Permission) -> Self {
        Self::Leaf(permission)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, children) = match self {
            Self::Leaf(permission) => return write!(f, "{permission}"),
            Self::All(children) => ("ALL", children),
            Self::Any(children) => ("ANY", children),
        };

        write!(f, "{label}[")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, "]")
    }
}
