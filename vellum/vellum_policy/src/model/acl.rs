//! Resource access-control lists.
//!
//! A model's ACL maps each leaf permission to the principals holding it.
//! Serialized, it is a JSON object from permission name to a list of
//! principal names:
//!
//! ```json
//! {"create_record": ["system.Authenticated"], "read_all_records": ["alice"]}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use vellum_core::{Permission, PolicyError, Principal, Principals};

/// Permission to principal-list mapping for one model.
///
/// Only membership matters. The lists keep insertion order for stable
/// serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceAcl {
    grants: BTreeMap<Permission, Vec<Principal>>,
}

impl ResourceAcl {
    /// An ACL that grants nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ACL of a freshly created model: the creator holds every
    /// model-scoped permission.
    pub fn for_creator(creator: Principal) -> Self {
        let mut acl = Self::new();
        acl.grant_all(creator, Permission::MODEL_SCOPED);
        acl
    }

    /// Build an ACL from an explicit administrators list.
    ///
    /// Every administrator holds every model-scoped permission. The list must
    /// not be empty, otherwise nobody could ever administer the model.
    pub fn from_admins<I>(admins: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = Principal>,
    {
        let mut acl = Self::new();
        let mut count = 0;
        for admin in admins {
            acl.grant_all(admin, Permission::MODEL_SCOPED);
            count += 1;
        }

        if count == 0 {
            return Err(PolicyError::InvalidAcl(
                "at least one administrator is required".to_string(),
            ));
        }
        Ok(acl)
    }

    /// Grant a permission to a principal.
    ///
    /// Returns `false` if the principal already held it.
    pub fn grant(&mut self, permission: Permission, principal: Principal) -> bool {
        let holders = self.grants.entry(permission).or_default();
        if holders.contains(&principal) {
            return false;
        }
        holders.push(principal);
        true
    }

    /// Grant several permissions to a principal, on top of existing grants.
    pub fn grant_all<I>(&mut self, principal: Principal, permissions: I) -> &mut Self
    where
        I: IntoIterator<Item = Permission>,
    {
        for permission in permissions {
            self.grant(permission, principal.clone());
        }
        self
    }

    /// Builder form of [`ResourceAcl::grant`].
    pub fn with_grant(mut self, permission: Permission, principal: Principal) -> Self {
        self.grant(permission, principal);
        self
    }

    /// Withdraw a permission from a principal.
    ///
    /// Returns `false` if the principal did not hold it.
    pub fn revoke(&mut self, permission: Permission, principal: &Principal) -> bool {
        let Some(holders) = self.grants.get_mut(&permission) else {
            return false;
        };

        let before = holders.len();
        holders.retain(|p| p != principal);
        let removed = holders.len() != before;

        if holders.is_empty() {
            self.grants.remove(&permission);
        }
        removed
    }

    /// Principals holding a permission.
    pub fn holders(&self, permission: Permission) -> &[Principal] {
        self.grants
            .get(&permission)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Permissions granted to at least one of the caller's principals.
    pub fn permissions_for<'a>(
        &'a self,
        principals: &'a Principals,
    ) -> impl Iterator<Item = Permission> + 'a {
        self.grants
            .iter()
            .filter(|(_, holders)| principals.intersects(holders.iter()))
            .map(|(permission, _)| *permission)
    }

    /// Check if the ACL grants nothing.
    pub fn is_empty(&self) -> bool {
        self.grants.values().all(Vec::is_empty)
    }
}

impl FromIterator<(Permission, Vec<Principal>)> for ResourceAcl {
    fn from_iter<I: IntoIterator<Item = (Permission, Vec<Principal>)>>(iter: I) -> Self {
        let mut acl = Self::new();
        for (permission, holders) in iter {
            acl.grants.entry(permission).or_default().extend(holders);
        }
        acl
    }
}
