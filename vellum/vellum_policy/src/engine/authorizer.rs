//! The authorization decision function.
//!
//! This module provides the engine that decides whether a caller may perform
//! an action on a model or record.

use std::collections::HashSet;

use vellum_core::{
    Action, AuthorizationConfig, ModelId, Permission, PolicyError, Principal, Principals,
    RecordId, Resource, StoreError,
};

use crate::engine::ActionTable;
use crate::model::{EffectivePermissions, Evaluation, Outcome, ResourceAcl};
use crate::store::AclStore;

/// Authorization engine.
///
/// The engine holds no per-request state and caches nothing: every decision
/// reads the current ACL and author list from the store. It is safe to share
/// between threads.
pub struct Authorizer<S> {
    /// The store ACLs and authors are read from.
    store: S,

    /// Principals that may create new models.
    model_creators: HashSet<Principal>,

    /// Requirement for each action.
    table: ActionTable,
}

impl<S> Authorizer<S>
where
    S: AclStore,
{
    /// Create an engine using the standard action table.
    pub fn new(store: S, model_creators: HashSet<Principal>) -> Self {
        Self {
            store,
            model_creators,
            table: ActionTable::standard(),
        }
    }

    /// Create an engine with a custom action table.
    ///
    /// # Errors
    ///
    /// * `PolicyError::IncompleteTable` - If some action has no requirement.
    pub fn with_table(
        store: S,
        model_creators: HashSet<Principal>,
        table: ActionTable,
    ) -> Result<Self, PolicyError> {
        table.validate()?;
        Ok(Self {
            store,
            model_creators,
            table,
        })
    }

    /// Create an engine from startup configuration.
    pub fn from_config(store: S, config: &AuthorizationConfig) -> vellum_core::Result<Self> {
        let model_creators = config.model_creator_principals()?;
        Ok(Self::new(store, model_creators))
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check if any of the caller's principals may create models.
    pub fn can_create_model(&self, principals: &Principals) -> bool {
        principals.intersects(&self.model_creators)
    }

    /// Decide whether the caller may perform the action on the resource.
    pub fn permits(&self, action: Action, resource: &Resource, principals: &Principals) -> bool {
        self.evaluate(action, resource, principals).is_allowed()
    }

    /// Decide, and report how the decision was reached.
    pub fn evaluate(
        &self,
        action: Action,
        resource: &Resource,
        principals: &Principals,
    ) -> Evaluation {
        let can_create_model = self.can_create_model(principals);

        // Creating a model: nothing to look up
        let Some(model_id) = &resource.model_id else {
            return self.short_circuit(action, resource, can_create_model);
        };

        let acl = match self.store.get_acl(model_id) {
            Ok(acl) => Some(acl),
            // Replacing a model that does not exist yet is a creation
            Err(StoreError::ModelNotFound(_)) if action == Action::ReplaceModel => {
                return self.short_circuit(action, resource, can_create_model);
            }
            Err(StoreError::ModelNotFound(_)) => None,
            Err(err) => return self.unavailable(action, resource, err),
        };

        let effective = match self.narrowed_permissions(
            model_id,
            resource.record_id.as_ref(),
            acl.as_ref(),
            can_create_model,
            principals,
        ) {
            Ok(effective) => effective,
            Err(err) => return self.unavailable(action, resource, err),
        };

        let outcome = match self.table.requirement_for(action) {
            Ok(requirement) if requirement.matches(&effective) => Outcome::Allowed,
            Ok(_) => Outcome::Denied,
            Err(err) => {
                // Unreachable for tables built through `new`/`with_table`
                log::error!("Denying {action}: {err}");
                Outcome::Denied
            }
        };

        log::debug!(
            "{action} on {resource} by {principals}: effective {effective} -> {outcome}"
        );
        Evaluation::new(action, resource.clone(), effective, outcome)
    }

    /// Compute the caller's effective permissions on a resource.
    ///
    /// A missing model grants nothing from an ACL, and a missing record has no
    /// authors. Only storage failures other than "not found" are returned.
    pub fn effective_permissions(
        &self,
        resource: &Resource,
        principals: &Principals,
    ) -> Result<EffectivePermissions, StoreError> {
        let can_create_model = self.can_create_model(principals);

        let Some(model_id) = &resource.model_id else {
            return Ok(Self::base_permissions(can_create_model));
        };

        let acl = match self.store.get_acl(model_id) {
            Ok(acl) => Some(acl),
            Err(StoreError::ModelNotFound(_)) => None,
            Err(err) => return Err(err),
        };

        self.narrowed_permissions(
            model_id,
            resource.record_id.as_ref(),
            acl.as_ref(),
            can_create_model,
            principals,
        )
    }

    fn base_permissions(can_create_model: bool) -> EffectivePermissions {
        let mut effective = EffectivePermissions::new();
        if can_create_model {
            effective.insert(Permission::CreateModel);
        }
        effective
    }

    fn narrowed_permissions(
        &self,
        model_id: &ModelId,
        record_id: Option<&RecordId>,
        acl: Option<&ResourceAcl>,
        can_create_model: bool,
        principals: &Principals,
    ) -> Result<EffectivePermissions, StoreError> {
        let mut effective = Self::base_permissions(can_create_model);
        if let Some(acl) = acl {
            effective.extend(acl.permissions_for(principals));
        }

        let Some(record_id) = record_id else {
            return Ok(effective);
        };

        let authors = match self.store.get_record_authors(model_id, record_id) {
            Ok(authors) => authors,
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(err),
        };

        // The "my record" permissions only count for actual authors
        if !principals.intersects(&authors) {
            effective.remove_author_scoped();
        }

        Ok(effective)
    }

    fn short_circuit(&self, action: Action, resource: &Resource, allowed: bool) -> Evaluation {
        log::debug!("{action} on {resource}: no model yet, model creator = {allowed}");
        Evaluation::new(
            action,
            resource.clone(),
            Self::base_permissions(allowed),
            Outcome::CreatorShortCircuit { allowed },
        )
    }

    fn unavailable(&self, action: Action, resource: &Resource, err: StoreError) -> Evaluation {
        log::warn!("Denying {action} on {resource}: {err}");
        Evaluation::new(
            action,
            resource.clone(),
            EffectivePermissions::new(),
            Outcome::StoreUnavailable(err.to_string()),
        )
    }
}
