//! # Vellum Policy
//!
//! `vellum_policy` decides whether a caller may perform an action on a model
//! or record of the Vellum document store.
//!
//! Key concepts:
//!
//! 1. **Requirement**: A boolean tree over leaf permissions (`ALL` / `ANY`)
//!    describing what an action demands.
//!
//! 2. **Action Table**: The fixed mapping from every action to its
//!    requirement, validated when the engine is built.
//!
//! 3. **Resource ACL**: Per-model mapping from permission to the principals
//!    holding it.
//!
//! 4. **Author Narrowing**: The `*_my_record` permissions only count for
//!    principals recorded as authors of the targeted record.
//!
//! 5. **Authorizer**: Combines the above into the `permits` decision. It
//!    keeps no state between calls, so ACL changes and token revocations take
//!    effect on the next request.

pub mod engine;
pub mod integration;
pub mod model;
pub mod store;

// Re-export key types and traits for convenience
pub use engine::{ActionTable, Authorizer};
pub use integration::PrincipalResolver;
pub use model::{EffectivePermissions, Evaluation, Outcome, Requirement, ResourceAcl};
pub use store::{AclStore, InMemoryStore, ModelDocument, RecordDocument};
