//! Authorization models.
//!
//! This module defines requirement trees, resource ACLs, and the decision
//! records produced by the engine.

pub mod acl;
pub mod evaluation;
pub mod requirement;

pub use acl::ResourceAcl;
pub use evaluation::{EffectivePermissions, Evaluation, Outcome};
pub use requirement::Requirement;
