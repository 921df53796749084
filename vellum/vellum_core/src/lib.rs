//! # Vellum Core
//!
//! `vellum_core` provides the shared vocabulary of the Vellum document store.
//! Every other crate in the workspace speaks in terms of the types defined
//! here: identifiers, principals, permissions, actions, and the error
//! hierarchy.
//!
//! ## Core Principles
//!
//! Vellum stores arbitrary records under user-defined models. Each model
//! carries an access-control list that decides who may read, write, or
//! administer it:
//!
//! 1. **Principals**: Callers are described by a set of opaque principal
//!    identifiers. Two pseudo-principals are reserved: `Anyone`, held by every
//!    caller, and `Authenticated`, held by every caller whose credentials were
//!    verified.
//!
//! 2. **Leaf Permissions**: ACLs grant, and actions demand, permissions drawn
//!    from a closed enumeration (`read_definition`, `create_record`, ...).
//!
//! 3. **Fail Closed**: Missing models, missing records, and unverifiable
//!    credentials narrow what a caller may do. They never widen it.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Vellum components
//! - **id**: Strongly-typed identifier types
//! - **types**: Principals, permissions, actions, resources, and credentials
//! - **utils**: Log levels and startup configuration

pub mod error;
pub mod id;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use error::{ConfigError, Error, PolicyError, Result, StoreError};
pub use id::{ModelId, RecordId, TokenId};
pub use types::{Action, Credentials, Permission, Principal, Principals, Resource};
pub use utils::{AuthorizationConfig, LogLevel};
