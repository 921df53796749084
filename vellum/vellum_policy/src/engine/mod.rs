//! Authorization engine.
//!
//! This module provides the action table and the decision function.

mod authorizer;
mod table;

pub use authorizer::Authorizer;
pub use table::ActionTable;
