//! Request integration.
//!
//! This module turns the credentials presented with a request into the
//! principal set the engine decides on.

mod resolver;

pub use resolver::PrincipalResolver;
