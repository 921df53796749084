//! Data types shared across Vellum.
//!
//! This module contains the vocabulary of the authorization layer: who is
//! calling (`Principal`), what they may hold (`Permission`), what they are
//! trying to do (`Action`), and what they are doing it to (`Resource`).

pub mod action;
pub mod credentials;
pub mod permission;
pub mod principal;
pub mod resource;

pub use action::Action;
pub use credentials::Credentials;
pub use permission::Permission;
pub use principal::{Principal, Principals};
pub use resource::Resource;
