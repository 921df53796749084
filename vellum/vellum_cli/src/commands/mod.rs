//! CLI commands

pub mod actions;
pub mod check;
pub mod token;
