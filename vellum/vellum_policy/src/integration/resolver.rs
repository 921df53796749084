//! Principal resolution.
//!
//! This module provides functionality for resolving request credentials into
//! principals.

use subtle::ConstantTimeEq;
use vellum_core::{Credentials, Principals, StoreError};

use crate::store::AclStore;

/// A resolver that maps credentials to the caller's principal set.
///
/// The result always contains `Anyone`. A verified token adds
/// `Authenticated` and the token itself. Every failure falls back to the
/// anonymous set, so a bad secret and a missing header look the same to
/// the engine.
pub struct PrincipalResolver<S> {
    /// The store token secrets are read from.
    store: S,
}

impl<S> PrincipalResolver<S>
where
    S: AclStore,
{
    /// Create a new principal resolver.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding token secrets.
    ///
    /// # Returns
    ///
    /// A new principal resolver.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the principals of a caller.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The credentials presented, if any.
    ///
    /// # Returns
    ///
    /// `{Anyone, Authenticated, token}` when the secret matches the one stored
    /// for the token, `{Anyone}` otherwise.
    pub fn resolve(&self, credentials: Option<&Credentials>) -> Principals {
        let Some(credentials) = credentials else {
            return Principals::anonymous();
        };

        match self.store.get_token_secret(&credentials.token_id) {
            Ok(stored) if secrets_match(&stored, &credentials.secret) => {
                Principals::authenticated(credentials.token_id.clone())
            }
            Ok(_) => {
                log::debug!("Secret mismatch for token {}", credentials.token_id);
                Principals::anonymous()
            }
            Err(StoreError::TokenNotFound(token_id)) => {
                log::debug!("Unknown token {token_id}");
                Principals::anonymous()
            }
            Err(err) => {
                log::warn!(
                    "Treating token {} as anonymous: {err}",
                    credentials.token_id
                );
                Principals::anonymous()
            }
        }
    }
}

fn secrets_match(stored: &str, presented: &str) -> bool {
    let (stored, presented) = (stored.as_bytes(), presented.as_bytes());
    stored.len() == presented.len() && bool::from(stored.ct_eq(presented))
}
