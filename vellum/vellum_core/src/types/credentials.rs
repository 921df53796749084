//! Caller credentials.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::id::TokenId;

/// A token identifier and the secret that proves ownership of it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The token being claimed.
    pub token_id: TokenId,

    /// The secret presented for the token.
    pub secret: String,
}

impl Credentials {
    /// Create credentials from a token and secret.
    pub fn new(token_id: TokenId, secret: impl Into<String>) -> Self {
        Self {
            token_id,
            secret: secret.into(),
        }
    }

    /// Generate a fresh random token and secret.
    pub fn generate() -> Self {
        Self {
            token_id: TokenId::new(),
            secret: Uuid::new_v4().simple().to_string(),
        }
    }
}

// The secret never reaches logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token_id", &self.token_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = Credentials::generate();
        let b = Credentials::generate();
        assert_ne!(a.token_id, b.token_id);
        assert_ne!(a.secret, b.secret);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new(TokenId::from_string("alice").unwrap(), "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
