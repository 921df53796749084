//! Startup configuration.
//!
//! The authorization layer reads its configuration once, at process start.
//! The document is TOML:
//!
//! ```toml
//! # Who may create new models. "Everyone" and "Authenticated" name the
//! # pseudo-principals; anything else is a literal token identifier.
//! model_creators = ["Authenticated", "admin-token"]
//! log_level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::types::Principal;
use crate::utils::LogLevel;

fn default_model_creators() -> Vec<String> {
    vec!["Everyone".to_string()]
}

/// Configuration consumed by the authorization engine at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationConfig {
    /// Principals allowed to create new models.
    #[serde(default = "default_model_creators")]
    pub model_creators: Vec<String>,

    /// Minimum severity of emitted log records.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            model_creators: default_model_creators(),
            log_level: LogLevel::default(),
        }
    }
}

impl AuthorizationConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        // Surface bad principal names at load time rather than first use
        config.model_creator_principals()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let document = fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    /// Map `model_creators` to principals.
    pub fn model_creator_principals(&self) -> Result<HashSet<Principal>> {
        let principals = self
            .model_creators
            .iter()
            .map(|name| Principal::from_config_name(name))
            .collect::<std::result::Result<HashSet<_>, _>>()?;
        Ok(principals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::id::TokenId;

    #[test]
    fn test_default_config() {
        let config = AuthorizationConfig::default();
        assert_eq!(config.model_creators, vec!["Everyone".to_string()]);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(
            config.model_creator_principals().unwrap(),
            HashSet::from([Principal::Anyone])
        );
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AuthorizationConfig::from_toml_str("").unwrap();
        assert_eq!(config, AuthorizationConfig::default());
    }

    #[test]
    fn test_model_creators_mapping() {
        let config = AuthorizationConfig::from_toml_str(
            r#"
            model_creators = ["Authenticated", "admin"]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.model_creator_principals().unwrap(),
            HashSet::from([
                Principal::Authenticated,
                Principal::Token(TokenId::from_string("admin").unwrap()),
            ])
        );
    }

    #[test]
    fn test_reserved_creator_rejected() {
        let result = AuthorizationConfig::from_toml_str(r#"model_creators = ["system.Everyone"]"#);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPrincipal(_)))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = AuthorizationConfig::from_toml_str(r#"model_creator = ["Everyone"]"#);
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn test_empty_creator_list_allows_nobody() {
        let config = AuthorizationConfig::from_toml_str("model_creators = []").unwrap();
        assert!(config.model_creator_principals().unwrap().is_empty());
    }
}
