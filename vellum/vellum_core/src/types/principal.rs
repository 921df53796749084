//! Principals.
//!
//! A principal is an identity a caller holds. Concrete principals are API
//! tokens. Two pseudo-principals are reserved:
//!
//! - [`Principal::Anyone`] (`system.Everyone`) is held by every caller.
//! - [`Principal::Authenticated`] (`system.Authenticated`) is held by every
//!   caller whose credentials were verified.
//!
//! Their wire names live in the `system.` namespace, which token identifiers
//! are not allowed to use.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Error};
use crate::id::TokenId;

/// Wire name of the `Anyone` pseudo-principal.
pub const ANYONE: &str = "system.Everyone";

/// Wire name of the `Authenticated` pseudo-principal.
pub const AUTHENTICATED: &str = "system.Authenticated";

/// An identity held by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Principal {
    /// Every caller.
    Anyone,

    /// Every caller with verified credentials.
    Authenticated,

    /// A concrete API token.
    Token(TokenId),
}

impl Principal {
    /// Create a token principal.
    pub fn token(token_id: TokenId) -> Self {
        Self::Token(token_id)
    }

    /// Get the wire name of this principal.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anyone => ANYONE,
            Self::Authenticated => AUTHENTICATED,
            Self::Token(id) => id.as_str(),
        }
    }

    /// Check if this is one of the pseudo-principals.
    pub fn is_pseudo(&self) -> bool {
        !matches!(self, Self::Token(_))
    }

    /// Map a name from the `model_creators` configuration.
    ///
    /// `"Everyone"` and `"Authenticated"` name the pseudo-principals; any
    /// other value is taken as a literal token identifier.
    pub fn from_config_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "Everyone" => Ok(Self::Anyone),
            "Authenticated" => Ok(Self::Authenticated),
            other => TokenId::from_string(other)
                .map(Self::Token)
                .map_err(|_| ConfigError::InvalidPrincipal(other.to_string())),
        }
    }
}

impl From<TokenId> for Principal {
    fn from(token_id: TokenId) -> Self {
        Self::Token(token_id)
    }
}

impl FromStr for Principal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ANYONE => Ok(Self::Anyone),
            AUTHENTICATED => Ok(Self::Authenticated),
            other => TokenId::from_string(other).map(Self::Token),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// The set of principals held by one caller for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principals {
    inner: HashSet<Principal>,
}

impl Principals {
    /// The principal set of an anonymous caller: `{Anyone}`.
    pub fn anonymous() -> Self {
        Self {
            inner: HashSet::from([Principal::Anyone]),
        }
    }

    /// The principal set of a verified token holder:
    /// `{Anyone, Authenticated, token}`.
    pub fn authenticated(token_id: TokenId) -> Self {
        Self {
            inner: HashSet::from([
                Principal::Anyone,
                Principal::Authenticated,
                Principal::Token(token_id),
            ]),
        }
    }

    /// Check if the set holds the given principal.
    pub fn contains(&self, principal: &Principal) -> bool {
        self.inner.contains(principal)
    }

    /// Check if any of the given principals is held.
    pub fn intersects<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Principal>,
    {
        others.into_iter().any(|p| self.inner.contains(p))
    }

    /// Check if the set includes `Authenticated`.
    pub fn is_authenticated(&self) -> bool {
        self.contains(&Principal::Authenticated)
    }

    /// The concrete token in the set, if exactly one is held.
    pub fn token(&self) -> Option<&TokenId> {
        let mut tokens = self.inner.iter().filter_map(|p| match p {
            Principal::Token(id) => Some(id),
            _ => None,
        });
        match (tokens.next(), tokens.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// Add a principal to the set.
    pub fn insert(&mut self, principal: Principal) -> bool {
        self.inner.insert(principal)
    }

    /// Iterate over the held principals.
    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.inner.iter()
    }

    /// Number of held principals.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no principal is held.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Principal> for Principals {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Principals {
    type Item = &'a Principal;
    type IntoIter = std::collections::hash_set::Iter<'a, Principal>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Display for Principals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.inner.iter().map(Principal::as_str).collect();
        names.sort_unstable();
        write!(f, "{{{}}}", names.join(", "))
    }
}
