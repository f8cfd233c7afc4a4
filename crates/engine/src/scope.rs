//! Favorites scopes.
//!
//! A scope partitions persisted favorites per device or per user profile.
//! The default scope is a single fixed key, matching the common case of
//! one set of favorites per device; callers that support profiles mint
//! one scope per profile code and keep it.

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scope(Arc<str>);

impl Scope {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    /// The device-wide scope used when no profile is active.
    fn default() -> Self {
        Self::new("favorite-stops")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scope {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Scope {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
