//! Session scopes issued by the control plane.
//!
//! Scopes are opaque permission strings attached to the current session.
//! This crate never interprets them beyond equality against the well-known
//! constants below; the session collaborator owns their lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque scope string (e.g. `read_users`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

/// Ordered scope list attached to a session. Read-only here.
pub type ScopeList = Vec<Scope>;

impl Scope {
    /// Matches every scope; short-circuits all capabilities to true.
    pub const WILDCARD: &'static str = "*";
    pub const READ_USERS: &'static str = "read_users";
    pub const READ_CHANNELS: &'static str = "read_channels";
    pub const READ_API_KEYS: &'static str = "read_api_keys";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
