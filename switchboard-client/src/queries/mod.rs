//! Per-entity query tables.
//!
//! One module per list screen: the query template with its capability-gated
//! fragments, the row type the connection decodes into, the where-input the
//! filters serialize to, and the screen's filter state. The shapes here are
//! the only place entity-specific wire knowledge lives.

pub mod api_keys;
pub mod channels;
pub mod session;
pub mod traces;
pub mod usage;
pub mod users;

use serde::Deserialize;
use switchboard_core::{ApiKeyId, ChannelId, UserId};

/// Capability-gated `user { … }` sub-field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    pub display_name: String,
}

/// Capability-gated `channel { … }` sub-field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRef {
    pub id: ChannelId,
    pub name: String,
}

/// Capability-gated `apiKey { … }` sub-field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRef {
    pub id: ApiKeyId,
    pub name: String,
}
