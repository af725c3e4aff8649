//! Switchboard Core - Domain Vocabulary
//!
//! Pure data types shared by the client layer and the console: typed
//! identifiers, status enums, session scopes and the derived capability set.
//! This crate contains no I/O.

pub mod capability;
pub mod enums;
pub mod identity;
pub mod scope;
pub mod session;

pub use capability::{Capability, CapabilitySet};
pub use enums::{
    ApiKeyStatus, ChannelKind, ChannelStatus, TraceStatus, UserRole, UserStatus,
};
pub use identity::{ApiKeyId, ChannelId, LogId, Timestamp, TraceId, UserId};
pub use scope::{Scope, ScopeList};
pub use session::SessionUser;
