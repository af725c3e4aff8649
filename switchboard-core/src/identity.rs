//! Identity types for Switchboard entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a console user account.
    UserId
);
entity_id!(
    /// Identifier of an upstream provider channel.
    ChannelId
);
entity_id!(
    /// Identifier of a gateway API key.
    ApiKeyId
);
entity_id!(
    /// Identifier of a usage-log entry.
    LogId
);
entity_id!(
    /// Identifier of a request trace.
    TraceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_round_trips_through_serde() {
        let id = UserId::new(Uuid::now_v7());
        let json = serde_json::to_string(&id).unwrap();
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_entity_id_serializes_transparently() {
        let raw = Uuid::now_v7();
        let id = ChannelId::new(raw);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            serde_json::to_string(&raw).unwrap()
        );
    }

    #[test]
    fn test_entity_id_display_matches_uuid() {
        let raw = Uuid::now_v7();
        assert_eq!(ApiKeyId::new(raw).to_string(), raw.to_string());
    }
}
