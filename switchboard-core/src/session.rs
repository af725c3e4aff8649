//! The authenticated session user.
//!
//! Populated from the control plane's `viewer` query by the client layer.
//! Authentication itself (token issuance, refresh) is the backend's concern;
//! the console only consumes this record.

use crate::identity::UserId;
use crate::scope::ScopeList;
use serde::{Deserialize, Serialize};

/// Current authenticated user, as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub display_name: String,
    /// Instance owner; implies every capability regardless of scopes.
    pub is_owner: bool,
    pub scopes: ScopeList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;
    use uuid::Uuid;

    #[test]
    fn test_session_user_decodes_from_viewer_payload() {
        let json = r#"{
            "id": "018f3c5e-7b7a-7000-8000-000000000001",
            "displayName": "root",
            "isOwner": true,
            "scopes": ["read_users", "read_channels"]
        }"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert!(user.is_owner);
        assert_eq!(user.display_name, "root");
        assert_eq!(user.scopes, vec![Scope::new("read_users"), Scope::new("read_channels")]);
        assert_ne!(user.id, UserId::new(Uuid::nil()));
    }
}
