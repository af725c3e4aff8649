//! User account list query.
//!
//! The whole screen is gated: without `Capability::Users` the console shows a
//! permission notice and never assembles this query.

use crate::compose::{composed, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use crate::filter::{
    assign_set, assign_text, many_entry, many_of, text_entry, text_of, ColumnFilter, FilterModel,
};
use crate::pagination::Pager;
use crate::variables::{ListVariables, OrderBy, OrderDirection};
use serde::{Deserialize, Serialize};
use switchboard_core::{CapabilitySet, Timestamp, UserId, UserRole, UserStatus};

pub const ENTITY: &str = "users";
pub const CONTEXT: &str = "users";

pub const COL_USERNAME: &str = "username";
pub const COL_ROLE: &str = "role";
pub const COL_STATUS: &str = "status";

pub const USERS: QueryTemplate = QueryTemplate {
    name: "Users",
    body: "\
query Users($first: Int!, $after: Cursor, $where: UserWhereInput, $orderBy: UserOrder) {
  users(first: $first, after: $after, where: $where, orderBy: $orderBy) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      cursor
      node {
        id
        username
        displayName
        role
        status
        quotaUsed
        createdAt
      }
    }
  }
}",
    fragments: &[],
};

/// One user account row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub quota_used: i64,
    pub created_at: Timestamp,
}

/// Server-side filter object for the user list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserWhere {
    #[serde(rename = "usernameContainsFold", skip_serializing_if = "Option::is_none")]
    pub username_contains_fold: Option<String>,
    #[serde(rename = "roleIn", skip_serializing_if = "Option::is_none")]
    pub role_in: Option<Vec<UserRole>>,
    #[serde(rename = "statusIn", skip_serializing_if = "Option::is_none")]
    pub status_in: Option<Vec<UserStatus>>,
}

/// Screen-owned filter state for the user list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub username: String,
    pub roles: Vec<UserRole>,
    pub statuses: Vec<UserStatus>,
}

impl UserFilter {
    pub fn where_clause(&self, _capabilities: CapabilitySet) -> Option<UserWhere> {
        let where_clause = UserWhere {
            username_contains_fold: (!self.username.is_empty()).then(|| self.username.clone()),
            role_in: (!self.roles.is_empty()).then(|| self.roles.clone()),
            status_in: (!self.statuses.is_empty()).then(|| self.statuses.clone()),
        };
        (where_clause != UserWhere::default()).then_some(where_clause)
    }
}

impl FilterModel for UserFilter {
    fn project(&self) -> Vec<ColumnFilter> {
        [
            text_entry(COL_USERNAME, &self.username),
            many_entry(COL_ROLE, self.roles.iter().map(ToString::to_string).collect()),
            many_entry(
                COL_STATUS,
                self.statuses.iter().map(ToString::to_string).collect(),
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool {
        let roles: Vec<UserRole> = many_of(columns, COL_ROLE)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let statuses: Vec<UserStatus> = many_of(columns, COL_STATUS)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let mut changed = assign_text(&mut self.username, text_of(columns, COL_USERNAME));
        changed |= assign_set(&mut self.roles, roles);
        changed |= assign_set(&mut self.statuses, statuses);
        changed
    }
}

/// Assemble the fetch spec for one page of the user list.
pub fn list_spec(
    filter: &UserFilter,
    pager: &Pager,
    capabilities: CapabilitySet,
) -> Result<FetchSpec, ClientError> {
    let query = composed(&USERS, capabilities)?;
    let variables = ListVariables::new(pager.page_size())
        .with_after(pager.cursor().map(str::to_string))
        .with_where(filter.where_clause(capabilities))
        .with_order(OrderBy {
            field: "CREATED_AT",
            direction: OrderDirection::Desc,
        });
    let variables =
        serde_json::to_value(&variables).map_err(|source| ClientError::Decode {
            context: CONTEXT,
            source,
        })?;
    Ok(FetchSpec {
        entity: ENTITY,
        context: CONTEXT,
        query,
        variables,
        capabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_omitted_when_defaults() {
        assert_eq!(UserFilter::default().where_clause(CapabilitySet::all()), None);
    }

    #[test]
    fn test_project_then_absorb_round_trips() {
        let filter = UserFilter {
            username: "ada".to_string(),
            roles: vec![UserRole::Admin, UserRole::Operator],
            statuses: vec![UserStatus::Active],
        };
        let mut absorbed = UserFilter::default();
        assert!(absorbed.absorb(&filter.project()));
        assert_eq!(absorbed, filter);
    }

    #[test]
    fn test_reordered_roles_absorb_to_no_change() {
        use crate::filter::FilterValue;
        let mut filter = UserFilter {
            username: String::new(),
            roles: vec![UserRole::Admin, UserRole::Viewer],
            statuses: Vec::new(),
        };
        let reordered = vec![ColumnFilter {
            id: COL_ROLE,
            value: FilterValue::Many(vec!["VIEWER".to_string(), "ADMIN".to_string()]),
        }];
        assert!(!filter.absorb(&reordered));
    }

    #[test]
    fn test_row_decodes_wire_shape() {
        let json = serde_json::json!({
            "id": "018f3c5e-7b7a-7000-8000-000000000002",
            "username": "ada",
            "displayName": "Ada L.",
            "role": "ADMIN",
            "status": "ACTIVE",
            "quotaUsed": 42,
            "createdAt": "2025-09-14T08:00:00Z"
        });
        let row: UserRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.role, UserRole::Admin);
        assert_eq!(row.status, UserStatus::Active);
    }
}
