//! API key list query.

use crate::compose::{composed, FieldFragment, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use crate::filter::{
    assign_set, assign_text, many_entry, many_of, text_entry, text_of, ColumnFilter, FilterModel,
};
use crate::pagination::Pager;
use crate::queries::UserRef;
use crate::variables::{ListVariables, OrderBy, OrderDirection};
use serde::{Deserialize, Serialize};
use switchboard_core::{ApiKeyId, ApiKeyStatus, Capability, CapabilitySet, Timestamp};

pub const ENTITY: &str = "apiKeys";
pub const CONTEXT: &str = "API keys";

pub const COL_NAME: &str = "name";
pub const COL_STATUS: &str = "status";
pub const COL_USER: &str = "user";

pub const API_KEYS: QueryTemplate = QueryTemplate {
    name: "ApiKeys",
    body: "\
query ApiKeys($first: Int!, $after: Cursor, $where: ApiKeyWhereInput, $orderBy: ApiKeyOrder) {
  apiKeys(first: $first, after: $after, where: $where, orderBy: $orderBy) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      cursor
      node {
        id
        name
        status
        quotaLimit
        quotaUsed
        createdAt
        lastUsedAt
        {{user}}
      }
    }
  }
}",
    fragments: &[FieldFragment {
        slot: "user",
        capability: Capability::Users,
        fields: "user { id displayName }",
    }],
};

/// One API key row as the list query returns it. `user` is only present when
/// the session holds `Capability::Users`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRow {
    pub id: ApiKeyId,
    pub name: String,
    pub status: ApiKeyStatus,
    pub quota_limit: Option<i64>,
    pub quota_used: i64,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Server-side filter object for the API key list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiKeyWhere {
    #[serde(rename = "nameContainsFold", skip_serializing_if = "Option::is_none")]
    pub name_contains_fold: Option<String>,
    #[serde(rename = "statusIn", skip_serializing_if = "Option::is_none")]
    pub status_in: Option<Vec<ApiKeyStatus>>,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Screen-owned filter state for the API key list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiKeyFilter {
    pub name: String,
    pub statuses: Vec<ApiKeyStatus>,
    pub user_id: String,
}

impl ApiKeyFilter {
    /// Build the where-input, dropping dimensions the capability set forbids.
    /// A stale `user_id` left in the UI is never sent without
    /// `Capability::Users`.
    pub fn where_clause(&self, capabilities: CapabilitySet) -> Option<ApiKeyWhere> {
        let where_clause = ApiKeyWhere {
            name_contains_fold: (!self.name.is_empty()).then(|| self.name.clone()),
            status_in: (!self.statuses.is_empty()).then(|| self.statuses.clone()),
            user_id: (!self.user_id.is_empty() && capabilities.allows(Capability::Users))
                .then(|| self.user_id.clone()),
        };
        (where_clause != ApiKeyWhere::default()).then_some(where_clause)
    }
}

impl FilterModel for ApiKeyFilter {
    fn project(&self) -> Vec<ColumnFilter> {
        [
            text_entry(COL_NAME, &self.name),
            many_entry(
                COL_STATUS,
                self.statuses.iter().map(ToString::to_string).collect(),
            ),
            text_entry(COL_USER, &self.user_id),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool {
        let statuses: Vec<ApiKeyStatus> = many_of(columns, COL_STATUS)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let mut changed = assign_text(&mut self.name, text_of(columns, COL_NAME));
        changed |= assign_set(&mut self.statuses, statuses);
        changed |= assign_text(&mut self.user_id, text_of(columns, COL_USER));
        changed
    }
}

/// Assemble the fetch spec for one page of the API key list.
pub fn list_spec(
    filter: &ApiKeyFilter,
    pager: &Pager,
    capabilities: CapabilitySet,
) -> Result<FetchSpec, ClientError> {
    let query = composed(&API_KEYS, capabilities)?;
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
