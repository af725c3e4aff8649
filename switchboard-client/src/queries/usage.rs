//! Usage log list query.
//!
//! The densest template: all three gated sub-fields hang off the node, and
//! three where-dimensions are capability-gated alongside them.

use crate::compose::{composed, FieldFragment, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use crate::filter::{assign_text, text_entry, text_of, ColumnFilter, FilterModel};
use crate::pagination::Pager;
use crate::queries::{ApiKeyRef, ChannelRef, UserRef};
use crate::variables::{ListVariables, OrderBy, OrderDirection};
use serde::{Deserialize, Serialize};
use switchboard_core::{Capability, CapabilitySet, LogId, Timestamp};

pub const ENTITY: &str = "usageLogs";
pub const CONTEXT: &str = "usage logs";

pub const COL_MODEL: &str = "model";
pub const COL_USER: &str = "user";
pub const COL_CHANNEL: &str = "channel";
pub const COL_API_KEY: &str = "apiKey";

pub const USAGE_LOGS: QueryTemplate = QueryTemplate {
    name: "UsageLogs",
    body: "\
query UsageLogs($first: Int!, $after: Cursor, $where: UsageLogWhereInput, $orderBy: UsageLogOrder) {
  usageLogs(first: $first, after: $after, where: $where, orderBy: $orderBy) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      cursor
      node {
        id
        at
        model
        promptTokens
        completionTokens
        quotaCost
        {{user}}
        {{channel}}
        {{apiKey}}
      }
    }
  }
}",
    fragments: &[
        FieldFragment {
            slot: "user",
            capability: Capability::Users,
            fields: "user { id displayName }",
        },
        FieldFragment {
            slot: "channel",
            capability: Capability::Channels,
            fields: "channel { id name }",
        },
        FieldFragment {
            slot: "apiKey",
            capability: Capability::ApiKeys,
            fields: "apiKey { id name }",
        },
    ],
};

/// One usage log row. The gated sub-fields are present only under their
/// capabilities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRow {
    pub id: LogId,
    pub at: Timestamp,
    pub model: String,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub quota_cost: i64,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub channel: Option<ChannelRef>,
    #[serde(default)]
    pub api_key: Option<ApiKeyRef>,
}

/// Server-side filter object for the usage log list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageWhere {
    #[serde(rename = "modelContainsFold", skip_serializing_if = "Option::is_none")]
    pub model_contains_fold: Option<String>,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "channelID", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(rename = "apiKeyID", skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
}

/// Screen-owned filter state for the usage log list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageFilter {
    pub model: String,
    pub user_id: String,
    pub channel_id: String,
    pub api_key_id: String,
}

impl UsageFilter {
    /// Build the where-input. Each id dimension rides its capability: a value
    /// the UI still holds for a capability the session lost is dropped here.
    pub fn where_clause(&self, capabilities: CapabilitySet) -> Option<UsageWhere> {
        let where_clause = UsageWhere {
            model_contains_fold: (!self.model.is_empty()).then(|| self.model.clone()),
            user_id: (!self.user_id.is_empty() && capabilities.allows(Capability::Users))
                .then(|| self.user_id.clone()),
            channel_id: (!self.channel_id.is_empty()
                && capabilities.allows(Capability::Channels))
            .then(|| self.channel_id.clone()),
            api_key_id: (!self.api_key_id.is_empty()
                && capabilities.allows(Capability::ApiKeys))
            .then(|| self.api_key_id.clone()),
        };
        (where_clause != UsageWhere::default()).then_some(where_clause)
    }
}

impl FilterModel for UsageFilter {
    fn project(&self) -> Vec<ColumnFilter> {
        [
            text_entry(COL_MODEL, &self.model),
            text_entry(COL_USER, &self.user_id),
            text_entry(COL_CHANNEL, &self.channel_id),
            text_entry(COL_API_KEY, &self.api_key_id),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool {
        let mut changed = assign_text(&mut self.model, text_of(columns, COL_MODEL));
        changed |= assign_text(&mut self.user_id, text_of(columns, COL_USER));
        changed |= assign_text(&mut self.channel_id, text_of(columns, COL_CHANNEL));
        changed |= assign_text(&mut self.api_key_id, text_of(columns, COL_API_KEY));
        changed
    }
}

/// Assemble the fetch spec for one page of the usage log list.
pub fn list_spec(
    filter: &UsageFilter,
    pager: &Pager,
    capabilities: CapabilitySet,
) -> Result<FetchSpec, ClientError> {
    let query = composed(&USAGE_LOGS, capabilities)?;
    let variables = ListVariables::new(pager.page_size())
        .with_after(pager.cursor().map(str::to_string))
        .with_where(filter.where_clause(capabilities))
        .with_order(OrderBy {
            field: "AT",
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
