//! Request trace list query.

use crate::compose::{composed, FieldFragment, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use crate::filter::{
    assign_set, assign_text, many_entry, many_of, text_entry, text_of, ColumnFilter, FilterModel,
};
use crate::pagination::Pager;
use crate::queries::{ChannelRef, UserRef};
use crate::variables::{ListVariables, OrderBy, OrderDirection};
use serde::{Deserialize, Serialize};
use switchboard_core::{Capability, CapabilitySet, Timestamp, TraceId, TraceStatus};

pub const ENTITY: &str = "requestTraces";
pub const CONTEXT: &str = "request traces";

pub const COL_MODEL: &str = "model";
pub const COL_STATUS: &str = "status";
pub const COL_USER: &str = "user";
pub const COL_CHANNEL: &str = "channel";

pub const REQUEST_TRACES: QueryTemplate = QueryTemplate {
    name: "RequestTraces",
    body: "\
query RequestTraces($first: Int!, $after: Cursor, $where: RequestTraceWhereInput, $orderBy: RequestTraceOrder) {
  requestTraces(first: $first, after: $after, where: $where, orderBy: $orderBy) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      cursor
      node {
        id
        requestedAt
        model
        status
        latencyMs
        errorMessage
        {{user}}
        {{channel}}
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
    ],
};

/// One request trace row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRow {
    pub id: TraceId,
    pub requested_at: Timestamp,
    pub model: String,
    pub status: TraceStatus,
    pub latency_ms: i64,
    pub error_message: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub channel: Option<ChannelRef>,
}

/// Server-side filter object for the request trace list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceWhere {
    #[serde(rename = "modelContainsFold", skip_serializing_if = "Option::is_none")]
    pub model_contains_fold: Option<String>,
    #[serde(rename = "statusIn", skip_serializing_if = "Option::is_none")]
    pub status_in: Option<Vec<TraceStatus>>,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "channelID", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Screen-owned filter state for the request trace list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceFilter {
    pub model: String,
    pub statuses: Vec<TraceStatus>,
    pub user_id: String,
    pub channel_id: String,
}

impl TraceFilter {
    pub fn where_clause(&self, capabilities: CapabilitySet) -> Option<TraceWhere> {
        let where_clause = TraceWhere {
            model_contains_fold: (!self.model.is_empty()).then(|| self.model.clone()),
            status_in: (!self.statuses.is_empty()).then(|| self.statuses.clone()),
            user_id: (!self.user_id.is_empty() && capabilities.allows(Capability::Users))
                .then(|| self.user_id.clone()),
            channel_id: (!self.channel_id.is_empty()
                && capabilities.allows(Capability::Channels))
            .then(|| self.channel_id.clone()),
        };
        (where_clause != TraceWhere::default()).then_some(where_clause)
    }
}

impl FilterModel for TraceFilter {
    fn project(&self) -> Vec<ColumnFilter> {
        [
            text_entry(COL_MODEL, &self.model),
            many_entry(
                COL_STATUS,
                self.statuses.iter().map(ToString::to_string).collect(),
            ),
            text_entry(COL_USER, &self.user_id),
            text_entry(COL_CHANNEL, &self.channel_id),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool {
        let statuses: Vec<TraceStatus> = many_of(columns, COL_STATUS)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let mut changed = assign_text(&mut self.model, text_of(columns, COL_MODEL));
        changed |= assign_set(&mut self.statuses, statuses);
        changed |= assign_text(&mut self.user_id, text_of(columns, COL_USER));
        changed |= assign_text(&mut self.channel_id, text_of(columns, COL_CHANNEL));
        changed
    }
}

/// Assemble the fetch spec for one page of the request trace list.
pub fn list_spec(
    filter: &TraceFilter,
    pager: &Pager,
    capabilities: CapabilitySet,
) -> Result<FetchSpec, ClientError> {
    let query = composed(&REQUEST_TRACES, capabilities)?;
    let variables = ListVariables::new(pager.page_size())
        .with_after(pager.cursor().map(str::to_string))
        .with_where(filter.where_clause(capabilities))
        .with_order(OrderBy {
            field: "REQUESTED_AT",
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
    use crate::filter::FilterValue;

    #[test]
    fn test_fragments_follow_capabilities() {
        let channels_only = REQUEST_TRACES.compose(CapabilitySet::CHANNELS).unwrap();
        assert!(channels_only.contains("channel { id name }"));
        assert!(!channels_only.contains("user {"));
    }

    #[test]
    fn test_where_clause_keeps_allowed_dimensions_only() {
        let filter = TraceFilter {
            model: String::new(),
            statuses: vec![TraceStatus::UpstreamError],
            user_id: "u-1".to_string(),
            channel_id: "c-1".to_string(),
        };
        let clause = filter.where_clause(CapabilitySet::CHANNELS).unwrap();
        assert_eq!(clause.user_id, None);
        assert_eq!(clause.channel_id.as_deref(), Some("c-1"));
        assert_eq!(clause.status_in, Some(vec![TraceStatus::UpstreamError]));
    }

    #[test]
    fn test_project_then_absorb_round_trips() {
        let filter = TraceFilter {
            model: "gpt".to_string(),
            statuses: vec![TraceStatus::RateLimited, TraceStatus::Rejected],
            user_id: "u-2".to_string(),
            channel_id: String::new(),
        };
        let mut absorbed = TraceFilter::default();
        assert!(absorbed.absorb(&filter.project()));
        assert_eq!(absorbed, filter);
    }

    #[test]
    fn test_reordered_statuses_absorb_to_no_change() {
        let mut filter = TraceFilter {
            model: String::new(),
            statuses: vec![TraceStatus::Succeeded, TraceStatus::Canceled],
            user_id: String::new(),
            channel_id: String::new(),
        };
        let reordered = vec![ColumnFilter {
            id: COL_STATUS,
            value: FilterValue::Many(vec!["CANCELED".to_string(), "SUCCEEDED".to_string()]),
        }];
        assert!(!filter.absorb(&reordered));
    }

    #[test]
    fn test_row_decodes_wire_shape() {
        let json = serde_json::json!({
            "id": "018f3c5e-7b7a-7000-8000-0000000000bb",
            "requestedAt": "2026-02-01T10:15:00Z",
            "model": "claude-sonnet",
            "status": "UPSTREAM_ERROR",
            "latencyMs": 1843,
            "errorMessage": "upstream 529",
            "channel": { "id": "018f3c5e-7b7a-7000-8000-0000000000cc", "name": "anthropic-primary" }
        });
        let row: TraceRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.status, TraceStatus::UpstreamError);
        assert_eq!(row.error_message.as_deref(), Some("upstream 529"));
        assert!(row.user.is_none());
        assert!(row.channel.is_some());
    }
}
