//! Upstream provider channel list query.
//!
//! The channel node has no capability-gated sub-fields, so this template has
//! zero insertion points and composes to itself for every capability set.

use crate::compose::{composed, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use crate::filter::{
    assign_set, assign_text, many_entry, many_of, text_entry, text_of, ColumnFilter, FilterModel,
};
use crate::pagination::Pager;
use crate::variables::{ListVariables, OrderBy, OrderDirection};
use serde::{Deserialize, Serialize};
use switchboard_core::{CapabilitySet, ChannelId, ChannelKind, ChannelStatus, Timestamp};

pub const ENTITY: &str = "channels";
pub const CONTEXT: &str = "channels";

pub const COL_NAME: &str = "name";
pub const COL_STATUS: &str = "status";
pub const COL_KIND: &str = "kind";

pub const CHANNELS: QueryTemplate = QueryTemplate {
    name: "Channels",
    body: "\
query Channels($first: Int!, $after: Cursor, $where: ChannelWhereInput, $orderBy: ChannelOrder) {
  channels(first: $first, after: $after, where: $where, orderBy: $orderBy) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      cursor
      node {
        id
        name
        kind
        status
        baseUrl
        priority
        weight
        createdAt
      }
    }
  }
}",
    fragments: &[],
};

/// One provider channel row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRow {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    pub status: ChannelStatus,
    pub base_url: String,
    pub priority: i32,
    pub weight: i32,
    pub created_at: Timestamp,
}

/// Server-side filter object for the channel list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelWhere {
    #[serde(rename = "nameContainsFold", skip_serializing_if = "Option::is_none")]
    pub name_contains_fold: Option<String>,
    #[serde(rename = "statusIn", skip_serializing_if = "Option::is_none")]
    pub status_in: Option<Vec<ChannelStatus>>,
    #[serde(rename = "kindIn", skip_serializing_if = "Option::is_none")]
    pub kind_in: Option<Vec<ChannelKind>>,
}

/// Screen-owned filter state for the channel list.
///
/// No dimension here is capability-gated; the where-clause still takes the
/// capability set so every screen assembles queries the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelFilter {
    pub name: String,
    pub statuses: Vec<ChannelStatus>,
    pub kinds: Vec<ChannelKind>,
}

impl ChannelFilter {
    pub fn where_clause(&self, _capabilities: CapabilitySet) -> Option<ChannelWhere> {
        let where_clause = ChannelWhere {
            name_contains_fold: (!self.name.is_empty()).then(|| self.name.clone()),
            status_in: (!self.statuses.is_empty()).then(|| self.statuses.clone()),
            kind_in: (!self.kinds.is_empty()).then(|| self.kinds.clone()),
        };
        (where_clause != ChannelWhere::default()).then_some(where_clause)
    }
}

impl FilterModel for ChannelFilter {
    fn project(&self) -> Vec<ColumnFilter> {
        [
            text_entry(COL_NAME, &self.name),
            many_entry(
                COL_STATUS,
                self.statuses.iter().map(ToString::to_string).collect(),
            ),
            many_entry(COL_KIND, self.kinds.iter().map(ToString::to_string).collect()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool {
        let statuses: Vec<ChannelStatus> = many_of(columns, COL_STATUS)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let kinds: Vec<ChannelKind> = many_of(columns, COL_KIND)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        let mut changed = assign_text(&mut self.name, text_of(columns, COL_NAME));
        changed |= assign_set(&mut self.statuses, statuses);
        changed |= assign_set(&mut self.kinds, kinds);
        changed
    }
}

/// Assemble the fetch spec for one page of the channel list.
pub fn list_spec(
    filter: &ChannelFilter,
    pager: &Pager,
    capabilities: CapabilitySet,
) -> Result<FetchSpec, ClientError> {
    let query = composed(&CHANNELS, capabilities)?;
    let variables = ListVariables::new(pager.page_size())
        .with_after(pager.cursor().map(str::to_string))
        .with_where(filter.where_clause(capabilities))
        .with_order(OrderBy {
            field: "PRIORITY",
            direction: OrderDirection::Asc,
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
    fn test_zero_slot_template_is_capability_independent() {
        let none = CHANNELS.compose(CapabilitySet::empty()).unwrap();
        let all = CHANNELS.compose(CapabilitySet::all()).unwrap();
        assert_eq!(none, all);
        assert_eq!(none, CHANNELS.body);
    }

    #[test]
    fn test_where_clause_combines_dimensions() {
        let filter = ChannelFilter {
            name: "anthropic".to_string(),
            statuses: vec![ChannelStatus::Enabled, ChannelStatus::AutoDisabled],
            kinds: vec![ChannelKind::Anthropic],
        };
        let json = serde_json::to_value(filter.where_clause(CapabilitySet::empty()).unwrap())
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nameContainsFold": "anthropic",
                "statusIn": ["ENABLED", "AUTO_DISABLED"],
                "kindIn": ["ANTHROPIC"]
            })
        );
    }

    #[test]
    fn test_project_then_absorb_round_trips() {
        let filter = ChannelFilter {
            name: "azure".to_string(),
            statuses: vec![ChannelStatus::Disabled],
            kinds: vec![ChannelKind::AzureOpenai, ChannelKind::Openai],
        };
        let mut absorbed = ChannelFilter::default();
        assert!(absorbed.absorb(&filter.project()));
        assert_eq!(absorbed, filter);
    }

    #[test]
    fn test_unknown_facet_values_are_dropped_on_absorb() {
        use crate::filter::FilterValue;
        let mut filter = ChannelFilter::default();
        let columns = vec![ColumnFilter {
            id: COL_KIND,
            value: FilterValue::Many(vec!["SMTP".to_string(), "OPENAI".to_string()]),
        }];
        assert!(filter.absorb(&columns));
        assert_eq!(filter.kinds, vec![ChannelKind::Openai]);
    }

    #[test]
    fn test_row_decodes_wire_shape() {
        let json = serde_json::json!({
            "id": "018f3c5e-7b7a-7000-8000-00000000000a",
            "name": "anthropic-primary",
            "kind": "ANTHROPIC",
            "status": "ENABLED",
            "baseUrl": "https://api.anthropic.com",
            "priority": 1,
            "weight": 10,
            "createdAt": "2025-11-02T12:00:00Z"
        });
        let row: ChannelRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.kind, ChannelKind::Anthropic);
        assert_eq!(row.priority, 1);
    }
}
