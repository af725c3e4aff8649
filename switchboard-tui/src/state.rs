//! Application state.

use crate::config::TuiConfig;
use crate::events::PageResult;
use crate::list::{DataTableState, ListScreen};
use crate::nav::View;
use crate::notifications::{Notification, NotificationAction, NotificationLevel};
use crate::theme::GraphiteTheme;
use std::sync::Arc;
use switchboard_client::queries::api_keys::{self, ApiKeyFilter, ApiKeyRow};
use switchboard_client::queries::channels::{self, ChannelFilter, ChannelRow};
use switchboard_client::queries::traces::{self, TraceFilter, TraceRow};
use switchboard_client::queries::usage::{self, UsageFilter, UsageRow};
use switchboard_client::queries::users::{self, UserFilter, UserRow};
use switchboard_client::{
    filter::{many_entry, many_of, text_entry, text_of},
    ConnectionFetcher, QueryKey,
};
use switchboard_core::{Capability, CapabilitySet, SessionUser};

/// Page-size presets cycled by the grow/shrink actions.
pub const PAGE_SIZES: &[u32] = &[10, 25, 50, 100];

/// Filterable columns of a view: `(column id, is facet)`. Facet columns edit
/// as comma-separated value sets.
pub fn filter_columns(view: View) -> &'static [(&'static str, bool)] {
    match view {
        View::ApiKeys => &[
            (api_keys::COL_NAME, false),
            (api_keys::COL_STATUS, true),
            (api_keys::COL_USER, false),
        ],
        View::Channels => &[
            (channels::COL_NAME, false),
            (channels::COL_STATUS, true),
            (channels::COL_KIND, true),
        ],
        View::Users => &[
            (users::COL_USERNAME, false),
            (users::COL_ROLE, true),
            (users::COL_STATUS, true),
        ],
        View::UsageLogs => &[
            (usage::COL_MODEL, false),
            (usage::COL_USER, false),
            (usage::COL_CHANNEL, false),
            (usage::COL_API_KEY, false),
        ],
        View::RequestTraces => &[
            (traces::COL_MODEL, false),
            (traces::COL_STATUS, true),
            (traces::COL_USER, false),
            (traces::COL_CHANNEL, false),
        ],
    }
}

/// In-progress edit of one column filter.
#[derive(Debug, Clone)]
pub struct FilterEditor {
    pub column: usize,
    pub buffer: String,
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEditOutcome {
    Open,
    Closed,
    Committed { changed: bool },
}

pub struct App {
    pub config: TuiConfig,
    pub theme: GraphiteTheme,
    pub fetcher: Arc<ConnectionFetcher>,
    pub session: Option<SessionUser>,
    pub capabilities: CapabilitySet,
    pub active_view: View,

    pub api_key_view: ListScreen<ApiKeyRow, ApiKeyFilter>,
    pub channel_view: ListScreen<ChannelRow, ChannelFilter>,
    pub user_view: ListScreen<UserRow, UserFilter>,
    pub usage_view: ListScreen<UsageRow, UsageFilter>,
    pub trace_view: ListScreen<TraceRow, TraceFilter>,

    pub notifications: Vec<Notification>,
    pub filter_editor: Option<FilterEditor>,
    pub modal: Option<Modal>,
}

impl App {
    pub fn new(config: TuiConfig, fetcher: Arc<ConnectionFetcher>) -> Self {
        let page_size = config.page_size;
        Self {
            config,
            theme: GraphiteTheme::graphite(),
            fetcher,
            session: None,
            capabilities: CapabilitySet::empty(),
            active_view: View::ApiKeys,
            api_key_view: ListScreen::new(page_size),
            channel_view: ListScreen::new(page_size),
            user_view: ListScreen::new(page_size),
            usage_view: ListScreen::new(page_size),
            trace_view: ListScreen::new(page_size),
            notifications: Vec::new(),
            filter_editor: None,
            modal: None,
        }
    }

    /// Install the viewer record and derive the capability set from it.
    pub fn set_session(&mut self, user: SessionUser) {
        self.capabilities = CapabilitySet::resolve(Some(&user));
        self.session = Some(user);
    }

    /// Whether the active screen may issue its query at all.
    pub fn active_view_permitted(&self) -> bool {
        match self.active_view {
            View::Users => self.capabilities.allows(Capability::Users),
            _ => true,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn notify_fetch_failure(&mut self, message: String) {
        self.notifications.push(
            Notification::new(NotificationLevel::Error, message)
                .with_action(NotificationAction::Retry),
        );
    }

    /// Apply a fetched page to whichever screen it belongs to. Stale keys are
    /// discarded by the screen itself.
    pub fn apply_page(&mut self, key: QueryKey, page: PageResult) -> bool {
        match page {
            PageResult::ApiKeys(conn) => self.api_key_view.apply(key, conn),
            PageResult::Channels(conn) => self.channel_view.apply(key, conn),
            PageResult::Users(conn) => self.user_view.apply(key, conn),
            PageResult::Usage(conn) => self.usage_view.apply(key, conn),
            PageResult::Traces(conn) => self.trace_view.apply(key, conn),
        }
    }

    /// Record a failed fetch: stop the owning screen's spinner (current key
    /// only) and surface a retryable notification. Rows stay visible.
    pub fn fetch_failed(&mut self, key: QueryKey, message: String) {
        let current = self.api_key_view.fail(key)
            || self.channel_view.fail(key)
            || self.user_view.fail(key)
            || self.usage_view.fail(key)
            || self.trace_view.fail(key);
        if current {
            self.notify_fetch_failure(message);
        } else {
            tracing::debug!(key = %key, "ignoring failure of superseded fetch");
        }
    }

    pub fn select_next(&mut self) {
        match self.active_view {
            View::ApiKeys => self.api_key_view.select_next(),
            View::Channels => self.channel_view.select_next(),
            View::Users => self.user_view.select_next(),
            View::UsageLogs => self.usage_view.select_next(),
            View::RequestTraces => self.trace_view.select_next(),
        }
    }

    pub fn select_previous(&mut self) {
        match self.active_view {
            View::ApiKeys => self.api_key_view.select_previous(),
            View::Channels => self.channel_view.select_previous(),
            View::Users => self.user_view.select_previous(),
            View::UsageLogs => self.usage_view.select_previous(),
            View::RequestTraces => self.trace_view.select_previous(),
        }
    }

    /// Advance the active screen's pager. Returns whether the cursor moved
    /// (and a refetch is needed).
    pub fn next_page(&mut self) -> bool {
        match self.active_view {
            View::ApiKeys => self.api_key_view.pager.next_page(),
            View::Channels => self.channel_view.pager.next_page(),
            View::Users => self.user_view.pager.next_page(),
            View::UsageLogs => self.usage_view.pager.next_page(),
            View::RequestTraces => self.trace_view.pager.next_page(),
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.active_view {
            View::ApiKeys => self.api_key_view.pager.previous_page(),
            View::Channels => self.channel_view.pager.previous_page(),
            View::Users => self.user_view.pager.previous_page(),
            View::UsageLogs => self.usage_view.pager.previous_page(),
            View::RequestTraces => self.trace_view.pager.previous_page(),
        }
    }

    fn active_page_size(&self) -> u32 {
        match self.active_view {
            View::ApiKeys => self.api_key_view.pager.page_size(),
            View::Channels => self.channel_view.pager.page_size(),
            View::Users => self.user_view.pager.page_size(),
            View::UsageLogs => self.usage_view.pager.page_size(),
            View::RequestTraces => self.trace_view.pager.page_size(),
        }
    }

    /// Step the active screen's page size through the presets. Always lands
    /// back on page one. Returns whether the size changed.
    pub fn step_page_size(&mut self, grow: bool) -> bool {
        let current = self.active_page_size();
        let position = PAGE_SIZES.iter().position(|n| *n >= current);
        let target = match (position, grow) {
            (Some(i), true) if i + 1 < PAGE_SIZES.len() => PAGE_SIZES[i + 1],
            (Some(i), false) if i > 0 => PAGE_SIZES[i - 1],
            (None, false) => PAGE_SIZES[PAGE_SIZES.len() - 1],
            _ => return false,
        };
        if target == current {
            return false;
        }
        match self.active_view {
            View::ApiKeys => self.api_key_view.set_page_size(target),
            View::Channels => self.channel_view.set_page_size(target),
            View::Users => self.user_view.set_page_size(target),
            View::UsageLogs => self.usage_view.set_page_size(target),
            View::RequestTraces => self.trace_view.set_page_size(target),
        }
        true
    }

    fn active_table_mut(&mut self) -> &mut DataTableState {
        match self.active_view {
            View::ApiKeys => &mut self.api_key_view.table,
            View::Channels => &mut self.channel_view.table,
            View::Users => &mut self.user_view.table,
            View::UsageLogs => &mut self.usage_view.table,
            View::RequestTraces => &mut self.trace_view.table,
        }
    }

    pub fn active_table(&self) -> &DataTableState {
        match self.active_view {
            View::ApiKeys => &self.api_key_view.table,
            View::Channels => &self.channel_view.table,
            View::Users => &self.user_view.table,
            View::UsageLogs => &self.usage_view.table,
            View::RequestTraces => &self.trace_view.table,
        }
    }

    /// Inbound sync for the active screen; resets its cursor on change.
    fn sync_active_filters(&mut self) -> bool {
        match self.active_view {
            View::ApiKeys => self.api_key_view.sync_filters_from_table(),
            View::Channels => self.channel_view.sync_filters_from_table(),
            View::Users => self.user_view.sync_filters_from_table(),
            View::UsageLogs => self.usage_view.sync_filters_from_table(),
            View::RequestTraces => self.trace_view.sync_filters_from_table(),
        }
    }

    /// Drop every filter on the active screen. Returns whether anything was
    /// actually cleared.
    pub fn clear_active_filters(&mut self) -> bool {
        match self.active_view {
            View::ApiKeys => self.api_key_view.clear_filters(),
            View::Channels => self.channel_view.clear_filters(),
            View::Users => self.user_view.clear_filters(),
            View::UsageLogs => self.usage_view.clear_filters(),
            View::RequestTraces => self.trace_view.clear_filters(),
        }
    }

    /// Open the filter editor on the first filterable column, prefilled with
    /// the widget's current value.
    pub fn begin_filter_edit(&mut self) {
        let buffer = self.editor_prefill(0);
        self.filter_editor = Some(FilterEditor { column: 0, buffer });
    }

    fn editor_prefill(&self, column: usize) -> String {
        let columns = filter_columns(self.active_view);
        let Some((id, facet)) = columns.get(column) else {
            return String::new();
        };
        let table = self.active_table();
        if *facet {
            many_of(&table.column_filters, id).join(",")
        } else {
            text_of(&table.column_filters, id)
        }
    }

    /// Feed one key into the open filter editor.
    pub fn filter_edit_key(&mut self, key: crate::keys::FilterKey) -> FilterEditOutcome {
        use crate::keys::FilterKey;
        let Some(mut editor) = self.filter_editor.take() else {
            return FilterEditOutcome::Closed;
        };
        match key {
            FilterKey::Char(c) => {
                editor.buffer.push(c);
                self.filter_editor = Some(editor);
                FilterEditOutcome::Open
            }
            FilterKey::Backspace => {
                editor.buffer.pop();
                self.filter_editor = Some(editor);
                FilterEditOutcome::Open
            }
            FilterKey::NextColumn => {
                // Committing the current column before moving keeps the widget
                // state consistent with what the operator sees.
                self.store_editor_value(&editor);
                let columns = filter_columns(self.active_view);
                let column = (editor.column + 1) % columns.len().max(1);
                let buffer = self.editor_prefill(column);
                self.filter_editor = Some(FilterEditor { column, buffer });
                FilterEditOutcome::Open
            }
            FilterKey::Commit => {
                self.store_editor_value(&editor);
                let changed = self.sync_active_filters();
                FilterEditOutcome::Committed { changed }
            }
            FilterKey::Cancel => FilterEditOutcome::Closed,
        }
    }

    /// Write the editor buffer into the widget's column filters. An empty
    /// buffer removes the entry entirely, matching the outbound invariant
    /// that absent dimensions have no entry.
    fn store_editor_value(&mut self, editor: &FilterEditor) {
        let columns = filter_columns(self.active_view);
        let Some((id, facet)) = columns.get(editor.column).copied() else {
            return;
        };
        let entry = if facet {
            let values: Vec<String> = editor
                .buffer
                .split(',')
                .map(|v| v.trim().to_ascii_uppercase())
                .filter(|v| !v.is_empty())
                .collect();
            many_entry(id, values)
        } else {
            text_entry(id, editor.buffer.trim())
        };
        let table = self.active_table_mut();
        table.column_filters.retain(|c| c.id != id);
        if let Some(entry) = entry {
            table.column_filters.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::FilterKey;
    use async_trait::async_trait;
    use switchboard_client::{
        Connection, Edge, GraphqlResponse, GraphqlTransport, PageInfo, TransportFailure,
    };
    use switchboard_core::{Scope, UserId};
    use uuid::Uuid;

    struct NullTransport;

    #[async_trait]
    impl GraphqlTransport for NullTransport {
        async fn execute(
            &self,
            _query: &str,
            _variables: &serde_json::Value,
        ) -> Result<GraphqlResponse, TransportFailure> {
            Ok(GraphqlResponse {
                data: None,
                errors: Vec::new(),
            })
        }
    }

    fn test_config() -> TuiConfig {
        toml::from_str(
            r#"
graphql_url = "https://gateway.example.com/graphql"
request_timeout_ms = 5000
refresh_interval_ms = 2000
page_size = 25
log_path = "/tmp/switchboard.log"

[auth]
bearer_token = "tok"

[theme]
name = "graphite"
"#,
        )
        .unwrap()
    }

    fn test_app() -> App {
        let fetcher = Arc::new(ConnectionFetcher::new(Arc::new(NullTransport)));
        App::new(test_config(), fetcher)
    }

    fn owner() -> SessionUser {
        SessionUser {
            id: UserId::new(Uuid::now_v7()),
            display_name: "root".to_string(),
            is_owner: true,
            scopes: Vec::new(),
        }
    }

    fn scoped(scopes: &[&str]) -> SessionUser {
        SessionUser {
            id: UserId::new(Uuid::now_v7()),
            display_name: "op".to_string(),
            is_owner: false,
            scopes: scopes.iter().map(|s| Scope::new(*s)).collect(),
        }
    }

    fn page(ids: &[u32]) -> Connection<ApiKeyRow> {
        let edges = ids
            .iter()
            .map(|id| {
                let row: ApiKeyRow = serde_json::from_value(serde_json::json!({
                    "id": Uuid::now_v7(),
                    "name": format!("key-{}", id),
                    "status": "ENABLED",
                    "quotaLimit": null,
                    "quotaUsed": 0,
                    "createdAt": "2026-01-01T00:00:00Z",
                    "lastUsedAt": null
                }))
                .unwrap();
                Edge {
                    node: row,
                    cursor: format!("cur-{}", id),
                }
            })
            .collect::<Vec<_>>();
        Connection {
            page_info: PageInfo {
                has_next_page: true,
                has_previous_page: false,
                start_cursor: edges.first().map(|e| e.cursor.clone()),
                end_cursor: edges.last().map(|e| e.cursor.clone()),
            },
            total_count: ids.len() as u64,
            edges,
        }
    }

    #[test]
    fn test_session_derives_capabilities() {
        let mut app = test_app();
        assert_eq!(app.capabilities, CapabilitySet::empty());

        app.set_session(owner());
        assert_eq!(app.capabilities, CapabilitySet::all());
    }

    #[test]
    fn test_users_view_gated_on_capability() {
        let mut app = test_app();
        app.active_view = View::Users;
        app.set_session(scoped(&["read_channels"]));
        assert!(!app.active_view_permitted());

        app.set_session(scoped(&["read_users"]));
        assert!(app.active_view_permitted());
    }

    #[test]
    fn test_apply_page_routes_to_owning_screen() {
        let mut app = test_app();
        let key = QueryKey::new(
            "apiKeys",
            &serde_json::json!({ "first": 25 }),
            CapabilitySet::empty(),
        );
        app.api_key_view.begin_fetch(key);

        assert!(app.apply_page(key, PageResult::ApiKeys(page(&[1, 2]))));
        assert_eq!(app.api_key_view.rows.len(), 2);
    }

    #[test]
    fn test_superseded_failure_produces_no_notification() {
        let mut app = test_app();
        let old = QueryKey::new(
            "apiKeys",
            &serde_json::json!({ "first": 25 }),
            CapabilitySet::empty(),
        );
        app.api_key_view.begin_fetch(old);
        let current = QueryKey::new(
            "apiKeys",
            &serde_json::json!({ "first": 50 }),
            CapabilitySet::empty(),
        );
        app.api_key_view.begin_fetch(current);

        app.fetch_failed(old, "late failure".to_string());
        assert!(app.notifications.is_empty());

        app.fetch_failed(current, "real failure".to_string());
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(
            app.notifications[0].action,
            Some(NotificationAction::Retry)
        );
    }

    #[test]
    fn test_step_page_size_walks_presets() {
        let mut app = test_app();
        assert_eq!(app.api_key_view.pager.page_size(), 25);

        assert!(app.step_page_size(true));
        assert_eq!(app.api_key_view.pager.page_size(), 50);

        assert!(app.step_page_size(false));
        assert!(app.step_page_size(false));
        assert_eq!(app.api_key_view.pager.page_size(), 10);
        assert!(!app.step_page_size(false));
    }

    #[test]
    fn test_filter_edit_commit_updates_filters_and_resets_cursor() {
        let mut app = test_app();
        let key = QueryKey::new(
            "apiKeys",
            &serde_json::json!({ "first": 25 }),
            CapabilitySet::empty(),
        );
        app.api_key_view.begin_fetch(key);
        assert!(app.apply_page(key, PageResult::ApiKeys(page(&[1]))));
        assert!(app.api_key_view.pager.next_page());
        assert!(app.api_key_view.pager.cursor().is_some());

        app.begin_filter_edit();
        for c in "prod".chars() {
            assert_eq!(app.filter_edit_key(FilterKey::Char(c)), FilterEditOutcome::Open);
        }
        assert_eq!(
            app.filter_edit_key(FilterKey::Commit),
            FilterEditOutcome::Committed { changed: true }
        );

        assert_eq!(app.api_key_view.filters.name, "prod");
        assert_eq!(app.api_key_view.pager.cursor(), None);
        assert!(app.filter_editor.is_none());
    }

    #[test]
    fn test_filter_edit_commit_without_change_is_noop() {
        let mut app = test_app();
        app.begin_filter_edit();
        assert_eq!(
            app.filter_edit_key(FilterKey::Commit),
            FilterEditOutcome::Committed { changed: false }
        );
    }

    #[test]
    fn test_facet_column_edit_parses_csv() {
        let mut app = test_app();
        app.begin_filter_edit();
        // Move from the text "name" column to the facet "status" column.
        assert_eq!(
            app.filter_edit_key(FilterKey::NextColumn),
            FilterEditOutcome::Open
        );
        for c in "enabled, disabled".chars() {
            app.filter_edit_key(FilterKey::Char(c));
        }
        assert_eq!(
            app.filter_edit_key(FilterKey::Commit),
            FilterEditOutcome::Committed { changed: true }
        );
        assert_eq!(
            app.api_key_view.filters.statuses,
            vec![
                switchboard_core::ApiKeyStatus::Enabled,
                switchboard_core::ApiKeyStatus::Disabled
            ]
        );
    }

    #[test]
    fn test_clear_filters_is_noop_when_empty() {
        let mut app = test_app();
        assert!(!app.clear_active_filters());
    }
}
