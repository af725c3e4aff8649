//! Event types for the console event loop.
//!
//! Fetch results come back tagged with the [`QueryKey`] they were requested
//! under; a screen only applies a page whose key still matches its current
//! fetch, so a superseded response can never overwrite newer state.

use crossterm::event::KeyEvent;
use switchboard_client::queries::api_keys::ApiKeyRow;
use switchboard_client::queries::channels::ChannelRow;
use switchboard_client::queries::traces::TraceRow;
use switchboard_client::queries::usage::UsageRow;
use switchboard_client::queries::users::UserRow;
use switchboard_client::{Connection, QueryKey};
use switchboard_core::SessionUser;

/// One page of results for whichever screen requested it.
#[derive(Debug, Clone)]
pub enum PageResult {
    ApiKeys(Connection<ApiKeyRow>),
    Channels(Connection<ChannelRow>),
    Users(Connection<UserRow>),
    Usage(Connection<UsageRow>),
    Traces(Connection<TraceRow>),
}

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    SessionLoaded(Box<SessionUser>),
    SessionFailed(String),
    PageLoaded { key: QueryKey, page: Box<PageResult> },
    FetchFailed { key: QueryKey, message: String },
}
