//! Error types for the client layer.
//!
//! Every fetch-boundary error carries the screen's context label so the
//! console can report it in a notification without extra bookkeeping.
//! Validation failures are kept distinct from transport failures so a
//! mismatched backend version is diagnosable from the notification alone.

use crate::transport::TransportFailure;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network failure or non-2xx response.
    #[error("{context}: transport error: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: TransportFailure,
    },
    /// The server answered with GraphQL `errors`.
    #[error("{context}: server errors: {}", messages.join("; "))]
    Server {
        context: &'static str,
        messages: Vec<String>,
    },
    /// A payload did not match the expected schema.
    #[error("{context}: payload validation failed: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The response parsed but violated a connection invariant.
    #[error("{context}: contract violation: {detail}")]
    Contract {
        context: &'static str,
        detail: String,
    },
    /// `data` was null or missing the requested root field.
    #[error("{context}: response contained no data for `{field}`")]
    MissingData {
        context: &'static str,
        field: &'static str,
    },
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl ClientError {
    /// The screen label this error occurred under.
    pub fn context(&self) -> &'static str {
        match self {
            ClientError::Transport { context, .. }
            | ClientError::Server { context, .. }
            | ClientError::Decode { context, .. }
            | ClientError::Contract { context, .. }
            | ClientError::MissingData { context, .. } => context,
            ClientError::Compose(_) => "query composition",
        }
    }
}

/// Programmer errors in a query template or its fragment table.
///
/// These are raised at composition time, before any network traffic, so a
/// malformed template fails fast instead of silently dropping fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("template `{template}` references slot `{{{{{slot}}}}}` with no fragment bound")]
    UnboundSlot { template: &'static str, slot: String },
    #[error("template `{template}` binds fragment for slot `{slot}` that never occurs in the body")]
    UnusedFragment {
        template: &'static str,
        slot: &'static str,
    },
    #[error("template `{template}` binds slot `{slot}` more than once")]
    DuplicateFragment {
        template: &'static str,
        slot: &'static str,
    },
    #[error("template `{template}` has an unterminated slot marker")]
    UnterminatedSlot { template: &'static str },
}
