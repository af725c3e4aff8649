//! GraphQL transport.
//!
//! The transport is deliberately opaque to the rest of the crate: a function
//! from `{query, variables}` to `{data, errors}`. [`HttpTransport`] is the
//! production implementation; tests substitute their own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Failures below the GraphQL layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportFailure {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("transport configuration error: {0}")]
    Config(String),
}

/// One GraphQL error entry from the response `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
    #[serde(default)]
    pub path: Option<serde_json::Value>,
}

/// The `{data, errors?}` response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorMessage>,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

/// Opaque request function the fetcher runs composed queries through.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<GraphqlResponse, TransportFailure>;
}

/// Credentials attached to every request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
}

/// reqwest-backed transport POSTing to a single GraphQL endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    auth_header: HeaderMap,
}

impl HttpTransport {
    pub fn new(
        endpoint: &str,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, TransportFailure> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let auth_header = build_auth_headers(credentials)?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth_header,
        })
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn execute(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<GraphqlResponse, TransportFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.auth_header.clone())
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str::<GraphqlResponse>(&text)?)
    }
}

fn build_auth_headers(credentials: &Credentials) -> Result<HeaderMap, TransportFailure> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &credentials.api_key {
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(api_key).map_err(|e| TransportFailure::Config(e.to_string()))?,
        );
    }
    if let Some(token) = &credentials.bearer_token {
        let value = format!("Bearer {}", token);
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| TransportFailure::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_data_and_errors() {
        let json = r#"{
            "data": { "apiKeys": null },
            "errors": [
                { "message": "unauthorized field", "path": ["apiKeys", "edges"] }
            ]
        }"#;
        let envelope: GraphqlResponse = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_some());
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].message, "unauthorized field");
    }

    #[test]
    fn test_envelope_defaults_absent_error_array() {
        let envelope: GraphqlResponse = serde_json::from_str(r#"{ "data": {} }"#).unwrap();
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn test_request_body_uses_wire_field_names() {
        let variables = serde_json::json!({ "first": 10 });
        let body = serde_json::to_value(GraphqlRequest {
            query: "query { viewer { id } }",
            variables: &variables,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query": "query { viewer { id } }",
                "variables": { "first": 10 }
            })
        );
    }

    #[test]
    fn test_rejects_invalid_header_values() {
        let credentials = Credentials {
            api_key: Some("bad\nkey".to_string()),
            bearer_token: None,
        };
        assert!(matches!(
            build_auth_headers(&credentials),
            Err(TransportFailure::Config(_))
        ));
    }
}
