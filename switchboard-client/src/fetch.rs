//! Cached, deduplicating connection fetcher.
//!
//! Responses are keyed by `(entity, variables, capabilities)`. Capabilities
//! are part of the key because the composed query differs by capability set,
//! so a cache entry is only valid for the capability set it was fetched
//! under. The cache also guarantees at most one in-flight request per key:
//! concurrent fetches for the same key await the same initialization.

use crate::connection::Connection;
use crate::error::ClientError;
use crate::transport::{GraphqlTransport, TransportFailure};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use switchboard_core::CapabilitySet;

/// Identity of one response: the entity kind, the exact request variables
/// and the capability set the query was composed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    entity: &'static str,
    digest: [u8; 32],
}

impl QueryKey {
    pub fn new(
        entity: &'static str,
        variables: &serde_json::Value,
        capabilities: CapabilitySet,
    ) -> Self {
        // serde_json renders object keys sorted, so equal variable sets hash
        // equally regardless of construction order.
        let mut hasher = Sha256::new();
        hasher.update(entity.as_bytes());
        hasher.update([0u8]);
        hasher.update(variables.to_string().as_bytes());
        hasher.update([0u8, capabilities.bits()]);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Self { entity, digest }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity, &hex::encode(self.digest)[..8])
    }
}

/// Everything needed to run one composed list query.
#[derive(Debug, Clone)]
pub struct FetchSpec {
    /// Root field of the response data; doubles as the cache-key entity kind.
    pub entity: &'static str,
    /// Human-readable label attached to every surfaced error.
    pub context: &'static str,
    /// The composed query text.
    pub query: Arc<str>,
    pub variables: serde_json::Value,
    pub capabilities: CapabilitySet,
}

impl FetchSpec {
    pub fn key(&self) -> QueryKey {
        QueryKey::new(self.entity, &self.variables, self.capabilities)
    }
}

type CacheSlot = Arc<OnceCell<Arc<serde_json::Value>>>;

/// Executes composed queries against the transport with response caching and
/// in-flight deduplication.
pub struct ConnectionFetcher {
    transport: Arc<dyn GraphqlTransport>,
    cache: Mutex<HashMap<QueryKey, CacheSlot>>,
}

impl ConnectionFetcher {
    pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self {
            transport,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch one page of a cursor-paginated list, validated against the
    /// connection invariants for the requested page size.
    pub async fn fetch_connection<T: DeserializeOwned>(
        &self,
        spec: &FetchSpec,
    ) -> Result<Connection<T>, ClientError> {
        let data = self.data_for(spec).await?;
        let field = root_field(&data, spec)?;
        let connection: Connection<T> =
            serde_json::from_value(field.clone()).map_err(|source| ClientError::Decode {
                context: spec.context,
                source,
            })?;
        if let Some(first) = spec.variables.get("first").and_then(|v| v.as_u64()) {
            connection
                .validate(first as u32)
                .map_err(|detail| ClientError::Contract {
                    context: spec.context,
                    detail,
                })?;
        }
        Ok(connection)
    }

    /// Fetch a non-connection root field (e.g. the `viewer` record).
    pub async fn fetch_object<T: DeserializeOwned>(
        &self,
        spec: &FetchSpec,
    ) -> Result<T, ClientError> {
        let data = self.data_for(spec).await?;
        let field = root_field(&data, spec)?;
        serde_json::from_value(field.clone()).map_err(|source| ClientError::Decode {
            context: spec.context,
            source,
        })
    }

    /// Drop every cached response for an entity kind. Returns the number of
    /// evicted entries. Used by manual refresh.
    pub async fn invalidate_entity(&self, entity: &str) -> usize {
        let mut cache = self.cache.lock().await;
        let before = cache.len();
        cache.retain(|key, _| key.entity() != entity);
        before - cache.len()
    }

    async fn data_for(&self, spec: &FetchSpec) -> Result<Arc<serde_json::Value>, ClientError> {
        let key = spec.key();
        let slot: CacheSlot = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(key).or_default())
        };
        // Concurrent callers with the same key block on the same cell; a
        // failed initialization leaves the cell empty so a retry re-fetches.
        let value = slot
            .get_or_try_init(|| async {
                tracing::debug!(key = %key, context = spec.context, "executing query");
                let response = self
                    .transport
                    .execute(&spec.query, &spec.variables)
                    .await
                    .map_err(|source| match source {
                        TransportFailure::Envelope(source) => ClientError::Decode {
                            context: spec.context,
                            source,
                        },
                        other => ClientError::Transport {
                            context: spec.context,
                            source: other,
                        },
                    })?;
                if !response.errors.is_empty() {
                    let messages: Vec<String> =
                        response.errors.into_iter().map(|e| e.message).collect();
                    tracing::warn!(key = %key, ?messages, "server returned errors");
                    return Err(ClientError::Server {
                        context: spec.context,
                        messages,
                    });
                }
                let data = response.data.ok_or(ClientError::MissingData {
                    context: spec.context,
                    field: spec.entity,
                })?;
                Ok(Arc::new(data))
            })
            .await?;
        Ok(Arc::clone(value))
    }
}

fn root_field<'a>(
    data: &'a serde_json::Value,
    spec: &FetchSpec,
) -> Result<&'a serde_json::Value, ClientError> {
    match data.get(spec.entity) {
        Some(field) if !field.is_null() => Ok(field),
        _ => Err(ClientError::MissingData {
            context: spec.context,
            field: spec.entity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::GraphqlResponse;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    struct FakeTransport {
        calls: AtomicUsize,
        response: serde_json::Value,
    }

    impl FakeTransport {
        fn returning(response: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GraphqlTransport for FakeTransport {
        async fn execute(
            &self,
            _query: &str,
            _variables: &serde_json::Value,
        ) -> Result<GraphqlResponse, TransportFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Hold the response across an await point so concurrent callers
            // genuinely overlap in the dedup tests.
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            Ok(serde_json::from_value(self.response.clone())
                .expect("fake response must be a valid envelope"))
        }
    }

    fn page_envelope(ids: &[u32], has_next: bool) -> serde_json::Value {
        let edges: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "node": { "id": id },
                    "cursor": format!("cur-{}", id)
                })
            })
            .collect();
        serde_json::json!({
            "data": {
                "rows": {
                    "edges": edges,
                    "pageInfo": {
                        "hasNextPage": has_next,
                        "hasPreviousPage": false,
                        "startCursor": ids.first().map(|id| format!("cur-{}", id)),
                        "endCursor": ids.last().map(|id| format!("cur-{}", id))
                    },
                    "totalCount": ids.len()
                }
            }
        })
    }

    fn spec(variables: serde_json::Value, capabilities: CapabilitySet) -> FetchSpec {
        FetchSpec {
            entity: "rows",
            context: "rows screen",
            query: Arc::from("query { rows { edges { node { id } cursor } } }"),
            variables,
            capabilities,
        }
    }

    #[tokio::test]
    async fn test_fetch_decodes_typed_connection() {
        let transport = FakeTransport::returning(page_envelope(&[1, 2], true));
        let fetcher = ConnectionFetcher::new(transport);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let connection: Connection<Row> = fetcher.fetch_connection(&spec).await.unwrap();

        assert_eq!(connection.edges.len(), 2);
        assert_eq!(connection.edges[0].node, Row { id: 1 });
        assert!(connection.page_info.has_next_page);
    }

    #[tokio::test]
    async fn test_repeat_fetch_hits_cache() {
        let transport = FakeTransport::returning(page_envelope(&[1], false));
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport) as Arc<dyn GraphqlTransport>);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let _: Connection<Row> = fetcher.fetch_connection(&spec).await.unwrap();
        let _: Connection<Row> = fetcher.fetch_connection(&spec).await.unwrap();

        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_same_key_fetches_deduplicate() {
        let transport = FakeTransport::returning(page_envelope(&[1], false));
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport) as Arc<dyn GraphqlTransport>);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let (a, b) = tokio::join!(
            fetcher.fetch_connection::<Row>(&spec),
            fetcher.fetch_connection::<Row>(&spec),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_capability_sets_key_distinct_entries() {
        let transport = FakeTransport::returning(page_envelope(&[1], false));
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport) as Arc<dyn GraphqlTransport>);
        let variables = serde_json::json!({ "first": 10 });

        let _: Connection<Row> = fetcher
            .fetch_connection(&spec(variables.clone(), CapabilitySet::empty()))
            .await
            .unwrap();
        let _: Connection<Row> = fetcher
            .fetch_connection(&spec(variables, CapabilitySet::USERS))
            .await
            .unwrap();

        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_server_errors_surface_with_context() {
        let transport = FakeTransport::returning(serde_json::json!({
            "data": null,
            "errors": [{ "message": "field forbidden" }]
        }));
        let fetcher = ConnectionFetcher::new(transport);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let err = fetcher.fetch_connection::<Row>(&spec).await.unwrap_err();
        match err {
            ClientError::Server { context, messages } => {
                assert_eq!(context, "rows screen");
                assert_eq!(messages, vec!["field forbidden".to_string()]);
            }
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let transport = FakeTransport::returning(serde_json::json!({
            "data": null,
            "errors": [{ "message": "boom" }]
        }));
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport) as Arc<dyn GraphqlTransport>);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let _ = fetcher.fetch_connection::<Row>(&spec).await;
        let _ = fetcher.fetch_connection::<Row>(&spec).await;

        // Each manual retry reaches the transport again.
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_a_decode_error() {
        let transport = FakeTransport::returning(serde_json::json!({
            "data": { "rows": { "edges": "not-an-array" } }
        }));
        let fetcher = ConnectionFetcher::new(transport);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let err = fetcher.fetch_connection::<Row>(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { context: "rows screen", .. }));
    }

    #[tokio::test]
    async fn test_missing_root_field_is_reported() {
        let transport = FakeTransport::returning(serde_json::json!({ "data": {} }));
        let fetcher = ConnectionFetcher::new(transport);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let err = fetcher.fetch_connection::<Row>(&spec).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingData { field: "rows", .. }
        ));
    }

    #[tokio::test]
    async fn test_oversized_page_violates_contract() {
        let transport = FakeTransport::returning(page_envelope(&[1, 2, 3], false));
        let fetcher = ConnectionFetcher::new(transport);
        let spec = spec(serde_json::json!({ "first": 2 }), CapabilitySet::empty());

        let err = fetcher.fetch_connection::<Row>(&spec).await.unwrap_err();
        assert!(matches!(err, ClientError::Contract { .. }));
    }

    #[tokio::test]
    async fn test_invalidate_entity_forces_refetch() {
        let transport = FakeTransport::returning(page_envelope(&[1], false));
        let fetcher = ConnectionFetcher::new(Arc::clone(&transport) as Arc<dyn GraphqlTransport>);
        let spec = spec(serde_json::json!({ "first": 10 }), CapabilitySet::empty());

        let _: Connection<Row> = fetcher.fetch_connection(&spec).await.unwrap();
        assert_eq!(fetcher.invalidate_entity("rows").await, 1);
        let _: Connection<Row> = fetcher.fetch_connection(&spec).await.unwrap();

        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_variable_key_is_order_insensitive() {
        let a = QueryKey::new(
            "rows",
            &serde_json::json!({ "first": 10, "after": "c1" }),
            CapabilitySet::empty(),
        );
        let b = QueryKey::new(
            "rows",
            &serde_json::json!({ "after": "c1", "first": 10 }),
            CapabilitySet::empty(),
        );
        assert_eq!(a, b);
    }
}
