//! Switchboard GraphQL client layer.
//!
//! Everything between the console's screens and the control plane's GraphQL
//! endpoint: capability-gated query composition, the cursor-connection wire
//! shapes, pagination state, filter synchronization primitives and a cached,
//! deduplicating fetcher over an opaque transport.

pub mod compose;
pub mod connection;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pagination;
pub mod queries;
pub mod transport;
pub mod variables;

pub use compose::{composed, FieldFragment, QueryTemplate};
pub use connection::{Connection, Edge, PageInfo};
pub use error::{ClientError, ComposeError};
pub use fetch::{ConnectionFetcher, FetchSpec, QueryKey};
pub use filter::{ColumnFilter, FilterModel, FilterValue};
pub use pagination::Pager;
pub use transport::{Credentials, GraphqlResponse, GraphqlTransport, HttpTransport, TransportFailure};
pub use variables::{ListVariables, OrderBy, OrderDirection};
