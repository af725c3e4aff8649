//! Session bootstrap query.
//!
//! Fetches the `viewer` record the capability set is derived from. Runs once
//! at startup with an empty capability set; everything in it is ungated.

use crate::compose::{composed, QueryTemplate};
use crate::error::ClientError;
use crate::fetch::FetchSpec;
use switchboard_core::CapabilitySet;

pub const ENTITY: &str = "viewer";
pub const CONTEXT: &str = "session";

pub const VIEWER: QueryTemplate = QueryTemplate {
    name: "Viewer",
    body: "\
query Viewer {
  viewer {
    id
    displayName
    isOwner
    scopes
  }
}",
    fragments: &[],
};

/// Assemble the fetch spec for the viewer record.
pub fn viewer_spec() -> Result<FetchSpec, ClientError> {
    let query = composed(&VIEWER, CapabilitySet::empty())?;
    Ok(FetchSpec {
        entity: ENTITY,
        context: CONTEXT,
        query,
        variables: serde_json::Value::Object(serde_json::Map::new()),
        capabilities: CapabilitySet::empty(),
    })
}
