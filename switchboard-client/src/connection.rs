//! Cursor-connection wire shapes.
//!
//! Every paginated list query returns this exact shape: `edges[].node`,
//! `edges[].cursor`, `pageInfo` and `totalCount`. Cursors are opaque
//! server-issued tokens and are never decoded client-side.

use serde::Deserialize;

/// Pagination metadata reported by the server for one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One row plus the cursor addressing it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// A page of a cursor-paginated list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

impl<T> Connection<T> {
    /// Zero edges is a valid state, rendered as "no data", never an error.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Check the connection invariants against the requested page size.
    ///
    /// `edges.len() <= first`, and `endCursor` is present iff edges are
    /// non-empty. A violation means the backend broke contract.
    pub fn validate(&self, requested: u32) -> Result<(), String> {
        if self.edges.len() > requested as usize {
            return Err(format!(
                "server returned {} edges for a page size of {}",
                self.edges.len(),
                requested
            ));
        }
        if self.edges.is_empty() != self.page_info.end_cursor.is_none() {
            return Err(format!(
                "endCursor presence disagrees with {} edges",
                self.edges.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page<T>(edges: Vec<Edge<T>>, end_cursor: Option<&str>) -> Connection<T> {
        Connection {
            page_info: PageInfo {
                has_next_page: end_cursor.is_some(),
                has_previous_page: false,
                start_cursor: edges.first().map(|e| e.cursor.clone()),
                end_cursor: end_cursor.map(str::to_string),
            },
            total_count: edges.len() as u64,
            edges,
        }
    }

    #[test]
    fn test_decodes_wire_shape() {
        let json = r#"{
            "edges": [
                { "node": { "id": 1 }, "cursor": "b3BhcXVlLTE=" },
                { "node": { "id": 2 }, "cursor": "b3BhcXVlLTI=" }
            ],
            "pageInfo": {
                "hasNextPage": true,
                "hasPreviousPage": false,
                "startCursor": "b3BhcXVlLTE=",
                "endCursor": "b3BhcXVlLTI="
            },
            "totalCount": 17
        }"#;
        let conn: Connection<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(conn.edges.len(), 2);
        assert_eq!(conn.nodes().count(), 2);
        assert_eq!(conn.total_count, 17);
        assert!(conn.page_info.has_next_page);
        assert_eq!(conn.page_info.end_cursor.as_deref(), Some("b3BhcXVlLTI="));
    }

    #[test]
    fn test_validate_accepts_well_formed_page() {
        let conn = page(
            vec![Edge {
                node: 1,
                cursor: "c1".to_string(),
            }],
            Some("c1"),
        );
        assert!(conn.validate(10).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        let edges = (0..3)
            .map(|i| Edge {
                node: i,
                cursor: format!("c{}", i),
            })
            .collect();
        let conn = page(edges, Some("c2"));
        assert!(conn.validate(2).is_err());
    }

    #[test]
    fn test_validate_rejects_cursor_on_empty_page() {
        let mut conn = page::<i32>(Vec::new(), None);
        conn.page_info.end_cursor = Some("ghost".to_string());
        assert!(conn.validate(10).is_err());
    }

    #[test]
    fn test_empty_page_is_valid_not_an_error() {
        let conn = page::<i32>(Vec::new(), None);
        assert!(conn.is_empty());
        assert!(conn.validate(25).is_ok());
    }
}
