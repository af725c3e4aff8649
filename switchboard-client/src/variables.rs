//! Request variables for paginated list queries.

use serde::Serialize;

/// Sort direction for an `orderBy` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Server-side ordering of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: OrderDirection,
}

/// Variables for one page of a cursor-paginated list:
/// `{ first, after?, where?, orderBy? }`.
///
/// `after` is the opaque cursor from [`crate::pagination::Pager`]; absent
/// dimensions are omitted from the serialized object entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListVariables<W: Serialize> {
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<W>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
}

impl<W: Serialize> ListVariables<W> {
    pub fn new(first: u32) -> Self {
        Self {
            first,
            after: None,
            where_clause: None,
            order_by: None,
        }
    }

    pub fn with_after(mut self, after: Option<String>) -> Self {
        self.after = after;
        self
    }

    pub fn with_where(mut self, where_clause: Option<W>) -> Self {
        self.where_clause = where_clause;
        self
    }

    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}
