//! Bidirectional filter synchronization primitives.
//!
//! Two representations of the same filter information coexist: the screen's
//! filter state (one primitive or array per dimension, the source of truth
//! driving server queries) and the table widget's column filters (an array of
//! `{id, value}` entries driving the visible controls). The helpers here keep
//! the two bijective modulo ordering without ever forming an update cycle:
//! outbound projection is a full rebuild, and inbound absorption assigns only
//! on structural inequality, so re-absorbing a projection changes nothing.

/// Value of one column filter: a single text value or an unordered facet set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Many(Vec<String>),
}

/// One entry of the table widget's filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub id: &'static str,
    pub value: FilterValue,
}

/// Outbound projection of a text dimension. Empty means "no filter" and is
/// omitted entirely rather than projected as an entry with an empty value.
pub fn text_entry(id: &'static str, value: &str) -> Option<ColumnFilter> {
    if value.is_empty() {
        return None;
    }
    Some(ColumnFilter {
        id,
        value: FilterValue::Text(value.to_string()),
    })
}

/// Outbound projection of a faceted dimension; empty sets are omitted.
pub fn many_entry(id: &'static str, values: Vec<String>) -> Option<ColumnFilter> {
    if values.is_empty() {
        return None;
    }
    Some(ColumnFilter {
        id,
        value: FilterValue::Many(values),
    })
}

/// Inbound coercion of a single-value dimension: absent or faceted entries
/// collapse to the empty string / first element.
pub fn text_of(columns: &[ColumnFilter], id: &str) -> String {
    match columns.iter().find(|c| c.id == id).map(|c| &c.value) {
        Some(FilterValue::Text(value)) => value.clone(),
        Some(FilterValue::Many(values)) => values.first().cloned().unwrap_or_default(),
        None => String::new(),
    }
}

/// Inbound coercion of a faceted dimension: absent entries default to the
/// empty set; a stray single value becomes a one-element set.
pub fn many_of(columns: &[ColumnFilter], id: &str) -> Vec<String> {
    match columns.iter().find(|c| c.id == id).map(|c| &c.value) {
        Some(FilterValue::Many(values)) => values.clone(),
        Some(FilterValue::Text(value)) if !value.is_empty() => vec![value.clone()],
        _ => Vec::new(),
    }
}

/// Order-insensitive set equality. Facet sets are unordered, so comparing
/// them positionally is not equality at all and would loop the sync.
pub fn unordered_eq<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a == b
}

/// Assign a text dimension only if the incoming value differs.
/// Returns whether an assignment happened.
pub fn assign_text(current: &mut String, incoming: String) -> bool {
    if *current == incoming {
        return false;
    }
    *current = incoming;
    true
}

/// Assign a facet dimension only if the incoming set differs under
/// order-insensitive equality. Returns whether an assignment happened.
pub fn assign_set<T: Ord + Clone>(current: &mut Vec<T>, incoming: Vec<T>) -> bool {
    if unordered_eq(current, &incoming) {
        return false;
    }
    *current = incoming;
    true
}

/// Bidirectional synchronization between a screen's filter state and the
/// table widget's column filters.
pub trait FilterModel {
    /// Outbound: rebuild the full column-filter array from scratch,
    /// projecting each non-default dimension into one entry.
    fn project(&self) -> Vec<ColumnFilter>;

    /// Inbound: coerce each relevant column's value and assign it only when
    /// structurally different. Returns whether any dimension changed, so the
    /// caller knows to reset the cursor and refetch. Idempotent: absorbing
    /// the same columns twice changes nothing the second time.
    fn absorb(&mut self, columns: &[ColumnFilter]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_dimension_is_omitted() {
        assert_eq!(text_entry("name", ""), None);
        assert!(text_entry("name", "prod").is_some());
    }

    #[test]
    fn test_empty_facet_dimension_is_omitted() {
        assert_eq!(many_entry("status", Vec::new()), None);
        assert!(many_entry("status", vec!["ENABLED".to_string()]).is_some());
    }

    #[test]
    fn test_text_of_defaults_to_empty_string() {
        assert_eq!(text_of(&[], "name"), "");
    }

    #[test]
    fn test_many_of_defaults_to_empty_set() {
        assert_eq!(many_of(&[], "status"), Vec::<String>::new());
    }

    #[test]
    fn test_many_of_coerces_single_value() {
        let columns = vec![ColumnFilter {
            id: "status",
            value: FilterValue::Text("ENABLED".to_string()),
        }];
        assert_eq!(many_of(&columns, "status"), vec!["ENABLED".to_string()]);
    }

    #[test]
    fn test_unordered_eq_ignores_order() {
        let a = vec!["enabled", "disabled"];
        let b = vec!["disabled", "enabled"];
        assert!(unordered_eq(&a, &b));
    }

    #[test]
    fn test_unordered_eq_respects_multiplicity() {
        let a = vec!["x", "x", "y"];
        let b = vec!["x", "y", "y"];
        assert!(!unordered_eq(&a, &b));
    }

    #[test]
    fn test_assign_text_skips_equal_value() {
        let mut current = "prod".to_string();
        assert!(!assign_text(&mut current, "prod".to_string()));
        assert!(assign_text(&mut current, "staging".to_string()));
        assert_eq!(current, "staging");
    }

    #[test]
    fn test_assign_set_skips_reordered_equal_set() {
        let mut current = vec!["enabled".to_string(), "disabled".to_string()];
        let reordered = vec!["disabled".to_string(), "enabled".to_string()];
        assert!(!assign_set(&mut current, reordered));
        // The original ordering is preserved when nothing changed.
        assert_eq!(current, vec!["enabled".to_string(), "disabled".to_string()]);
    }

    #[test]
    fn test_assign_set_applies_real_change() {
        let mut current = vec!["enabled".to_string()];
        assert!(assign_set(&mut current, vec!["disabled".to_string()]));
        assert_eq!(current, vec!["disabled".to_string()]);
    }
}
