//! Generic list-screen state.
//!
//! One `ListScreen` per entity wires the pieces together: the screen-owned
//! filter state, the pager, the table widget's column filters and the rows of
//! the last applied page. Fetches are identified by their [`QueryKey`]; a
//! result is applied only while its key is still the screen's current fetch,
//! so a page-2 response that resolves after the operator already changed
//! filters and requested the new page 1 is discarded, not applied.

use switchboard_client::{ColumnFilter, Connection, FilterModel, Pager, QueryKey};

/// Table-widget-owned filter state: the visible `{id, value}` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTableState {
    pub column_filters: Vec<ColumnFilter>,
}

#[derive(Debug, Clone)]
pub struct ListScreen<T, F> {
    pub rows: Vec<T>,
    pub total_count: u64,
    pub selected: Option<usize>,
    pub filters: F,
    pub pager: Pager,
    pub table: DataTableState,
    pub loading: bool,
    current_key: Option<QueryKey>,
}

impl<T, F: FilterModel + Default> ListScreen<T, F> {
    pub fn new(page_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
            selected: None,
            filters: F::default(),
            pager: Pager::new(page_size),
            table: DataTableState::default(),
            loading: false,
            current_key: None,
        }
    }
}

impl<T, F: FilterModel> ListScreen<T, F> {
    /// Mark a fetch as in flight. Its key supersedes any earlier fetch.
    pub fn begin_fetch(&mut self, key: QueryKey) {
        self.loading = true;
        self.current_key = Some(key);
    }

    pub fn current_key(&self) -> Option<QueryKey> {
        self.current_key
    }

    /// Apply a fetched page if `key` is still the current fetch. Returns
    /// whether the page was applied; a stale key leaves everything untouched.
    pub fn apply(&mut self, key: QueryKey, connection: Connection<T>) -> bool {
        if self.current_key != Some(key) {
            return false;
        }
        self.pager.record(&connection.page_info);
        self.total_count = connection.total_count;
        self.rows = connection.edges.into_iter().map(|edge| edge.node).collect();
        self.loading = false;
        self.selected = match self.selected {
            Some(index) if !self.rows.is_empty() => Some(index.min(self.rows.len() - 1)),
            _ if self.rows.is_empty() => None,
            _ => Some(0),
        };
        true
    }

    /// Note a failed fetch. Loading stops only if the failure belongs to the
    /// current fetch; prior rows stay visible either way.
    pub fn fail(&mut self, key: QueryKey) -> bool {
        if self.current_key != Some(key) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Outbound sync: rebuild the widget's column filters from the screen's
    /// filter state.
    pub fn sync_table_from_filters(&mut self) {
        self.table.column_filters = self.filters.project();
    }

    /// Inbound sync: absorb the widget's column filters. On a real change the
    /// cursor resets to page one before the caller issues the next fetch.
    pub fn sync_filters_from_table(&mut self) -> bool {
        let columns = self.table.column_filters.clone();
        let changed = self.filters.absorb(&columns);
        if changed {
            self.pager.reset_cursor();
        }
        changed
    }

    /// Change the page size; always lands back on page one.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.pager.set_page_size(page_size);
    }

    /// Drop every filter dimension and return to page one.
    pub fn clear_filters(&mut self) -> bool {
        self.table.column_filters.clear();
        self.sync_filters_from_table()
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1) % self.rows.len(),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.rows.len() - 1,
            Some(index) => index - 1,
        });
    }
}
