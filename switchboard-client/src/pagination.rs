//! Cursor pagination state.

use crate::connection::PageInfo;

/// Tracks the page size and active cursor for one list screen.
///
/// The cursor is an opaque server-issued token: it is stored and echoed back
/// in the `after` variable, never parsed or constructed here. Movement is
/// only permitted when the last-seen `PageInfo` confirms a page exists in
/// that direction; everything else is a defensive no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: u32,
    cursor: Option<String>,
    page_info: Option<PageInfo>,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            cursor: None,
            page_info: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Record the `PageInfo` of a successfully applied page. Until the next
    /// record, this is what authorizes movement.
    pub fn record(&mut self, info: &PageInfo) {
        self.page_info = Some(info.clone());
    }

    /// Advance to the next page if the last-seen `PageInfo` allows it.
    /// Returns whether the cursor moved. The pending `PageInfo` is consumed
    /// so a second call before the next page arrives is a no-op.
    pub fn next_page(&mut self) -> bool {
        let Some(info) = &self.page_info else {
            return false;
        };
        if !info.has_next_page {
            return false;
        }
        let Some(end_cursor) = info.end_cursor.clone() else {
            return false;
        };
        self.cursor = Some(end_cursor);
        self.page_info = None;
        true
    }

    /// Move to the previous page if the last-seen `PageInfo` allows it.
    pub fn previous_page(&mut self) -> bool {
        let Some(info) = &self.page_info else {
            return false;
        };
        if !info.has_previous_page {
            return false;
        }
        let Some(start_cursor) = info.start_cursor.clone() else {
            return false;
        };
        self.cursor = Some(start_cursor);
        self.page_info = None;
        true
    }

    /// Change the page size and return to the first page. The accumulated
    /// cursor is meaningless under a new page size, so it is always cleared.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
        self.cursor = None;
        self.page_info = None;
    }

    /// Return to the first page. Every filter change must call this before
    /// the next fetch.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
        self.page_info = None;
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_page_info() -> impl Strategy<Value = PageInfo> {
        (
            any::<bool>(),
            any::<bool>(),
            proptest::option::of("[a-z0-9]{4,12}"),
            proptest::option::of("[a-z0-9]{4,12}"),
        )
            .prop_map(|(has_next, has_prev, start, end)| PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: start,
                end_cursor: end,
            })
    }

    #[derive(Debug, Clone)]
    enum Op {
        Record(PageInfo),
        Next,
        Previous,
        SetPageSize(u32),
        ResetCursor,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arb_page_info().prop_map(Op::Record),
            Just(Op::Next),
            Just(Op::Previous),
            (1u32..=100).prop_map(Op::SetPageSize),
            Just(Op::ResetCursor),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Whatever happened before, `set_page_size` lands on page one.
        #[test]
        fn prop_set_page_size_clears_cursor(
            ops in prop::collection::vec(arb_op(), 0..20),
            size in 1u32..=100,
        ) {
            let mut pager = Pager::new(25);
            for op in ops {
                match op {
                    Op::Record(info) => pager.record(&info),
                    Op::Next => { pager.next_page(); }
                    Op::Previous => { pager.previous_page(); }
                    Op::SetPageSize(n) => pager.set_page_size(n),
                    Op::ResetCursor => pager.reset_cursor(),
                }
            }
            pager.set_page_size(size);
            prop_assert_eq!(pager.cursor(), None);
            prop_assert_eq!(pager.page_size(), size);
        }

        /// The cursor only ever holds a value handed out by a recorded
        /// PageInfo; movement never fabricates cursor contents.
        #[test]
        fn prop_cursor_only_from_page_info(ops in prop::collection::vec(arb_op(), 0..30)) {
            let mut pager = Pager::new(25);
            let mut issued: Vec<String> = Vec::new();
            for op in ops {
                match op {
                    Op::Record(info) => {
                        issued.extend(info.start_cursor.iter().cloned());
                        issued.extend(info.end_cursor.iter().cloned());
                        pager.record(&info);
                    }
                    Op::Next => { pager.next_page(); }
                    Op::Previous => { pager.previous_page(); }
                    Op::SetPageSize(n) => pager.set_page_size(n),
                    Op::ResetCursor => pager.reset_cursor(),
                }
                if let Some(cursor) = pager.cursor() {
                    prop_assert!(issued.iter().any(|c| c == cursor));
                }
            }
        }
    }
}
