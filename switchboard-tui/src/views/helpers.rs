//! Shared layout helpers for list views.

use crate::nav::View;
use crate::state::{filter_columns, App};
use crate::widgets::{FilterBar, PagerBar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};
use switchboard_client::ColumnFilter;

/// Vertical split of a list view: filter bar, table, pager bar.
pub fn list_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Horizontal table/detail split.
pub fn two_column(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Render the filter bar for a view, wiring in the editor when it targets
/// this view's columns.
pub fn render_filter_bar(
    f: &mut Frame<'_>,
    app: &App,
    view: View,
    filters: &[ColumnFilter],
    area: Rect,
) {
    let editing_column = app
        .filter_editor
        .as_ref()
        .filter(|_| app.active_view == view)
        .and_then(|editor| filter_columns(view).get(editor.column))
        .map(|(id, _)| *id);
    FilterBar {
        filters,
        editor: app.filter_editor.as_ref().filter(|_| app.active_view == view),
        editing_column,
        active_style: Style::default().fg(app.theme.border_focus),
        dim_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, area);
}

/// Render the pager bar for a view.
pub fn render_pager_bar(
    f: &mut Frame<'_>,
    app: &App,
    shown: usize,
    total_count: u64,
    page_size: u32,
    on_first_page: bool,
    area: Rect,
) {
    PagerBar {
        page_size,
        shown,
        total_count,
        on_first_page,
        style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, area);
}
