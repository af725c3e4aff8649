//! Usage log list view.

use crate::nav::View;
use crate::state::App;
use crate::views::helpers::{list_layout, render_filter_bar, render_pager_bar};
use crate::widgets::{Column, DataTable};
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    widgets::Cell,
    Frame,
};

const COLUMNS: &[Column] = &[
    Column {
        header: "At",
        width: Constraint::Length(17),
    },
    Column {
        header: "Model",
        width: Constraint::Percentage(24),
    },
    Column {
        header: "Prompt",
        width: Constraint::Length(9),
    },
    Column {
        header: "Completion",
        width: Constraint::Length(11),
    },
    Column {
        header: "Cost",
        width: Constraint::Length(7),
    },
    Column {
        header: "User",
        width: Constraint::Percentage(14),
    },
    Column {
        header: "Channel",
        width: Constraint::Percentage(14),
    },
    Column {
        header: "Key",
        width: Constraint::Percentage(12),
    },
];

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let screen = &app.usage_view;
    let (filter_area, table_area, pager_area) = list_layout(area);

    render_filter_bar(f, app, View::UsageLogs, &screen.table.column_filters, filter_area);

    let rows = screen
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::from(row.at.format("%m-%d %H:%M:%S").to_string()),
                Cell::from(row.model.clone()),
                Cell::from(row.prompt_tokens.to_string()),
                Cell::from(row.completion_tokens.to_string()),
                Cell::from(row.quota_cost.to_string()),
                Cell::from(
                    row.user
                        .as_ref()
                        .map(|u| u.display_name.clone())
                        .unwrap_or_else(|| "—".to_string()),
                ),
                Cell::from(
                    row.channel
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "—".to_string()),
                ),
                Cell::from(
                    row.api_key
                        .as_ref()
                        .map(|k| k.name.clone())
                        .unwrap_or_else(|| "—".to_string()),
                ),
            ]
        })
        .collect();

    DataTable {
        title: format!("Usage ({})", screen.total_count),
        columns: COLUMNS,
        rows,
        selected: screen.selected,
        loading: screen.loading,
        header_style: Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
        row_style: Style::default().fg(app.theme.text),
        selected_style: Style::default()
            .fg(app.theme.text)
            .bg(app.theme.bg_highlight),
        border_style: Style::default().fg(app.theme.border),
    }
    .render(f, table_area);

    render_pager_bar(
        f,
        app,
        screen.rows.len(),
        screen.total_count,
        screen.pager.page_size(),
        screen.pager.cursor().is_none(),
        pager_area,
    );
}
