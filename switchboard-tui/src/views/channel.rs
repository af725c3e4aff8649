//! Provider channel list view.

use crate::nav::View;
use crate::state::App;
use crate::theme::channel_status_color;
use crate::views::helpers::{list_layout, render_filter_bar, render_pager_bar, two_column};
use crate::widgets::{Column, DataTable, DetailPanel};
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    widgets::Cell,
    Frame,
};

const COLUMNS: &[Column] = &[
    Column {
        header: "Name",
        width: Constraint::Percentage(30),
    },
    Column {
        header: "Kind",
        width: Constraint::Length(13),
    },
    Column {
        header: "Status",
        width: Constraint::Length(14),
    },
    Column {
        header: "Priority",
        width: Constraint::Length(9),
    },
    Column {
        header: "Weight",
        width: Constraint::Length(7),
    },
];

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let screen = &app.channel_view;
    let (filter_area, body_area, pager_area) = list_layout(area);
    let (table_area, detail_area) = two_column(body_area, 65);

    render_filter_bar(f, app, View::Channels, &screen.table.column_filters, filter_area);

    let rows = screen
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::from(row.name.clone()),
                Cell::from(row.kind.to_string()),
                Cell::from(row.status.to_string())
                    .style(Style::default().fg(channel_status_color(row.status, &app.theme))),
                Cell::from(row.priority.to_string()),
                Cell::from(row.weight.to_string()),
            ]
        })
        .collect();

    DataTable {
        title: format!("Channels ({})", screen.total_count),
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

    render_detail(f, app, detail_area);
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

fn render_detail(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let mut fields = Vec::new();
    if let Some(row) = app
        .channel_view
        .selected
        .and_then(|index| app.channel_view.rows.get(index))
    {
        fields.push(("ID", row.id.to_string()));
        fields.push(("Name", row.name.clone()));
        fields.push(("Kind", row.kind.to_string()));
        fields.push(("Status", row.status.to_string()));
        fields.push(("Base URL", row.base_url.clone()));
        fields.push(("Priority", row.priority.to_string()));
        fields.push(("Weight", row.weight.to_string()));
        fields.push(("Created", row.created_at.to_rfc3339()));
    }

    DetailPanel {
        title: "Details",
        fields,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, area);
}
