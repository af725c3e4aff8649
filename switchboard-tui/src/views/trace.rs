//! Request trace list view.

use crate::nav::View;
use crate::state::App;
use crate::theme::trace_status_color;
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
        header: "Requested",
        width: Constraint::Length(17),
    },
    Column {
        header: "Model",
        width: Constraint::Percentage(24),
    },
    Column {
        header: "Status",
        width: Constraint::Length(15),
    },
    Column {
        header: "Latency",
        width: Constraint::Length(9),
    },
    Column {
        header: "User",
        width: Constraint::Percentage(16),
    },
    Column {
        header: "Channel",
        width: Constraint::Percentage(16),
    },
];

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let screen = &app.trace_view;
    let (filter_area, body_area, pager_area) = list_layout(area);
    let (table_area, detail_area) = two_column(body_area, 70);

    render_filter_bar(
        f,
        app,
        View::RequestTraces,
        &screen.table.column_filters,
        filter_area,
    );

    let rows = screen
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::from(row.requested_at.format("%m-%d %H:%M:%S").to_string()),
                Cell::from(row.model.clone()),
                Cell::from(row.status.to_string())
                    .style(Style::default().fg(trace_status_color(row.status, &app.theme))),
                Cell::from(format!("{} ms", row.latency_ms)),
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
            ]
        })
        .collect();

    DataTable {
        title: format!("Traces ({})", screen.total_count),
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
        .trace_view
        .selected
        .and_then(|index| app.trace_view.rows.get(index))
    {
        fields.push(("ID", row.id.to_string()));
        fields.push(("Requested", row.requested_at.to_rfc3339()));
        fields.push(("Model", row.model.clone()));
        fields.push(("Status", row.status.to_string()));
        fields.push(("Latency", format!("{} ms", row.latency_ms)));
        if let Some(error) = &row.error_message {
            fields.push(("Error", error.clone()));
        }
        if let Some(user) = &row.user {
            fields.push(("User", user.display_name.clone()));
        }
        if let Some(channel) = &row.channel {
            fields.push(("Channel", channel.name.clone()));
        }
    }

    DetailPanel {
        title: "Details",
        fields,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, area);
}
