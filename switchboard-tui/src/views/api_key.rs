//! API key list view.

use crate::nav::View;
use crate::state::App;
use crate::theme::api_key_status_color;
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
        header: "Status",
        width: Constraint::Length(11),
    },
    Column {
        header: "Quota",
        width: Constraint::Length(18),
    },
    Column {
        header: "Owner",
        width: Constraint::Percentage(20),
    },
    Column {
        header: "Created",
        width: Constraint::Length(11),
    },
];

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let screen = &app.api_key_view;
    let (filter_area, body_area, pager_area) = list_layout(area);
    let (table_area, detail_area) = two_column(body_area, 65);

    render_filter_bar(f, app, View::ApiKeys, &screen.table.column_filters, filter_area);

    let rows = screen
        .rows
        .iter()
        .map(|row| {
            let quota = match row.quota_limit {
                Some(limit) => format!("{}/{}", row.quota_used, limit),
                None => format!("{}/∞", row.quota_used),
            };
            vec![
                Cell::from(row.name.clone()),
                Cell::from(row.status.to_string())
                    .style(Style::default().fg(api_key_status_color(row.status, &app.theme))),
                Cell::from(quota),
                Cell::from(
                    row.user
                        .as_ref()
                        .map(|u| u.display_name.clone())
                        .unwrap_or_else(|| "—".to_string()),
                ),
                Cell::from(row.created_at.format("%Y-%m-%d").to_string()),
            ]
        })
        .collect();

    DataTable {
        title: format!("API Keys ({})", screen.total_count),
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
        .api_key_view
        .selected
        .and_then(|index| app.api_key_view.rows.get(index))
    {
        fields.push(("ID", row.id.to_string()));
        fields.push(("Name", row.name.clone()));
        fields.push(("Status", row.status.to_string()));
        fields.push(("Quota used", row.quota_used.to_string()));
        if let Some(limit) = row.quota_limit {
            fields.push(("Quota limit", limit.to_string()));
        }
        if let Some(user) = &row.user {
            fields.push(("Owner", user.display_name.clone()));
        }
        fields.push(("Created", row.created_at.to_rfc3339()));
        if let Some(last_used) = row.last_used_at {
            fields.push(("Last used", last_used.to_rfc3339()));
        }
    }

    DetailPanel {
        title: "Details",
        fields,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, area);
}
