//! User account list view.
//!
//! Gated on `Capability::Users`: without it the screen renders a permission
//! notice and the console never issues the query.

use crate::nav::View;
use crate::state::App;
use crate::theme::user_status_color;
use crate::views::helpers::{list_layout, render_filter_bar, render_pager_bar};
use crate::widgets::{Column, DataTable};
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph},
    Frame,
};

const COLUMNS: &[Column] = &[
    Column {
        header: "Username",
        width: Constraint::Percentage(22),
    },
    Column {
        header: "Display name",
        width: Constraint::Percentage(28),
    },
    Column {
        header: "Role",
        width: Constraint::Length(10),
    },
    Column {
        header: "Status",
        width: Constraint::Length(11),
    },
    Column {
        header: "Quota used",
        width: Constraint::Length(12),
    },
];

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    if !app.active_view_permitted() {
        let notice = Paragraph::new("Viewing users requires the read_users scope.")
            .style(Style::default().fg(app.theme.warning))
            .block(Block::default().title("Users").borders(Borders::ALL));
        f.render_widget(notice, area);
        return;
    }

    let screen = &app.user_view;
    let (filter_area, table_area, pager_area) = list_layout(area);

    render_filter_bar(f, app, View::Users, &screen.table.column_filters, filter_area);

    let rows = screen
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::from(row.username.clone()),
                Cell::from(row.display_name.clone()),
                Cell::from(row.role.to_string()),
                Cell::from(row.status.to_string())
                    .style(Style::default().fg(user_status_color(row.status, &app.theme))),
                Cell::from(row.quota_used.to_string()),
            ]
        })
        .collect();

    DataTable {
        title: format!("Users ({})", screen.total_count),
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
