//! View rendering dispatch.

pub mod api_key;
pub mod channel;
pub mod helpers;
pub mod trace;
pub mod usage;
pub mod user;

use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::ApiKeys => api_key::render(f, app, layout[1]),
        View::Channels => channel::render(f, app, layout[1]),
        View::Users => user::render(f, app, layout[1]),
        View::UsageLogs => usage::render(f, app, layout[1]),
        View::RequestTraces => trace::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(modal) = &app.modal {
        render_modal(f, app, modal);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let operator = app
        .session
        .as_ref()
        .map(|s| s.display_name.as_str())
        .unwrap_or("unauthenticated");
    let tabs: Vec<String> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| {
            if *view == app.active_view {
                format!("[{} {}]", i + 1, view.title())
            } else {
                format!(" {} {} ", i + 1, view.title())
            }
        })
        .collect();
    let title = format!("SWITCHBOARD | {} | {}", operator, tabs.join(""));
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let help = "j/k move • Tab view • [/] page • +/- page size • f filter • F clear • r refresh • q quit";
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "OK",
        };
        let color = match note.level {
            NotificationLevel::Info => app.theme.info,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
            NotificationLevel::Success => app.theme.success,
        };
        let hint = match note.action {
            Some(crate::notifications::NotificationAction::Retry) => " (r to retry)",
            _ => "",
        };
        (
            format!("{}: {}{}", label, note.message, hint),
            Style::default().fg(color),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal(f: &mut Frame<'_>, app: &App, modal: &crate::state::Modal) {
    let area = helpers::centered_rect(f.size(), 60, 40);
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(modal.message.clone())
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title(modal.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(paragraph, area);
}
