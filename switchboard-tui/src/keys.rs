//! Keybinding definitions for the console.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    GrowPageSize,
    ShrinkPageSize,
    EditFilter,
    ClearFilters,
    Refresh,
    OpenHelp,
    Confirm,
    Cancel,
}

/// Keys routed to the filter editor while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Char(char),
    Backspace,
    NextColumn,
    Commit,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('f') | KeyCode::Char('/') => Some(Action::EditFilter),
        KeyCode::Char('F') => Some(Action::ClearFilters),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char(']') | KeyCode::Char('n') => Some(Action::NextPage),
        KeyCode::Char('[') | KeyCode::Char('p') => Some(Action::PrevPage),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::GrowPageSize),
        KeyCode::Char('-') => Some(Action::ShrinkPageSize),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = (c as usize).checked_sub('1' as usize)?;
            Some(Action::SwitchView(idx))
        }
        _ => None,
    }
}

pub fn map_filter_key(event: KeyEvent) -> Option<FilterKey> {
    let KeyEvent { code, modifiers, .. } = event;
    if modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match code {
        KeyCode::Char(c) => Some(FilterKey::Char(c)),
        KeyCode::Backspace => Some(FilterKey::Backspace),
        KeyCode::Tab => Some(FilterKey::NextColumn),
        KeyCode::Enter => Some(FilterKey::Commit),
        KeyCode::Esc => Some(FilterKey::Cancel),
        _ => None,
    }
}
