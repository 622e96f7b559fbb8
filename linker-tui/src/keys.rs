//! Keybinding definitions for the TUI.
//!
//! Two input modes: in `Normal` single keys are commands, in `Filter` they
//! edit the active view's query.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    /// Toggle selection of the row under the cursor.
    Select,
    OpenFilter,
    ClearFilter,
    Add,
    Delete,
    CreateLink,
    Refresh,
    OpenHelp,
    Input(char),
    Backspace,
    Confirm,
    Cancel,
}

pub fn map_key(mode: InputMode, event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('u') if mode == InputMode::Filter => Some(Action::ClearFilter),
            _ => None,
        };
    }

    match mode {
        InputMode::Filter => match code {
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            _ => None,
        },
        InputMode::Normal => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('/') => Some(Action::OpenFilter),
            KeyCode::Char('a') => Some(Action::Add),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::Delete),
            KeyCode::Char('l') => Some(Action::CreateLink),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Esc => Some(Action::ClearFilter),
            KeyCode::Tab => Some(Action::NextView),
            KeyCode::BackTab => Some(Action::PrevView),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Select),
            KeyCode::Char(c @ '1'..='3') => Some(Action::SwitchView(c as usize - '1' as usize)),
            _ => None,
        },
    }
}
