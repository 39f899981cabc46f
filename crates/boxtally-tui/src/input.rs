// Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{ChartTab, ViewState};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Redraw,
    Ignore,
}

/// Translate a key press into a view-state change or a quit request.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> KeyAction {
    // crossterm reports Press and Release on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return KeyAction::Quit;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            state.select_next();
            KeyAction::Redraw
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            state.select_prev();
            KeyAction::Redraw
        }

        // Chart switching
        KeyCode::Char('1') => {
            state.chart = ChartTab::Ranking;
            KeyAction::Redraw
        }
        KeyCode::Char('2') => {
            state.chart = ChartTab::Trend;
            KeyAction::Redraw
        }
        KeyCode::Char('3') => {
            state.chart = ChartTab::Normalized;
            KeyAction::Redraw
        }
        _ => KeyAction::Ignore,
    }
}
