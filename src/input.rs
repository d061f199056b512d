//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] mutations or [`Action`] values
//! for the event loop to execute. Text entry and confirmation modes
//! intercept keys before the normal bindings apply.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{Action, App, Mode, Tab};

/// Process a single key event.
///
/// Only reacts to key-press events (ignoring release / repeat) so that
/// each physical keypress triggers exactly one action. Returns the
/// network operation to run, if the key completed one.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match app.mode {
        Mode::Input { .. } => match key.code {
            KeyCode::Enter => app.commit_input(Instant::now()),
            KeyCode::Esc => {
                app.cancel();
                None
            }
            KeyCode::Backspace => {
                app.backspace();
                None
            }
            KeyCode::Char(c) => {
                app.push_char(c);
                None
            }
            _ => None,
        },

        Mode::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm(),
            KeyCode::Char('n') | KeyCode::Esc => {
                app.cancel();
                None
            }
            _ => None,
        },

        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                app.quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Right => {
                app.next_tab();
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                app.prev_tab();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.cursor_down();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.cursor_up();
                None
            }
            KeyCode::Enter => app.activate(),
            KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('s') => app.save_tab(Instant::now()),
            KeyCode::Char('t') if app.tab == Tab::Status => {
                app.begin_manual_time();
                None
            }
            KeyCode::Char('a') if app.tab == Tab::Feeds => {
                app.begin_add_feed();
                None
            }
            KeyCode::Char('d') | KeyCode::Delete if app.tab == Tab::Feeds => {
                app.request_remove();
                None
            }
            KeyCode::Char('R') if app.tab == Tab::Feeds => {
                app.request_reset();
                None
            }
            KeyCode::Char('f') if app.tab == Tab::Feeds => Some(Action::FetchNow),
            _ => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
