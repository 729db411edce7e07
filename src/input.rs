//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Keys held by a live
//! subscription (see [`crate::keymap`]) are offered to their subscriber
//! first; anything it does not consume falls through to the fixed
//! bindings below.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in `ui::draw_status_bar`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if let Some(action) = app.keymap().lookup(key.code) {
        if app.dispatch(action) {
            return;
        }
    }

    // The open menu locks page scrolling.
    if app.menu_open() {
        match key.code {
            KeyCode::Char('q') => app.quit = true,
            KeyCode::Down | KeyCode::Char('j') => app.menu_next(),
            KeyCode::Up | KeyCode::Char('k') => app.menu_previous(),
            KeyCode::Enter => app.choose_menu_link(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('m') => app.open_menu(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}
