//! Input handling for the Tally TUI.
//!
//! Maps crossterm key events onto the closed command set and dispatches them
//! into the app. Dispatch is where the disabled decrement control is enforced:
//! the board method stays total, but the shell refuses to forward a decrement
//! while the board is celebrating, the way a grayed-out button swallows
//! clicks.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use tally_core::{App, Command};

// One frame while idle; input arriving earlier wakes the loop immediately.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Block up to one frame for input, then drain everything pending.
pub fn handle_events(app: &mut App) -> Result<()> {
    if !event::poll(INPUT_POLL_TIMEOUT)? {
        return Ok(());
    }
    loop {
        match event::read()? {
            Event::Key(key) => handle_key(app, key),
            // Redrawn on the next frame anyway.
            Event::Resize(..) => {}
            _ => {}
        }
        if !event::poll(Duration::ZERO)? {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    let Some(command) = map_key(key) else {
        return;
    };
    debug!(command = command.as_str(), "Key pressed");
    dispatch(app, command);
}

/// Forward a command to the app, honoring the disabled decrement control.
pub fn dispatch(app: &mut App, command: Command) {
    if command == Command::Decrement && !app.board().decrement_enabled() {
        debug!("Decrement ignored, control disabled at maximum score");
        return;
    }
    app.apply(command);
}

/// The key bindings: `+`/`=`/Up increment, `-`/Down decrement, `r` reset,
/// `q`/Esc/Ctrl-C quit.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('+' | '=') | KeyCode::Up => Some(Command::Increment),
        KeyCode::Char('-' | '_') | KeyCode::Down => Some(Command::Decrement),
        KeyCode::Char('r' | 'R') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{MAX_SCORE, ScoreBoard, UiOptions};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn bindings_cover_the_closed_command_set() {
        assert_eq!(map_key(key(KeyCode::Char('+'))), Some(Command::Increment));
        assert_eq!(map_key(key(KeyCode::Char('='))), Some(Command::Increment));
        assert_eq!(map_key(key(KeyCode::Up)), Some(Command::Increment));
        assert_eq!(map_key(key(KeyCode::Char('-'))), Some(Command::Decrement));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Command::Decrement));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(map_key(key(KeyCode::Char('R'))), Some(Command::Reset));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn ctrl_modifier_masks_other_bindings() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new(ScoreBoard::new(), UiOptions::default());
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('+'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        handle_key(&mut app, release);
        assert_eq!(app.board().score(), 0);
    }

    #[test]
    fn dispatch_blocks_decrement_while_celebrating() {
        let mut app = App::new(ScoreBoard::restore(MAX_SCORE), UiOptions::default());
        dispatch(&mut app, Command::Decrement);
        assert_eq!(app.board().score(), MAX_SCORE);

        // Reset re-enables the control.
        dispatch(&mut app, Command::Reset);
        dispatch(&mut app, Command::Increment);
        dispatch(&mut app, Command::Decrement);
        assert_eq!(app.board().score(), 0);
    }
}
