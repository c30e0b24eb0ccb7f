//! Application runtime state, free of TUI dependencies.
//!
//! The shell owns one [`App`], forwards mapped [`Command`]s into it, drains the
//! side [`Effect`]s it queues (the celebration chime lives behind one), and
//! hands it by reference to the rendering layer.

use crate::{Command, ScoreBoard, Transition};

/// Presentation options resolved from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for banners and bullets.
    pub ascii_only: bool,
    /// Use the high-contrast palette.
    pub high_contrast: bool,
}

/// A side effect requested by a state transition, executed by the shell.
///
/// Keeping the chime behind an effect keeps audio fully decoupled from the
/// state machine: the board never touches a device, and tests can assert on
/// the queued effects directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Play the one-shot celebration chime.
    PlayChime,
}

/// All runtime state the shell and renderer need.
#[derive(Debug)]
pub struct App {
    board: ScoreBoard,
    options: UiOptions,
    status: Option<String>,
    effects: Vec<Effect>,
    dirty: bool,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(board: ScoreBoard, options: UiOptions) -> Self {
        Self {
            board,
            options,
            status: None,
            effects: Vec::new(),
            dirty: false,
            should_quit: false,
        }
    }

    /// Dispatch a command to the board and record its observable consequences.
    pub fn apply(&mut self, command: Command) {
        tracing::debug!(command = command.as_str(), "Command dispatched");
        let transition = match command {
            Command::Increment => self.board.increment(),
            Command::Decrement => self.board.decrement(),
            Command::Reset => self.board.reset(),
            Command::Quit => {
                self.should_quit = true;
                return;
            }
        };
        match transition {
            Transition::Entered => {
                self.effects.push(Effect::PlayChime);
                self.status = Some("Maximum score! Press r to reset.".to_owned());
            }
            Transition::Changed | Transition::Left => {
                self.status = None;
            }
            Transition::Clamped => return,
        }
        self.dirty = true;
    }

    /// Take the queued side effects, leaving the queue empty.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// True once per applied mutation; the shell autosaves when it reads true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[must_use]
    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    #[must_use]
    pub const fn options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}
