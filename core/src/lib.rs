//! Core engine for Tally - the score state machine and its persistence.
//!
//! This crate contains the application state without TUI dependencies, providing:
//!
//! - **Score state**: The [`ScoreBoard`] state machine with clamped mutations and
//!   edge-triggered celebration [`Transition`]s
//! - **Command dispatch**: UI events map to the closed [`Command`] set
//! - **Runtime state**: The [`App`] struct owns the board, status line, and the
//!   [`Effect`] queue drained by the shell
//! - **Persistence**: [`SessionState`] carries the score across process restarts
//!
//! The TUI layer (`tally-tui`) reads state from [`App`] and forwards commands back
//! to it. No rendering logic lives in this crate.

mod app;
mod atomic_write;
mod board;
mod command;
mod session;

pub use app::{App, Effect, UiOptions};
pub use atomic_write::atomic_write;
pub use board::{MAX_SCORE, ScoreBoard, Transition};
pub use command::Command;
pub use session::{SessionLoadError, SessionState, data_dir, session_path};
