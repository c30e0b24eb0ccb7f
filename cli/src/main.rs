//! Tally CLI - binary entry point and terminal session management.
//!
//! The CLI bridges [`tally_core`] (application state) and [`tally_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed
//! cleanup.
//!
//! # Event Loop
//!
//! A single event-dispatch loop paced by the input poll timeout:
//!
//! 1. Wait up to one frame for terminal events, drain and dispatch them
//! 2. Execute queued side effects (celebration chime)
//! 3. Observe chime completion to release the playback sink
//! 4. Autosave the session after each applied mutation
//! 5. Render frame
//! 6. Exit on quit, saving the session a final time

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tally_audio::Chime;
use tally_config::TallyConfig;
use tally_core::{App, Effect, ScoreBoard, SessionState, UiOptions, data_dir, session_path};
use tally_tui::{draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_tally_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_tally_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let candidates = tally_log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn tally_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.tally/logs/tally.log
    if let Some(dir) = data_dir() {
        candidates.push(dir.join("logs").join("tally.log"));
    }

    // Fallback: ./.tally/logs/tally.log (useful in constrained environments)
    candidates.push(PathBuf::from(".tally").join("logs").join("tally.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Manages raw mode and the alternate screen; on drop, both are restored so
/// the terminal remains usable even after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(out);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };
        let _ = terminal.hide_cursor();

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = match TallyConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring unusable config: {e}");
            TallyConfig::default()
        }
    };
    let options = UiOptions {
        ascii_only: config.app.as_ref().is_some_and(|app| app.ascii_only),
        high_contrast: config.app.as_ref().is_some_and(|app| app.high_contrast),
    };

    let session_file = session_path();
    if session_file.is_none() {
        tracing::warn!("No data directory available, score will not persist");
    }
    let board = session_file
        .as_deref()
        .map_or_else(ScoreBoard::new, SessionState::restore_board);

    let mut app = App::new(board, options);
    let mut chime = Chime::new(&config.sound.unwrap_or_default());

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(
            &mut session.terminal,
            &mut app,
            &mut chime,
            session_file.as_deref(),
        )
    };

    if let Some(path) = session_file.as_deref()
        && let Err(e) = SessionState::capture(app.board()).save(path)
    {
        eprintln!("Failed to save session: {e}");
    }

    result
}

fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    chime: &mut Chime,
    session_file: Option<&Path>,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        handle_events(app)?;

        for effect in app.drain_effects() {
            match effect {
                Effect::PlayChime => chime.play(),
            }
        }
        chime.poll();

        if app.take_dirty() {
            autosave(app, session_file);
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            return Err(e.into());
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Save after each mutation; failures are logged, never surfaced mid-session.
fn autosave(app: &App, session_file: Option<&Path>) {
    let Some(path) = session_file else { return };
    if let Err(e) = SessionState::capture(app.board()).save(path) {
        tracing::warn!("Autosave failed: {e}");
    }
}
