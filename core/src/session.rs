//! Score persistence across process restarts.
//!
//! The terminal analog of screen recreation: the score is the only state worth
//! carrying over, so the session file is a single versioned JSON object written
//! atomically after every mutation and on quit.
//!
//! # Version Compatibility
//!
//! The `version` field enables forward compatibility. If a newer version of
//! Tally writes session state with a higher version number, older versions
//! ignore the persisted state and start fresh.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::atomic_write::atomic_write;
use crate::board::ScoreBoard;

#[derive(Debug, Error)]
pub enum SessionLoadError {
    #[error("failed to read session file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse session file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session state container for persistence.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// The persisted score. Clamped on restore, so a hand-edited file cannot
    /// break the board invariant.
    pub score: u8,
    /// Schema version for forward compatibility.
    pub version: u32,
}

impl SessionState {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Filename for the session state file.
    pub const FILENAME: &'static str = "session.json";

    /// Snapshot the board for persistence.
    #[must_use]
    pub fn capture(board: &ScoreBoard) -> Self {
        Self {
            score: board.score(),
            version: Self::CURRENT_VERSION,
        }
    }

    /// Check if this session state is compatible with the current version.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }

    /// Write the session file atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        atomic_write(path, &json)?;
        tracing::debug!(score = self.score, path = %path.display(), "Session saved");
        Ok(())
    }

    /// Load the session file. A missing file is `Ok(None)`, not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, SessionLoadError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)?;
        Ok(Some(state))
    }

    /// Restore a board from the session file.
    ///
    /// Missing, incompatible, and corrupt session files all start a fresh board
    /// at zero; the latter two are logged. Nothing here is user-visible failure.
    #[must_use]
    pub fn restore_board(path: &Path) -> ScoreBoard {
        match Self::load(path) {
            Ok(Some(state)) if state.is_compatible() => {
                tracing::info!(score = state.score, "Session restored");
                ScoreBoard::restore(state.score)
            }
            Ok(Some(state)) => {
                tracing::warn!(
                    version = state.version,
                    "Incompatible session version, starting fresh"
                );
                ScoreBoard::new()
            }
            Ok(None) => ScoreBoard::new(),
            Err(e) => {
                tracing::warn!("Failed to load session, starting fresh: {e}");
                ScoreBoard::new()
            }
        }
    }
}

/// Data directory for session state and logs.
///
/// `TALLY_DATA_DIR` overrides the default `~/.tally` (used by tests and
/// constrained environments).
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("TALLY_DATA_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".tally"))
}

#[must_use]
pub fn session_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(SessionState::FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_SCORE;

    #[test]
    fn capture_has_current_version() {
        let state = SessionState::capture(&ScoreBoard::restore(7));
        assert_eq!(state.score, 7);
        assert_eq!(state.version, SessionState::CURRENT_VERSION);
        assert!(state.is_compatible());
    }

    #[test]
    fn default_version_is_incompatible() {
        // Default is 0, not CURRENT_VERSION
        assert!(!SessionState::default().is_compatible());
    }

    #[test]
    fn round_trip_mid_range_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionState::FILENAME);

        SessionState::capture(&ScoreBoard::restore(7))
            .save(&path)
            .unwrap();
        let board = SessionState::restore_board(&path);

        assert_eq!(board.score(), 7);
        assert!(!board.is_celebrating());
        assert!(board.decrement_enabled());
    }

    #[test]
    fn round_trip_max_score_rederives_celebration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionState::FILENAME);

        SessionState::capture(&ScoreBoard::restore(MAX_SCORE))
            .save(&path)
            .unwrap();
        let board = SessionState::restore_board(&path);

        assert_eq!(board.score(), MAX_SCORE);
        assert!(board.is_celebrating());
        assert!(!board.decrement_enabled());
    }

    #[test]
    fn missing_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(SessionState::load(&path).unwrap().is_none());
        assert_eq!(SessionState::restore_board(&path).score(), 0);
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionState::FILENAME);
        fs::write(&path, "not json {").unwrap();

        assert!(matches!(
            SessionState::load(&path),
            Err(SessionLoadError::Parse(_))
        ));
        assert_eq!(SessionState::restore_board(&path).score(), 0);
    }

    #[test]
    fn future_version_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionState::FILENAME);
        let future = SessionState {
            score: 9,
            version: SessionState::CURRENT_VERSION + 1,
        };
        future.save(&path).unwrap();

        assert_eq!(SessionState::restore_board(&path).score(), 0);
    }

    #[test]
    fn out_of_range_persisted_score_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionState::FILENAME);
        let tampered = SessionState {
            score: 99,
            version: SessionState::CURRENT_VERSION,
        };
        tampered.save(&path).unwrap();

        assert_eq!(SessionState::restore_board(&path).score(), MAX_SCORE);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SessionState::FILENAME);

        SessionState::capture(&ScoreBoard::restore(3))
            .save(&path)
            .unwrap();
        assert!(path.exists());
    }
}
