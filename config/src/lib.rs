//! Configuration loading for Tally.
//!
//! `~/.tally/config.toml`, all sections optional. A missing file is not an
//! error; a malformed one is reported with its path and otherwise ignored by
//! the shell, which falls back to defaults.

use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

const fn default_volume() -> f32 {
    0.8
}

#[derive(Debug, Default, Deserialize)]
pub struct TallyConfig {
    pub app: Option<AppConfig>,
    pub sound: Option<SoundConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for banners and bullets.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

/// Celebration chime settings.
///
/// ```toml
/// [sound]
/// enabled = true
/// file = "/path/to/w.wav"
/// volume = 0.8
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SoundConfig {
    /// Master switch for the chime. Default: true.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional audio file to play instead of the built-in jingle.
    pub file: Option<PathBuf>,
    /// Playback volume, clamped to `0.0..=1.0`. Default: 0.8.
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            volume: default_volume(),
        }
    }
}

impl SoundConfig {
    /// Volume with out-of-range values clamped rather than rejected.
    #[must_use]
    pub fn clamped_volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }
}

impl TallyConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

/// Config file location.
///
/// `TALLY_CONFIG` overrides the default `~/.tally/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("TALLY_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".tally").join("config.toml"))
}
