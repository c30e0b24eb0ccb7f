//! Celebration chime playback.
//!
//! Wraps a rodio output stream behind a handle that is valid to hold even when
//! no audio device exists: a headless machine, a missing sound server, or
//! `sound.enabled = false` all yield a silent chime, never an error. Playback
//! is one-shot and edge-triggered by the shell; a new trigger stops and
//! releases any in-flight instance before starting.
//!
//! All device resources live inside [`Chime`] and are released when it drops,
//! whichever exit path the shell takes.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use tally_config::SoundConfig;

/// The built-in jingle: an E5 / G5 / C6 arpeggio, (frequency Hz, duration ms).
const JINGLE: [(f32, u64); 3] = [(659.25, 140), (783.99, 140), (1046.50, 320)];
const JINGLE_GAIN: f32 = 0.35;

#[derive(Debug, thiserror::Error)]
enum SourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// One-shot celebration sound with a scoped device lifetime.
pub struct Chime {
    // The stream must stay alive for the handle to produce audio; dropping the
    // pair tears the device down.
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    file: Option<PathBuf>,
    volume: f32,
}

impl Chime {
    /// Open the default output device per the sound configuration.
    ///
    /// An unavailable device yields a silent chime (warning logged once); a
    /// disabled config skips the device entirely.
    #[must_use]
    pub fn new(config: &SoundConfig) -> Self {
        let output = if config.enabled {
            match OutputStream::try_default() {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!("No audio output available, chime disabled: {e}");
                    None
                }
            }
        } else {
            debug!("Chime disabled by configuration");
            None
        };
        Self {
            output,
            sink: None,
            file: config.file.clone(),
            volume: config.clamped_volume(),
        }
    }

    /// A chime with no device at all, for shells that opt out of audio.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            output: None,
            sink: None,
            file: None,
            volume: 0.0,
        }
    }

    /// Start one-shot playback, stopping any in-flight instance first.
    pub fn play(&mut self) {
        let Some((_, handle)) = &self.output else {
            debug!("Chime trigger ignored, no active sound resource");
            return;
        };

        if let Some(previous) = self.sink.take() {
            debug!("Releasing in-flight chime before retrigger");
            previous.stop();
        }

        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                warn!("Failed to open playback sink: {e}");
                return;
            }
        };
        sink.set_volume(self.volume);

        match &self.file {
            Some(path) => match open_source(path) {
                Ok(source) => sink.append(source),
                Err(e) => {
                    warn!(path = %path.display(), "Falling back to built-in jingle: {e}");
                    append_jingle(&sink);
                }
            },
            None => append_jingle(&sink),
        }

        debug!("Chime playback started");
        self.sink = Some(sink);
    }

    /// Observe playback completion and release the finished sink.
    ///
    /// Called from the shell's frame loop; completion is a resource-cleanup
    /// signal only, nothing waits on it.
    pub fn poll(&mut self) {
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.sink = None;
            debug!("Chime playback completed, sink released");
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }
}

impl Drop for Chime {
    fn drop(&mut self) {
        if self.output.is_some() {
            debug!("Audio resources released");
        }
    }
}

fn append_jingle(sink: &Sink) {
    for (frequency, millis) in JINGLE {
        sink.append(note(frequency, millis));
    }
}

fn note(frequency: f32, millis: u64) -> impl Source<Item = f32> {
    SineWave::new(frequency)
        .take_duration(Duration::from_millis(millis))
        .amplify(JINGLE_GAIN)
}

fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, SourceError> {
    let file = File::open(path)?;
    Ok(Decoder::new(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_chime_ignores_triggers() {
        let mut chime = Chime::disabled();
        chime.play();
        chime.poll();
        assert!(!chime.is_playing());
    }

    #[test]
    fn disabled_config_opens_no_device() {
        let config = SoundConfig {
            enabled: false,
            ..SoundConfig::default()
        };
        let mut chime = Chime::new(&config);
        chime.play();
        assert!(!chime.is_playing());
    }

    #[test]
    fn open_source_reports_missing_file() {
        let err = open_source(Path::new("/nonexistent/w.wav")).err().unwrap();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn jingle_notes_are_ascending_and_timed() {
        let mut last = 0.0;
        for (frequency, millis) in JINGLE {
            assert!(frequency > last);
            assert!(millis > 0);
            last = frequency;
        }
    }
}
