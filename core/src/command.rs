//! Command dispatch.
//!
//! UI events map to this closed set; the shell forwards them to [`crate::App`]
//! which calls the matching [`crate::ScoreBoard`] method. There is no dynamic
//! dispatch and no other way to mutate the score.

/// A user-initiated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
    Reset,
    Quit,
}

impl Command {
    /// Stable name used in log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Reset => "reset",
            Self::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_as_str() {
        assert_eq!(Command::Increment.as_str(), "increment");
        assert_eq!(Command::Decrement.as_str(), "decrement");
        assert_eq!(Command::Reset.as_str(), "reset");
        assert_eq!(Command::Quit.as_str(), "quit");
    }
}
