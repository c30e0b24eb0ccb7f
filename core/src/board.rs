//! The score state machine.
//!
//! Two states, Normal and Celebrating, with the celebration derived from the
//! score itself: the board is celebrating exactly while `score == MAX_SCORE`.
//! Mutations return a [`Transition`] so callers observe celebration entry and
//! exit as edges rather than levels - the chime fires on [`Transition::Entered`]
//! only, never while the board merely stays at the maximum.

/// Upper bound for the score. The lower bound is 0.
pub const MAX_SCORE: u8 = 15;

/// Outcome of a single board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Score changed without crossing the celebration boundary.
    Changed,
    /// Increment reached [`MAX_SCORE`]; the board is now celebrating.
    Entered,
    /// Score left [`MAX_SCORE`]: decrement from the maximum, or a reset while
    /// celebrating.
    Left,
    /// Out-of-range request ignored; nothing observable changed.
    Clamped,
}

/// The score and its derived celebration projection.
///
/// Invariant: `score` stays within `0..=MAX_SCORE`. Increment above the maximum
/// and decrement below zero are no-ops reported as [`Transition::Clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u8,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    /// A fresh board at score 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { score: 0 }
    }

    /// Rebuild a board from a persisted score, clamping out-of-range values.
    ///
    /// The celebration projection is re-derived from the restored score: a board
    /// restored at [`MAX_SCORE`] is celebrating, with the decrement control
    /// disabled. Restoration is not a transition, so no chime fires.
    #[must_use]
    pub fn restore(score: u8) -> Self {
        if score > MAX_SCORE {
            tracing::warn!(score, "Persisted score out of range, clamping");
        }
        Self {
            score: score.min(MAX_SCORE),
        }
    }

    pub fn increment(&mut self) -> Transition {
        if self.score >= MAX_SCORE {
            tracing::debug!("Score is already at maximum");
            return Transition::Clamped;
        }
        self.score += 1;
        tracing::info!(score = self.score, "Score updated");
        if self.score == MAX_SCORE {
            tracing::info!("Maximum score reached");
            Transition::Entered
        } else {
            Transition::Changed
        }
    }

    pub fn decrement(&mut self) -> Transition {
        if self.score == 0 {
            tracing::debug!("Score is already at minimum");
            return Transition::Clamped;
        }
        let was_celebrating = self.is_celebrating();
        self.score -= 1;
        tracing::info!(score = self.score, "Score updated");
        if was_celebrating {
            Transition::Left
        } else {
            Transition::Changed
        }
    }

    /// Unconditionally set the score to 0, leaving the celebration if active.
    pub fn reset(&mut self) -> Transition {
        let was_celebrating = self.is_celebrating();
        let was_zero = self.score == 0;
        self.score = 0;
        tracing::info!("Score reset to 0");
        if was_celebrating {
            Transition::Left
        } else if was_zero {
            Transition::Clamped
        } else {
            Transition::Changed
        }
    }

    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// The score as plain decimal text, exactly as the UI renders it.
    #[must_use]
    pub fn display(&self) -> String {
        self.score.to_string()
    }

    #[must_use]
    pub const fn is_celebrating(&self) -> bool {
        self.score == MAX_SCORE
    }

    /// Whether the decrement control should accept input.
    #[must_use]
    pub const fn decrement_enabled(&self) -> bool {
        !self.is_celebrating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_starts_at_zero() {
        let board = ScoreBoard::new();
        assert_eq!(board.score(), 0);
        assert_eq!(board.display(), "0");
        assert!(!board.is_celebrating());
        assert!(board.decrement_enabled());
    }

    #[test]
    fn score_stays_in_range_under_arbitrary_sequences() {
        // A fixed mixed sequence that repeatedly slams into both bounds.
        let mut board = ScoreBoard::new();
        let ops: [fn(&mut ScoreBoard) -> Transition; 8] = [
            ScoreBoard::decrement,
            ScoreBoard::increment,
            ScoreBoard::increment,
            ScoreBoard::decrement,
            ScoreBoard::increment,
            ScoreBoard::reset,
            ScoreBoard::increment,
            ScoreBoard::decrement,
        ];
        for round in 0..64 {
            let op = ops[round % ops.len()];
            op(&mut board);
            assert!(board.score() <= MAX_SCORE, "round {round}");
        }
        for _ in 0..32 {
            board.increment();
            assert!(board.score() <= MAX_SCORE);
        }
        for _ in 0..64 {
            board.decrement();
            assert!(board.score() <= MAX_SCORE);
        }
    }

    #[test]
    fn increment_at_max_is_a_noop() {
        let mut board = ScoreBoard::restore(MAX_SCORE);
        assert_eq!(board.increment(), Transition::Clamped);
        assert_eq!(board.score(), MAX_SCORE);
        assert!(board.is_celebrating());
    }

    #[test]
    fn decrement_at_zero_is_a_noop() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.decrement(), Transition::Clamped);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn exactly_one_celebration_entry_over_fifteen_increments() {
        let mut board = ScoreBoard::new();
        let mut entries = 0;
        for step in 1..=MAX_SCORE {
            match board.increment() {
                Transition::Entered => entries += 1,
                Transition::Changed => {
                    assert!(step < MAX_SCORE, "entry must come on the final step");
                }
                other => panic!("unexpected transition {other:?} at step {step}"),
            }
            assert_eq!(board.is_celebrating(), step == MAX_SCORE);
        }
        assert_eq!(entries, 1);
    }

    #[test]
    fn reset_from_every_score_yields_zero_and_no_celebration() {
        for start in 0..=MAX_SCORE {
            let mut board = ScoreBoard::restore(start);
            board.reset();
            assert_eq!(board.score(), 0, "from {start}");
            assert!(!board.is_celebrating(), "from {start}");
            assert!(board.decrement_enabled(), "from {start}");
        }
    }

    #[test]
    fn reset_transitions_reflect_prior_state() {
        let mut at_max = ScoreBoard::restore(MAX_SCORE);
        assert_eq!(at_max.reset(), Transition::Left);

        let mut mid = ScoreBoard::restore(7);
        assert_eq!(mid.reset(), Transition::Changed);

        let mut zero = ScoreBoard::new();
        assert_eq!(zero.reset(), Transition::Clamped);
    }

    #[test]
    fn decrement_from_max_leaves_celebration() {
        let mut board = ScoreBoard::restore(MAX_SCORE);
        assert!(!board.decrement_enabled());
        assert_eq!(board.decrement(), Transition::Left);
        assert_eq!(board.score(), MAX_SCORE - 1);
        assert!(!board.is_celebrating());
        assert!(board.decrement_enabled());
    }

    #[test]
    fn restore_clamps_out_of_range_scores() {
        assert_eq!(ScoreBoard::restore(200).score(), MAX_SCORE);
        assert_eq!(ScoreBoard::restore(MAX_SCORE + 1).score(), MAX_SCORE);
        assert_eq!(ScoreBoard::restore(3).score(), 3);
    }

    #[test]
    fn restore_at_max_rederives_celebration() {
        let board = ScoreBoard::restore(MAX_SCORE);
        assert!(board.is_celebrating());
        assert!(!board.decrement_enabled());
    }

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(ScoreBoard::restore(7).display(), "7");
        assert_eq!(ScoreBoard::restore(MAX_SCORE).display(), "15");
    }
}
