//! Typed search scores
//!
//! A score is either a proven result (`Win`/`Loss`) or a depth-dependent
//! heuristic estimate. Proven-ness is carried by the variant, so no heuristic
//! value can ever be mistaken for a forced result.

use std::fmt;

/// Magnitude bound for heuristic estimates.
pub const HEURISTIC_LIMIT: i32 = 1_000_000;

/// Score from the engine's own perspective.
///
/// Ordering: `Loss` < every `Heuristic` < `Win`. Alpha-beta bounds use the
/// same type, with `(Loss, Win)` as the full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    /// Forced loss
    Loss,
    /// Static or backed-up estimate, valid only for the depth it was computed at
    Heuristic(i32),
    /// Forced win
    Win,
}

impl Score {
    /// Drawn terminal position
    pub const DRAW: Score = Score::Heuristic(0);

    /// Build a heuristic score, clamped into `±HEURISTIC_LIMIT`.
    #[inline]
    #[must_use]
    pub fn heuristic(value: i64) -> Self {
        let limit = i64::from(HEURISTIC_LIMIT);
        Score::Heuristic(value.clamp(-limit, limit) as i32)
    }

    /// Proven results stay valid at any search depth.
    #[inline]
    pub fn is_proven(self) -> bool {
        matches!(self, Score::Win | Score::Loss)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "loss"),
            Score::Heuristic(v) => write!(f, "{v:+}"),
            Score::Win => write!(f, "win"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_ordering() {
        assert!(Score::Loss < Score::Heuristic(-HEURISTIC_LIMIT));
        assert!(Score::Heuristic(-5) < Score::Heuristic(3));
        assert!(Score::Heuristic(HEURISTIC_LIMIT) < Score::Win);
        assert_eq!(Score::Loss.max(Score::DRAW), Score::DRAW);
        assert_eq!(Score::Win.min(Score::DRAW), Score::DRAW);
    }

    #[test]
    fn test_heuristic_clamped() {
        assert_eq!(Score::heuristic(5_000_000_000), Score::Heuristic(HEURISTIC_LIMIT));
        assert_eq!(Score::heuristic(-5_000_000_000), Score::Heuristic(-HEURISTIC_LIMIT));
        assert_eq!(Score::heuristic(42), Score::Heuristic(42));
    }

    #[test]
    fn test_only_extremes_are_proven() {
        assert!(Score::Win.is_proven());
        assert!(Score::Loss.is_proven());
        assert!(!Score::DRAW.is_proven());
        assert!(!Score::Heuristic(HEURISTIC_LIMIT).is_proven());
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::Win.to_string(), "win");
        assert_eq!(Score::Heuristic(-30).to_string(), "-30");
        assert_eq!(Score::Heuristic(12).to_string(), "+12");
    }
}
