//! Turn clock with a soft deadline

use std::time::{Duration, Instant};

/// Share of the turn budget the search may use. The rest covers unwinding
/// back to the driver and returning the move.
pub const DEFAULT_DEADLINE_RATIO: f64 = 0.93;

/// Records the turn's start and answers "is time up".
#[derive(Debug, Clone, Copy)]
pub struct TimeGovernor {
    start: Instant,
    soft_limit: Option<Duration>,
}

impl TimeGovernor {
    /// Start the clock for a turn of `budget_secs` seconds.
    ///
    /// The soft deadline is `budget_secs * ratio`. Non-finite or negative
    /// products mean "no deadline".
    #[must_use]
    pub fn start(budget_secs: f64, ratio: f64) -> Self {
        let limit = budget_secs * ratio;
        let soft_limit = (limit.is_finite() && limit >= 0.0).then(|| Duration::from_secs_f64(limit));
        Self {
            start: Instant::now(),
            soft_limit,
        }
    }

    /// A clock that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            soft_limit: None,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once the soft deadline has been crossed.
    #[inline]
    pub fn time_up(&self) -> bool {
        self.soft_limit
            .is_some_and(|limit| self.start.elapsed() >= limit)
    }

    #[inline]
    pub fn soft_limit(&self) -> Option<Duration> {
        self.soft_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_limit_is_fraction_of_budget() {
        let clock = TimeGovernor::start(2.0, DEFAULT_DEADLINE_RATIO);
        assert_eq!(clock.soft_limit(), Some(Duration::from_secs_f64(1.86)));
        assert!(!clock.time_up());
    }

    #[test]
    fn test_zero_budget_is_immediately_up() {
        let clock = TimeGovernor::start(0.0, DEFAULT_DEADLINE_RATIO);
        assert!(clock.time_up());
    }

    #[test]
    fn test_deadline_crossed() {
        let clock = TimeGovernor::start(0.01, 1.0);
        std::thread::sleep(Duration::from_millis(20));
        assert!(clock.time_up());
        assert!(clock.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_unlimited_never_expires() {
        let clock = TimeGovernor::unlimited();
        assert!(!clock.time_up());
        assert_eq!(clock.soft_limit(), None);

        let infinite = TimeGovernor::start(f64::INFINITY, 0.93);
        assert!(!infinite.time_up());
    }
}
