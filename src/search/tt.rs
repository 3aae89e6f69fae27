//! Two-tier result cache for search results
//!
//! The cache stores search results indexed by position hash, enabling reuse
//! of scores for positions reached through different move orders.
//!
//! - **volatile**: heuristic values, valid only for the iterative-deepening
//!   iteration that wrote them. Cleared before every iteration.
//! - **permanent**: proven wins and losses. Never evicted; a position can
//!   become proven but never un-proven.
//!
//! # Example
//!
//! ```
//! use connectx::eval::Score;
//! use connectx::search::{Bound, Proven, ResultCache};
//!
//! let mut cache = ResultCache::new();
//! cache.record(0xABCD, Score::Heuristic(40), Bound::Exact);
//! cache.record_proven(0x1234, Proven::Win);
//!
//! cache.reset_volatile();
//! assert_eq!(cache.lookup(0xABCD, Score::Loss, Score::Win), None);
//! assert_eq!(cache.lookup(0x1234, Score::Loss, Score::Win), Some(Score::Win));
//! ```

use std::collections::HashMap;

use crate::eval::Score;

/// How a heuristic value relates to the true value of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window
    Exact,
    /// True value >= stored value (cutoff at a maximizing node)
    Lower,
    /// True value <= stored value (cutoff at a minimizing node / fail-low)
    Upper,
}

/// A forced result, valid at any depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proven {
    Win,
    Loss,
}

impl From<Proven> for Score {
    fn from(p: Proven) -> Score {
        match p {
            Proven::Win => Score::Win,
            Proven::Loss => Score::Loss,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct VolatileEntry {
    value: i32,
    bound: Bound,
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries in the volatile table
    pub volatile: usize,
    /// Entries in the permanent table
    pub permanent: usize,
    /// Lookups answered by the permanent table
    pub permanent_hits: u64,
    /// Lookups answered by the volatile table
    pub volatile_hits: u64,
}

/// Hash-keyed score memo with a depth-scoped and a permanent tier.
#[derive(Debug, Default)]
pub struct ResultCache {
    volatile: HashMap<u64, VolatileEntry>,
    permanent: HashMap<u64, Proven>,
    permanent_hits: u64,
    volatile_hits: u64,
}

impl ResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe both tables, permanent first.
    ///
    /// A volatile entry only answers when it is usable inside
    /// `(alpha, beta)`: exact values always, lower bounds at or above
    /// `beta`, upper bounds at or below `alpha`.
    pub fn lookup(&mut self, hash: u64, alpha: Score, beta: Score) -> Option<Score> {
        if let Some(&proven) = self.permanent.get(&hash) {
            self.permanent_hits += 1;
            return Some(proven.into());
        }

        let entry = self.volatile.get(&hash)?;
        let score = Score::Heuristic(entry.value);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        if usable {
            self.volatile_hits += 1;
            Some(score)
        } else {
            None
        }
    }

    /// Store a search result in the tier its score belongs to.
    pub fn record(&mut self, hash: u64, score: Score, bound: Bound) {
        match score {
            Score::Win => self.record_proven(hash, Proven::Win),
            Score::Loss => self.record_proven(hash, Proven::Loss),
            Score::Heuristic(value) => self.record_heuristic(hash, value, bound),
        }
    }

    /// Write a depth-dependent value. Never shadows a proven entry.
    pub fn record_heuristic(&mut self, hash: u64, value: i32, bound: Bound) {
        if self.permanent.contains_key(&hash) {
            return;
        }
        self.volatile.insert(hash, VolatileEntry { value, bound });
    }

    /// Write a forced result; it outlives every later iteration.
    pub fn record_proven(&mut self, hash: u64, proven: Proven) {
        self.volatile.remove(&hash);
        self.permanent.insert(hash, proven);
    }

    /// Drop every heuristic entry, keep proven ones.
    ///
    /// Called before each deeper iteration: a value computed at depth d says
    /// nothing reliable at depth d + 1.
    pub fn reset_volatile(&mut self) {
        self.volatile.clear();
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            volatile: self.volatile.len(),
            permanent: self.permanent.len(),
            permanent_hits: self.permanent_hits,
            volatile_hits: self.volatile_hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: (Score, Score) = (Score::Loss, Score::Win);

    #[test]
    fn test_cache_store_lookup_exact() {
        let mut cache = ResultCache::new();
        let hash = 0x123456789ABCDEF0;

        cache.record(hash, Score::Heuristic(100), Bound::Exact);
        assert_eq!(cache.lookup(hash, FULL.0, FULL.1), Some(Score::Heuristic(100)));
        assert_eq!(cache.lookup(0x42, FULL.0, FULL.1), None);
    }

    #[test]
    fn test_cache_lower_bound_cutoff() {
        let mut cache = ResultCache::new();
        let hash = 0x123456789ABCDEF0;
        cache.record(hash, Score::Heuristic(200), Bound::Lower);

        // 200 >= beta (150): usable
        assert_eq!(
            cache.lookup(hash, Score::Loss, Score::Heuristic(150)),
            Some(Score::Heuristic(200))
        );
        // 200 < beta (300): must search
        assert_eq!(cache.lookup(hash, Score::Loss, Score::Heuristic(300)), None);
    }

    #[test]
    fn test_cache_upper_bound_cutoff() {
        let mut cache = ResultCache::new();
        let hash = 0x123456789ABCDEF0;
        cache.record(hash, Score::Heuristic(50), Bound::Upper);

        assert_eq!(
            cache.lookup(hash, Score::Heuristic(100), Score::Win),
            Some(Score::Heuristic(50))
        );
        assert_eq!(cache.lookup(hash, Score::Heuristic(30), Score::Win), None);
    }

    #[test]
    fn test_proven_goes_permanent() {
        let mut cache = ResultCache::new();
        cache.record(1, Score::Win, Bound::Lower);
        cache.record(2, Score::Loss, Bound::Upper);

        let stats = cache.stats();
        assert_eq!(stats.permanent, 2);
        assert_eq!(stats.volatile, 0);
        // Proven entries answer whatever the window
        assert_eq!(
            cache.lookup(1, Score::Heuristic(5), Score::Heuristic(6)),
            Some(Score::Win)
        );
    }

    #[test]
    fn test_reset_keeps_permanent() {
        let mut cache = ResultCache::new();
        cache.record(1, Score::Heuristic(7), Bound::Exact);
        cache.record_proven(2, Proven::Loss);

        cache.reset_volatile();

        assert_eq!(cache.lookup(1, FULL.0, FULL.1), None);
        assert_eq!(cache.lookup(2, FULL.0, FULL.1), Some(Score::Loss));
    }

    #[test]
    fn test_heuristic_never_shadows_proven() {
        let mut cache = ResultCache::new();
        cache.record_proven(9, Proven::Win);
        cache.record_heuristic(9, -20, Bound::Exact);

        assert_eq!(cache.stats().volatile, 0);
        assert_eq!(cache.lookup(9, FULL.0, FULL.1), Some(Score::Win));
    }

    #[test]
    fn test_proven_replaces_volatile() {
        let mut cache = ResultCache::new();
        cache.record_heuristic(3, 10, Bound::Exact);
        cache.record_proven(3, Proven::Loss);

        let stats = cache.stats();
        assert_eq!(stats.volatile, 0);
        assert_eq!(stats.permanent, 1);
    }

    #[test]
    fn test_hit_counters() {
        let mut cache = ResultCache::new();
        cache.record(1, Score::Heuristic(0), Bound::Exact);
        cache.record(2, Score::Win, Bound::Exact);

        let _ = cache.lookup(1, FULL.0, FULL.1);
        let _ = cache.lookup(2, FULL.0, FULL.1);
        let _ = cache.lookup(2, FULL.0, FULL.1);
        let _ = cache.lookup(3, FULL.0, FULL.1);

        let stats = cache.stats();
        assert_eq!(stats.volatile_hits, 1);
        assert_eq!(stats.permanent_hits, 2);
    }
}
