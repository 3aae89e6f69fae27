//! Search module for the connect-K engine
//!
//! Contains:
//! - Center-first move ordering
//! - Zobrist hashing for position identification
//! - Two-tier result cache (volatile heuristic values, permanent proven results)
//! - Turn clock with a soft deadline
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod clock;
pub mod order;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{
    concedes_immediate_win, Cancelled, SearchContext, SearchResult, SearchStats, Searcher,
    Termination,
};
pub use clock::{TimeGovernor, DEFAULT_DEADLINE_RATIO};
pub use order::MoveOrder;
pub use tt::{Bound, CacheStats, Proven, ResultCache};
pub use zobrist::ZobristTable;
