//! Evaluation module for connection-game positions
//!
//! The evaluation considers:
//! - Terminal outcomes (proven win / loss, draw)
//! - Column control weighted by move-order rank
//! - Open K-windows along rows, diagonals and anti-diagonals

pub mod heuristic;
pub mod score;

pub use heuristic::{Evaluator, WINDOW_WEIGHT};
pub use score::{Score, HEURISTIC_LIMIT};
