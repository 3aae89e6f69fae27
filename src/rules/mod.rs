//! Game rules for K-in-a-row gravity games
//!
//! Tokens drop to the lowest free cell of a column; the first player to
//! align K of their tokens wins, a full grid without a line is a draw.

pub mod win;

pub use win::{completes_line, find_winner};
