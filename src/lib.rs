//! Connect-K engine for gravity-drop connection games
//!
//! An adversarial engine for the generalized connect-four family: an M x N
//! grid, tokens dropped into columns, first to align K in a row, column or
//! diagonal wins.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Grid, placement with gravity, undo and scoped probing
//! - [`rules`]: Line detection
//! - [`eval`]: Typed scores and the static evaluator
//! - [`search`]: Move ordering, Zobrist hashing, result cache, clock and
//!   alpha-beta with iterative deepening
//! - [`config`]: Engine configuration, loadable from TOML
//! - [`engine`]: The facade a match harness drives
//!
//! # Quick Start
//!
//! ```
//! use connectx::{Board, Engine, EngineConfig};
//!
//! let config = EngineConfig::new(6, 7, 4)
//!     .plays_first(false)
//!     .turn_budget_secs(0.2)
//!     .seed(Some(1));
//! let mut engine = Engine::initialize(config).unwrap();
//!
//! // The opponent opened in column 0
//! let mut board = Board::from_moves(6, 7, 4, &[0]).unwrap();
//!
//! let column = engine.select_move(&mut board).unwrap();
//! board.place(column).unwrap();
//! assert_eq!(board.move_count(), 2);
//! ```
//!
//! # Search
//!
//! Each turn runs iterative deepening until a soft deadline at 93% of the
//! turn budget. The deadline is checked at every node; crossing it abandons
//! the current iteration and the move from the last complete one is played.
//! Proven wins and losses are cached for the rest of the game.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Cell, Outcome, Placement, Player};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError, MoveResult, SearchType, ENGINE_NAME};
pub use eval::Score;
