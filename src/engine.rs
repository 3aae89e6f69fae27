//! Main engine facade integrating all search components
//!
//! This module provides the engine a match harness talks to: build it once
//! per game with [`Engine::initialize`], then call [`Engine::select_move`]
//! once per turn. The selection follows a priority system:
//!
//! 1. **Opening**: the very first move of a game the engine opens is the
//!    center column, without searching
//! 2. **Immediate win**: a column that wins on the spot ends the search
//! 3. **Alpha-Beta**: iterative deepening under the turn's soft deadline
//! 4. **Heuristic fallback**: one-ply evaluation if the search produced no move
//! 5. **Random fallback**: uniform over legal columns, last resort
//!
//! # Example
//!
//! ```
//! use connectx::{Board, Engine, EngineConfig, SearchType};
//!
//! let config = EngineConfig::new(6, 7, 4).turn_budget_secs(0.2).seed(Some(7));
//! let mut engine = Engine::initialize(config).unwrap();
//! let mut board = Board::new(6, 7, 4);
//!
//! let result = engine.select_move_with_stats(&mut board).unwrap();
//! assert_eq!(result.column, 3);
//! assert_eq!(result.search_type, SearchType::Opening);
//! ```

use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

use crate::board::{Board, Outcome, Player};
use crate::config::{ConfigError, EngineConfig};
use crate::eval::Score;
use crate::search::{concedes_immediate_win, SearchResult, Searcher, TimeGovernor};

/// Name reported to the harness
pub const ENGINE_NAME: &str = "connectx";

#[derive(Debug, Error)]
pub enum EngineError {
    /// The game is over or every column is full
    #[error("no legal move: the game is already decided or the board is full")]
    NoLegalMove,
    #[error(
        "board is {found_rows}x{found_columns} K={found_win_length}, engine was \
         configured for {rows}x{columns} K={win_length}"
    )]
    BoardMismatch {
        rows: usize,
        columns: usize,
        win_length: usize,
        found_rows: usize,
        found_columns: usize,
        found_win_length: usize,
    },
    /// The board has the other side to move
    #[error("engine plays {own:?} but {to_move:?} is to move")]
    NotOurTurn { own: Player, to_move: Player },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Which stage of the selection produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center column on the engine's opening move
    Opening,
    /// The move wins on the spot
    ImmediateWin,
    /// Best move of the last complete alpha-beta iteration
    AlphaBeta,
    /// One-ply evaluator comparison
    Heuristic,
    /// Uniform choice among legal columns
    Random,
}

/// Result of a move selection with search statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen column, always legal on the board passed in
    pub column: usize,
    /// Score of the position after the move, from the engine's perspective
    pub score: Score,
    pub search_type: SearchType,
    /// Deepest complete iteration (0 when no search ran)
    pub depth: u32,
    /// Alpha-beta nodes visited
    pub nodes: u64,
    /// Wall-clock time of the call in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn opening(column: usize, time_ms: u64) -> Self {
        Self {
            column,
            score: Score::DRAW,
            search_type: SearchType::Opening,
            depth: 0,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn from_search(column: usize, search_type: SearchType, result: &SearchResult, time_ms: u64) -> Self {
        Self {
            column,
            score: result.score.unwrap_or(Score::DRAW),
            search_type,
            depth: result.depth,
            nodes: result.stats.nodes,
            time_ms,
        }
    }

    #[inline]
    fn heuristic(column: usize, score: Score, nodes: u64, time_ms: u64) -> Self {
        Self {
            column,
            score,
            search_type: SearchType::Heuristic,
            depth: 0,
            nodes,
            time_ms,
        }
    }

    #[inline]
    fn random(column: usize, nodes: u64, time_ms: u64) -> Self {
        Self {
            column,
            score: Score::DRAW,
            search_type: SearchType::Random,
            depth: 0,
            nodes,
            time_ms,
        }
    }
}

/// Connect-K engine for one seat of one game.
///
/// Owns the search state (move order, hash keys, evaluator, caches) and the
/// random source. Proven results stay cached for the whole game.
pub struct Engine<R = Xoshiro256PlusPlus> {
    config: EngineConfig,
    searcher: Searcher,
    rng: R,
    /// No move has been selected yet
    fresh: bool,
}

impl Engine<Xoshiro256PlusPlus> {
    /// Validate `config` and build the engine.
    ///
    /// Keys and the random fallback are seeded from `config.seed`, or from
    /// the thread-local generator when unset.
    pub fn initialize(config: EngineConfig) -> Result<Self, EngineError> {
        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Build the engine with an injected random source.
    ///
    /// `config.seed` is ignored; all randomness comes from `rng`.
    pub fn with_rng(config: EngineConfig, mut rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let own = if config.plays_first {
            Player::One
        } else {
            Player::Two
        };
        let searcher = Searcher::new(config.rows, config.columns, config.win_length, own, &mut rng);
        info!(
            "{ENGINE_NAME}: {}x{} K={} as {own:?}, {:.3}s per turn",
            config.rows, config.columns, config.win_length, config.turn_budget_secs
        );
        Ok(Self {
            config,
            searcher,
            rng,
            fresh: true,
        })
    }

    /// The engine's name
    #[must_use]
    pub fn identity(&self) -> &'static str {
        ENGINE_NAME
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn own(&self) -> Player {
        self.searcher.own()
    }

    #[inline]
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Choose a column for the side to move.
    ///
    /// Convenience wrapper over [`Engine::select_move_with_stats`].
    pub fn select_move(&mut self, board: &mut Board) -> Result<usize, EngineError> {
        Ok(self.select_move_with_stats(board)?.column)
    }

    /// Choose a column and report how it was found.
    ///
    /// The board is probed during the search but handed back exactly as it
    /// came in; placing the chosen token is the caller's job. The call
    /// returns within the configured turn budget.
    pub fn select_move_with_stats(&mut self, board: &mut Board) -> Result<MoveResult, EngineError> {
        let clock = TimeGovernor::start(self.config.turn_budget_secs, self.config.soft_deadline_ratio);
        self.check_board(board)?;

        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMove);
        }

        let fresh = std::mem::replace(&mut self.fresh, false);
        if fresh && self.config.plays_first {
            if let Some(center) = self.searcher.order().first().filter(|c| legal.contains(c)) {
                info!("opening in center column {center}");
                return Ok(MoveResult::opening(center, elapsed_ms(&clock)));
            }
        }

        let search = self.searcher.search(board, &clock, self.config.max_depth);
        let result = match search.best_move {
            Some(column) => {
                let search_type = if self.wins_at_once(board, column) {
                    SearchType::ImmediateWin
                } else {
                    SearchType::AlphaBeta
                };
                MoveResult::from_search(column, search_type, &search, elapsed_ms(&clock))
            }
            None => match self.heuristic_choice(board) {
                Some((column, score)) => {
                    MoveResult::heuristic(column, score, search.stats.nodes, elapsed_ms(&clock))
                }
                None => {
                    let column = self.random_choice(&legal);
                    warn!("no searched or safe column, playing random column {column}");
                    MoveResult::random(column, search.stats.nodes, elapsed_ms(&clock))
                }
            },
        };

        info!(
            "column {} score {} via {:?} (depth {}, {} nodes, {:?})",
            result.column,
            result.score,
            result.search_type,
            result.depth,
            result.nodes,
            search.termination
        );
        Ok(result)
    }

    fn check_board(&self, board: &Board) -> Result<(), EngineError> {
        let config = &self.config;
        if board.rows() != config.rows
            || board.columns() != config.columns
            || board.win_length() != config.win_length
        {
            return Err(EngineError::BoardMismatch {
                rows: config.rows,
                columns: config.columns,
                win_length: config.win_length,
                found_rows: board.rows(),
                found_columns: board.columns(),
                found_win_length: board.win_length(),
            });
        }
        let to_move = board.side_to_move();
        if board.current_outcome() == Outcome::Open && to_move != self.own() {
            return Err(EngineError::NotOurTurn {
                own: self.own(),
                to_move,
            });
        }
        Ok(())
    }

    fn wins_at_once(&self, board: &mut Board, column: usize) -> bool {
        let own = self.own();
        board
            .probe(column)
            .is_some_and(|child| child.current_outcome() == Outcome::Won(own))
    }

    /// Best column by static evaluation one ply ahead, skipping columns that
    /// let the opponent win on the reply.
    fn heuristic_choice(&self, board: &mut Board) -> Option<(usize, Score)> {
        let evaluator = self.searcher.evaluator();
        let mut best: Option<(usize, Score)> = None;
        for column in self.searcher.order().iter() {
            if concedes_immediate_win(board, column) {
                continue;
            }
            let Some(child) = board.probe(column) else {
                continue;
            };
            let score = evaluator.evaluate(&child);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((column, score));
            }
        }
        best
    }

    fn random_choice(&mut self, legal: &[usize]) -> usize {
        legal[self.rng.random_range(0..legal.len())]
    }
}

fn elapsed_ms(clock: &TimeGovernor) -> u64 {
    clock.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: EngineConfig) -> Engine {
        Engine::initialize(config.seed(Some(0x5EED))).unwrap()
    }

    #[test]
    fn test_engine_identity() {
        let engine = engine(EngineConfig::default());
        assert_eq!(engine.identity(), "connectx");
        assert_eq!(engine.own(), Player::One);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let result = Engine::initialize(EngineConfig::new(6, 7, 9));
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::InvalidWinLength { .. }))
        ));
    }

    #[test]
    fn test_engine_opens_in_center() {
        let mut engine = engine(EngineConfig::default());
        let mut board = Board::new(6, 7, 4);

        let result = engine.select_move_with_stats(&mut board).unwrap();

        assert_eq!(result.column, 3);
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(result.nodes, 0);
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_opening_only_on_first_call() {
        let mut engine = engine(EngineConfig::default().turn_budget_secs(0.2));
        let mut board = Board::new(6, 7, 4);

        assert_eq!(engine.select_move(&mut board).unwrap(), 3);
        board.place(3).unwrap();
        board.place(3).unwrap();

        let result = engine.select_move_with_stats(&mut board).unwrap();
        assert_ne!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = engine(EngineConfig::default());
        engine.fresh = false;
        let mut board = Board::from_moves(6, 7, 4, &[0, 0, 1, 1, 2, 2]).unwrap();

        let result = engine.select_move_with_stats(&mut board).unwrap();

        assert_eq!(result.column, 3);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.score, Score::Win);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let config = EngineConfig::default()
            .plays_first(false)
            .turn_budget_secs(0.5);
        let mut engine = engine(config);
        // One has three on the bottom row, open on the right only
        let mut board = Board::from_moves(6, 7, 4, &[0, 0, 1, 1, 2]).unwrap();

        let result = engine.select_move_with_stats(&mut board).unwrap();

        assert_eq!(result.column, 3);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_engine_respects_time_budget() {
        let config = EngineConfig::new(8, 9, 5).turn_budget_secs(0.3);
        let mut engine = engine(config);
        engine.fresh = false;
        let mut board = Board::new(8, 9, 5);
        let start = std::time::Instant::now();

        let column = engine.select_move(&mut board).unwrap();

        assert!(start.elapsed().as_secs_f64() < 0.3, "took {:?}", start.elapsed());
        assert!(column < 9);
    }

    #[test]
    fn test_engine_leaves_board_unchanged() {
        let mut engine = engine(EngineConfig::default().turn_budget_secs(0.2));
        engine.fresh = false;
        let mut board = Board::from_moves(6, 7, 4, &[3, 2, 4, 4]).unwrap();
        let before = board.clone();

        let column = engine.select_move(&mut board).unwrap();

        assert_eq!(board, before);
        assert!(board.legal_columns().contains(&column));
    }

    #[test]
    fn test_engine_no_legal_move() {
        let mut engine = engine(EngineConfig::default());
        let mut board = Board::from_moves(6, 7, 4, &[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert!(matches!(
            engine.select_move(&mut board),
            Err(EngineError::NoLegalMove)
        ));
    }

    #[test]
    fn test_engine_board_mismatch() {
        let mut engine = engine(EngineConfig::default());
        let mut board = Board::new(5, 7, 4);
        assert!(matches!(
            engine.select_move(&mut board),
            Err(EngineError::BoardMismatch { found_rows: 5, .. })
        ));
    }

    #[test]
    fn test_engine_not_our_turn() {
        let mut engine = engine(EngineConfig::default());
        let mut board = Board::from_moves(6, 7, 4, &[3]).unwrap();
        assert!(matches!(
            engine.select_move(&mut board),
            Err(EngineError::NotOurTurn { own: Player::One, to_move: Player::Two })
        ));
    }

    #[test]
    fn test_heuristic_fallback_when_search_cannot_start() {
        // A deadline that has passed before the first iteration
        let config = EngineConfig::default()
            .plays_first(false)
            .turn_budget_secs(1e-12);
        let mut engine = engine(config);
        let mut board = Board::from_moves(6, 7, 4, &[3]).unwrap();

        let result = engine.select_move_with_stats(&mut board).unwrap();

        assert_eq!(result.search_type, SearchType::Heuristic);
        assert!(board.legal_columns().contains(&result.column));
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_heuristic_choice_skips_conceding_columns() {
        // Two holds (1,1) (1,2) (1,3): One must not fill (0,0) or (0,4)
        let mut engine = engine(EngineConfig::default());
        let mut board = Board::from_moves(6, 7, 4, &[1, 2, 3, 1, 6, 2, 6, 3]).unwrap();

        let (column, _) = engine.heuristic_choice(&mut board).unwrap();

        assert!(column != 0 && column != 4);
    }

    #[test]
    fn test_random_choice_reproducible() {
        let legal = [0, 2, 5, 6];
        let mut a = engine(EngineConfig::default());
        let mut b = engine(EngineConfig::default());

        let picks_a: Vec<_> = (0..16).map(|_| a.random_choice(&legal)).collect();
        let picks_b: Vec<_> = (0..16).map(|_| b.random_choice(&legal)).collect();

        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|c| legal.contains(c)));
    }

    #[test]
    fn test_engine_with_injected_rng() {
        let rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut engine = Engine::with_rng(EngineConfig::new(4, 4, 3), rng).unwrap();
        let mut board = Board::new(4, 4, 3);
        assert_eq!(engine.select_move(&mut board).unwrap(), 2);
    }
}
