//! Alpha-beta search with iterative deepening and a two-tier result cache
//!
//! This module implements the core search algorithm. It uses minimax with
//! alpha-beta pruning over a fixed center-first move order.
//!
//! # Features
//!
//! - Iterative deepening under a soft deadline
//! - Cooperative cancellation: every node checks the clock and an expired
//!   deadline unwinds the whole iteration as `Err(Cancelled)`
//! - Zobrist hash maintained incrementally, toggled on entry and exit
//! - Volatile cache reset per iteration, permanent cache for proven results
//! - Immediate win at the root short-circuits the search
//! - One-ply pre-check skips moves that hand the opponent an instant win
//! - Stops deepening once an iteration reached no open leaf (tree exhausted)
//!
//! # Example
//!
//! ```
//! use connectx::board::{Board, Player};
//! use connectx::search::{Searcher, Termination, TimeGovernor};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//! let mut searcher = Searcher::new(6, 7, 4, Player::One, &mut rng);
//!
//! // One has three in a row on the bottom, column 3 completes it
//! let mut board = Board::from_moves(6, 7, 4, &[0, 0, 1, 1, 2, 2]).unwrap();
//! let result = searcher.search(&mut board, &TimeGovernor::start(1.0, 0.93), None);
//!
//! assert_eq!(result.best_move, Some(3));
//! assert_eq!(result.termination, Termination::Decided);
//! ```

use log::{debug, trace};
use rand::Rng;

use crate::board::{Board, Outcome, Player};
use crate::eval::{Evaluator, Score};

use super::{Bound, MoveOrder, ResultCache, TimeGovernor, ZobristTable};

/// The deadline passed mid-iteration; everything that iteration computed is void.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Why iterative deepening stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A forced win was found at the root
    Decided,
    /// The last iteration reached no open leaf; deeper search changes nothing
    Exhausted,
    /// The soft deadline cut the search
    TimedOut,
    /// The configured depth cap was reached
    DepthLimit,
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Alpha-beta nodes entered (root moves excluded)
    pub nodes: u64,
    /// Nodes answered from either cache tier
    pub cache_hits: u64,
    /// Beta cutoffs
    pub cutoffs: u64,
    /// Moves skipped by the one-ply pre-check
    pub skipped_moves: u64,
    /// Iterations started
    pub iterations: u32,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move of the last complete iteration, if any
    pub best_move: Option<usize>,
    /// Score of that move
    pub score: Option<Score>,
    /// Remaining depth below the root move in the last complete iteration
    pub depth: u32,
    pub termination: Termination,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Result of one root iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootVerdict {
    ImmediateWin(usize),
    Best { column: usize, score: Score },
    NoMove,
}

/// True when playing `column` lets the other side win at once by answering
/// in the same column.
///
/// The board is left exactly as found on every path.
pub fn concedes_immediate_win(board: &mut Board, column: usize) -> bool {
    let Some(mut mine) = board.probe(column) else {
        return false;
    };
    if mine.current_outcome() != Outcome::Open {
        return false;
    }
    let Some(reply) = mine.probe(column) else {
        return false;
    };
    let outcome = reply.current_outcome();
    matches!(outcome, Outcome::Won(_))
}

/// Long-lived search state: keys, move order, evaluator and caches.
///
/// Built once per engine; the permanent cache grows across turns.
#[derive(Debug)]
pub struct Searcher {
    zobrist: ZobristTable,
    order: MoveOrder,
    evaluator: Evaluator,
    cache: ResultCache,
}

impl Searcher {
    /// Create a searcher playing `own` on a `rows` x `columns` board.
    #[must_use]
    pub fn new<R: Rng>(
        rows: usize,
        columns: usize,
        win_length: usize,
        own: Player,
        rng: &mut R,
    ) -> Self {
        let order = MoveOrder::center_out(columns);
        let evaluator = Evaluator::new(own, &order, win_length);
        Self {
            zobrist: ZobristTable::new(rows, columns, rng),
            order,
            evaluator,
            cache: ResultCache::new(),
        }
    }

    #[inline]
    pub fn own(&self) -> Player {
        self.evaluator.own()
    }

    #[inline]
    pub fn order(&self) -> &MoveOrder {
        &self.order
    }

    #[inline]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[inline]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Borrow the per-turn search state, seeded with the position hash.
    pub fn context<'a>(&'a mut self, clock: &'a TimeGovernor, hash: u64) -> SearchContext<'a> {
        SearchContext {
            zobrist: &self.zobrist,
            order: &self.order,
            evaluator: &self.evaluator,
            cache: &mut self.cache,
            clock,
            hash,
            exhausted: true,
            stats: SearchStats::default(),
        }
    }

    /// Iterative deepening until the deadline, a proven win, exhaustion or
    /// `max_depth`.
    ///
    /// The board must have the engine's side to move. It is returned
    /// unchanged; the answer is the best move of the last complete iteration.
    pub fn search(
        &mut self,
        board: &mut Board,
        clock: &TimeGovernor,
        max_depth: Option<u32>,
    ) -> SearchResult {
        let root_hash = self.zobrist.hash_of(board.occupied_cells());
        let mut ctx = self.context(clock, root_hash);

        let mut best_move = None;
        let mut best_score = None;
        let mut completed = 0;
        let mut depth = 0u32;

        let termination = loop {
            if clock.time_up() {
                break Termination::TimedOut;
            }
            if max_depth.is_some_and(|max| depth > max) {
                break Termination::DepthLimit;
            }

            ctx.begin_iteration();
            match ctx.search_root(board, depth) {
                Err(Cancelled) => {
                    trace!("depth {depth} cancelled after {} nodes", ctx.stats.nodes);
                    break Termination::TimedOut;
                }
                Ok(RootVerdict::NoMove) => break Termination::Exhausted,
                Ok(RootVerdict::ImmediateWin(column)) => {
                    best_move = Some(column);
                    best_score = Some(Score::Win);
                    completed = depth;
                    break Termination::Decided;
                }
                Ok(RootVerdict::Best { column, score }) => {
                    best_move = Some(column);
                    best_score = Some(score);
                    completed = depth;
                    debug!(
                        "depth {depth}: column {column} score {score} nodes {} ({:?})",
                        ctx.stats.nodes,
                        clock.elapsed()
                    );
                    if score == Score::Win {
                        break Termination::Decided;
                    }
                    if ctx.exhausted {
                        break Termination::Exhausted;
                    }
                }
            }
            depth += 1;
        };

        SearchResult {
            best_move,
            score: best_score,
            depth: completed,
            termination,
            stats: ctx.stats,
        }
    }
}

/// Per-turn search state threaded through the recursion.
///
/// Holds the running hash, the "tree exhausted" flag, the caches and the
/// statistics, so the recursive procedure has no hidden state.
pub struct SearchContext<'a> {
    zobrist: &'a ZobristTable,
    order: &'a MoveOrder,
    evaluator: &'a Evaluator,
    cache: &'a mut ResultCache,
    clock: &'a TimeGovernor,
    hash: u64,
    exhausted: bool,
    stats: SearchStats,
}

impl SearchContext<'_> {
    /// Running hash of the current position
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// No open leaf has been reached since the iteration began
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn begin_iteration(&mut self) {
        self.cache.reset_volatile();
        self.exhausted = true;
        self.stats.iterations += 1;
    }

    /// One iteration over the root moves, each searched with a full window.
    fn search_root(&mut self, board: &mut Board, depth: u32) -> Result<RootVerdict, Cancelled> {
        let order = self.order;
        let own = self.evaluator.own();
        let mut best: Option<(usize, Score)> = None;

        for column in order.iter() {
            let Some(mut child) = board.probe(column) else {
                continue;
            };
            if child.current_outcome() == Outcome::Won(own) {
                return Ok(RootVerdict::ImmediateWin(column));
            }

            let score = self.alpha_beta(&mut child, false, Score::Loss, Score::Win, depth)?;
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((column, score));
            }
            if score == Score::Win {
                break;
            }
        }

        Ok(match best {
            Some((column, score)) => RootVerdict::Best { column, score },
            None => RootVerdict::NoMove,
        })
    }

    /// Score the position reached by the board's last move.
    ///
    /// The running hash is toggled for that move on entry and restored on
    /// every exit, including cancellation.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        alpha: Score,
        beta: Score,
        depth: u32,
    ) -> Result<Score, Cancelled> {
        if self.clock.time_up() {
            return Err(Cancelled);
        }
        self.stats.nodes += 1;

        let toggle = board
            .last_move()
            .map_or(0, |p| self.zobrist.key(p.row, p.column, p.player));
        self.hash ^= toggle;
        let result = self.visit(board, maximizing, alpha, beta, depth);
        self.hash ^= toggle;
        result
    }

    fn visit(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        alpha: Score,
        beta: Score,
        depth: u32,
    ) -> Result<Score, Cancelled> {
        let hash = self.hash;
        if let Some(score) = self.cache.lookup(hash, alpha, beta) {
            self.stats.cache_hits += 1;
            return Ok(score);
        }

        let outcome = board.current_outcome();
        let (score, bound) = if depth == 0 || outcome != Outcome::Open {
            if outcome == Outcome::Open {
                // Cut by the horizon: a deeper iteration could still change this
                self.exhausted = false;
            }
            (self.evaluator.evaluate(board), Bound::Exact)
        } else if maximizing {
            self.maximize(board, alpha, beta, depth)?
        } else {
            self.minimize(board, alpha, beta, depth)?
        };

        self.cache.record(hash, score, bound);
        Ok(score)
    }

    fn maximize(
        &mut self,
        board: &mut Board,
        mut alpha: Score,
        beta: Score,
        depth: u32,
    ) -> Result<(Score, Bound), Cancelled> {
        let order = self.order;
        let floor = alpha;
        let mut best = Score::Loss;

        for column in order.iter() {
            if concedes_immediate_win(board, column) {
                self.stats.skipped_moves += 1;
                continue;
            }
            let Some(mut child) = board.probe(column) else {
                continue;
            };
            let score = self.alpha_beta(&mut child, false, alpha, beta, depth - 1)?;
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best >= beta {
            Bound::Lower
        } else if best <= floor {
            Bound::Upper
        } else {
            Bound::Exact
        };
        Ok((best, bound))
    }

    fn minimize(
        &mut self,
        board: &mut Board,
        alpha: Score,
        mut beta: Score,
        depth: u32,
    ) -> Result<(Score, Bound), Cancelled> {
        let order = self.order;
        let ceiling = beta;
        let mut best = Score::Win;

        for column in order.iter() {
            if concedes_immediate_win(board, column) {
                self.stats.skipped_moves += 1;
                continue;
            }
            let Some(mut child) = board.probe(column) else {
                continue;
            };
            let score = self.alpha_beta(&mut child, true, alpha, beta, depth - 1)?;
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha {
            Bound::Upper
        } else if best >= ceiling {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Ok((best, bound))
    }
}
