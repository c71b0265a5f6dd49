//! Negamax search with alpha-beta pruning and iterative deepening.
//!
//! Each deepening pass is a complete fixed-depth search. The deadline is only
//! looked at between passes, so the hot recursion never touches the clock and
//! a returned result always comes from a finished pass.

use crate::config::{InvalidConfigurationError, SearchConfig};
use crate::eval::Evaluator;
use crate::Score;
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use reversi_othello::{Board, Color, Location, LocationList, Move, NUM_SPACES};
use std::time::{Duration, Instant};

/// Raised when asked to search a position where neither side can move.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "no legal move: the game is already over")]
pub struct NoLegalMoveError;

/// The outcome of a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// Best move for the searching color, or a pass if it has no placement.
    pub best_move: Move,
    /// Value of `best_move`; positive favors the searching color.
    /// A line that ends the game scores its disc differential times
    /// [`DECIDED_GAME_SCALE`](crate::eval::DECIDED_GAME_SCALE).
    pub score: Score,
    /// Depth of the last completed pass, or the deepest ply reached when the
    /// game ends inside the search horizon.
    pub depth: u8,
    /// Positions visited over every pass.
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Children of one node, in the order they will be searched.
type Children = ArrayVec<Location, NUM_SPACES>;

/// Alpha-beta searcher: a validated configuration and the evaluator built from it.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: SearchConfig,
    evaluator: Evaluator,
}

impl Searcher {
    /// Build a searcher, rejecting invalid configurations up front.
    pub fn new(config: SearchConfig) -> Result<Self, InvalidConfigurationError> {
        config.validate()?;

        Ok(Self {
            evaluator: Evaluator::new(config.weights),
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Choose a move for `color` by iterative deepening up to the configured depth,
    /// stopping early between passes once the time limit has passed.
    pub fn search(&self, board: Board, color: Color) -> Result<SearchResult, NoLegalMoveError> {
        if board.is_terminal() {
            return Err(NoLegalMoveError);
        }

        let start = Instant::now();
        let mut nodes = 0;
        let mut best: Option<RootResult> = None;

        for depth in 1..=self.config.max_depth {
            let previous = best.and_then(|result| result.best_move.location());
            let result = self.root(board, color, depth, previous);
            nodes += result.nodes;

            log::debug!(
                "depth {}: {} scores {:.2} ({} nodes, {:?})",
                depth,
                result.best_move,
                result.score,
                result.nodes,
                start.elapsed()
            );

            let solved = !result.horizon_reached;
            best = Some(result);

            if solved {
                log::debug!("game tree solved within depth {}", depth);
                break;
            }

            if let Some(limit) = self.config.time_limit {
                if start.elapsed() >= limit {
                    log::debug!("time limit of {:?} reached after depth {}", limit, depth);
                    break;
                }
            }
        }

        // max_depth >= 1 is checked in `new`, so at least one pass ran.
        let best = best.ok_or(NoLegalMoveError)?;
        let result = best.finish(nodes, start.elapsed());

        log::info!(
            "{} plays {} (score {:.2}, depth {}, {} nodes)",
            color,
            result.best_move,
            result.score,
            result.depth,
            result.nodes
        );

        Ok(result)
    }

    /// Run a single alpha-beta pass to `depth` plies (at least one), without deepening.
    pub fn search_depth(
        &self,
        board: Board,
        color: Color,
        depth: u8,
    ) -> Result<SearchResult, NoLegalMoveError> {
        if board.is_terminal() {
            return Err(NoLegalMoveError);
        }

        let depth = depth.max(1);
        let start = Instant::now();
        let result = self.root(board, color, depth, None);
        Ok(result.finish(result.nodes, start.elapsed()))
    }

    /// Plain minimax to `depth` plies: same move order and leaf values as the
    /// alpha-beta pass, but every node is expanded. Reference for testing.
    pub fn minimax(
        &self,
        board: Board,
        color: Color,
        depth: u8,
    ) -> Result<SearchResult, NoLegalMoveError> {
        if board.is_terminal() {
            return Err(NoLegalMoveError);
        }

        let depth = depth.max(1);
        let start = Instant::now();
        let mut pass = Pass::new(&self.evaluator, depth);
        let moves = board.legal_moves(color);

        let (best_move, score) = if moves.is_empty() {
            (Move::Pass, -pass.minimax(board, !color, depth, 0))
        } else {
            let mut best_move = Move::Pass;
            let mut best_score = Score::NEG_INFINITY;

            for loc in pass.order(moves) {
                let child = board.place_unchecked(color, loc);
                let score = -pass.minimax(child, !color, depth - 1, 1);
                if score > best_score {
                    best_score = score;
                    best_move = Move::Piece(loc);
                }
            }

            (best_move, best_score)
        };

        let result = pass.into_root(best_move, score);
        Ok(result.finish(result.nodes, start.elapsed()))
    }

    /// Search the root to `depth`, trying `first` before the ordered moves.
    fn root(
        &self,
        board: Board,
        color: Color,
        depth: u8,
        first: Option<Location>,
    ) -> RootResult {
        let mut pass = Pass::new(&self.evaluator, depth);
        let moves = board.legal_moves(color);

        if moves.is_empty() {
            // Forced pass: the opponent moves on the same board, depth unchanged.
            let score = -pass.negamax(
                board,
                !color,
                depth,
                0,
                Score::NEG_INFINITY,
                Score::INFINITY,
            );
            return pass.into_root(Move::Pass, score);
        }

        let mut children = pass.order(moves);
        if let Some(first) = first {
            if let Some(index) = children.iter().position(|&loc| loc == first) {
                children[..=index].rotate_right(1);
            }
        }

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return self.root_parallel(board, color, depth, &children);
            }
        }

        let mut alpha = Score::NEG_INFINITY;
        let beta = Score::INFINITY;
        let mut best_move = Move::Pass;
        let mut best_score = Score::NEG_INFINITY;

        for loc in children {
            let child = board.place_unchecked(color, loc);
            let score = -pass.negamax(child, !color, depth - 1, 1, -beta, -alpha);

            // Strict improvement only: ties keep the earlier move.
            if score > best_score {
                best_score = score;
                best_move = Move::Piece(loc);
            }
            if score > alpha {
                alpha = score;
            }
        }

        pass.into_root(best_move, best_score)
    }

    /// Search each root child on the rayon pool with a full window, then reduce
    /// by score with the earliest child winning ties.
    #[cfg(feature = "parallel")]
    fn root_parallel(
        &self,
        board: Board,
        color: Color,
        depth: u8,
        children: &[Location],
    ) -> RootResult {
        use rayon::prelude::*;

        let branches: Vec<(Location, Score, Pass)> = children
            .par_iter()
            .map(|&loc| {
                let mut pass = Pass::new(&self.evaluator, depth);
                let child = board.place_unchecked(color, loc);
                let score = -pass.negamax(
                    child,
                    !color,
                    depth - 1,
                    1,
                    Score::NEG_INFINITY,
                    Score::INFINITY,
                );
                (loc, score, pass)
            })
            .collect();

        let mut total = Pass::new(&self.evaluator, depth);
        let mut best_move = Move::Pass;
        let mut best_score = Score::NEG_INFINITY;

        for (loc, score, pass) in branches {
            total.absorb(&pass);
            if score > best_score {
                best_score = score;
                best_move = Move::Piece(loc);
            }
        }

        total.into_root(best_move, best_score)
    }
}

/// Result of one root pass, before pass totals are folded in.
#[derive(Clone, Copy, Debug)]
struct RootResult {
    best_move: Move,
    score: Score,
    depth: u8,
    nodes: u64,
    horizon_reached: bool,
}

impl RootResult {
    fn finish(self, nodes: u64, elapsed: Duration) -> SearchResult {
        SearchResult {
            best_move: self.best_move,
            score: self.score,
            depth: self.depth,
            nodes,
            elapsed,
        }
    }
}

/// Bookkeeping for a single fixed-depth pass.
struct Pass<'a> {
    evaluator: &'a Evaluator,
    depth: u8,
    nodes: u64,
    /// Set when some leaf was cut off by depth rather than by the end of the game.
    horizon_reached: bool,
    /// Deepest ply at which a finished game was scored.
    deepest_ending: u8,
}

impl<'a> Pass<'a> {
    fn new(evaluator: &'a Evaluator, depth: u8) -> Self {
        Self {
            evaluator,
            depth,
            nodes: 0,
            horizon_reached: false,
            deepest_ending: 0,
        }
    }

    /// Order moves by descending square weight; equal weights keep index order.
    fn order(&self, moves: LocationList) -> Children {
        let mut children: Children = moves.collect();
        children.sort_by(|a, b| {
            self.evaluator
                .cell_weight(*b)
                .total_cmp(&self.evaluator.cell_weight(*a))
        });
        children
    }

    /// Score a node that will not be expanded, or None if it must be.
    /// `moves` are the mover's placements at this node.
    #[inline]
    fn leaf(
        &mut self,
        board: Board,
        color: Color,
        moves: LocationList,
        depth: u8,
        ply: u8,
    ) -> Option<Score> {
        if moves.is_empty() && !board.has_moves(!color) {
            self.deepest_ending = self.deepest_ending.max(ply);
            return Some(Evaluator::decided_value(&board, color));
        }

        if depth == 0 {
            self.horizon_reached = true;
            return Some(self.evaluator.heuristic_score(&board, color));
        }

        None
    }

    fn negamax(
        &mut self,
        board: Board,
        color: Color,
        depth: u8,
        ply: u8,
        mut alpha: Score,
        beta: Score,
    ) -> Score {
        self.nodes += 1;

        let moves = board.legal_moves(color);
        if let Some(score) = self.leaf(board, color, moves, depth, ply) {
            return score;
        }

        if moves.is_empty() {
            return -self.negamax(board, !color, depth, ply, -beta, -alpha);
        }

        let mut best = Score::NEG_INFINITY;
        for loc in self.order(moves) {
            let child = board.place_unchecked(color, loc);
            let score = -self.negamax(child, !color, depth - 1, ply + 1, -beta, -alpha);

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            // Cutoff: the opponent already has a better line elsewhere.
            if alpha >= beta {
                break;
            }
        }

        best
    }

    fn minimax(&mut self, board: Board, color: Color, depth: u8, ply: u8) -> Score {
        self.nodes += 1;

        let moves = board.legal_moves(color);
        if let Some(score) = self.leaf(board, color, moves, depth, ply) {
            return score;
        }

        if moves.is_empty() {
            return -self.minimax(board, !color, depth, ply);
        }

        let mut best = Score::NEG_INFINITY;
        for loc in self.order(moves) {
            let child = board.place_unchecked(color, loc);
            best = best.max(-self.minimax(child, !color, depth - 1, ply + 1));
        }

        best
    }

    #[cfg(feature = "parallel")]
    fn absorb(&mut self, other: &Pass) {
        self.nodes += other.nodes;
        self.horizon_reached |= other.horizon_reached;
        self.deepest_ending = self.deepest_ending.max(other.deepest_ending);
    }

    fn into_root(self, best_move: Move, score: Score) -> RootResult {
        RootResult {
            best_move,
            score,
            depth: if self.horizon_reached {
                self.depth
            } else {
                self.deepest_ending.max(1)
            },
            // The root itself plus everything below it.
            nodes: self.nodes + 1,
            horizon_reached: self.horizon_reached,
        }
    }
}
