//! An exhaustive alpha-beta search for k×n positions

use tracing::debug;

use crate::board::{KnBoard, Move, ScopedMove};

/// Stands in for infinity in the initial search window, real scores lie in [-1, 1]
pub const SCORE_BOUND: f64 = 9_999_999.0;

/// An agent to search k×n positions
///
/// # Notes
/// The search walks the whole game tree up to the requested depth, mutating
/// and restoring a single borrowed board. Player one maximises, player two
/// minimises. The `Solver` itself holds no search state besides the node
/// counter.
///
/// # Position Scoring
/// A leaf is scored as `game_winner() / plies`: +1 or -1 for the winner,
/// divided by the number of plies played so that quicker wins are worth more.
/// Positions that are not over when the depth runs out score 0.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    pub fn new() -> Self {
        Self { node_count: 0 }
    }

    /// The score of a leaf position
    pub fn terminal_score(board: &KnBoard) -> f64 {
        // nothing can be won before the first ply
        if board.plies() == 0 {
            return 0.0;
        }
        board.game_winner() as f64 / board.plies() as f64
    }

    /// Best score player one can force from `board`, tightening the window `[alpha, beta]`
    pub fn max_value(&mut self, board: &mut KnBoard, depth: usize, mut alpha: f64, beta: f64) -> f64 {
        self.node_count += 1;
        if depth == 0 || board.is_game_over() {
            return Self::terminal_score(board);
        }

        let mut max = -1.0;
        for next in board.available_moves() {
            let score = {
                let mut child = ScopedMove::new(board, next);
                self.min_value(&mut child, depth - 1, alpha, beta)
            };
            max = f64::max(max, score);

            // player two will never allow this branch
            if max >= beta {
                return max;
            }
            alpha = f64::max(alpha, max);
        }
        max
    }

    /// Best score player two can force from `board`, tightening the window `[alpha, beta]`
    pub fn min_value(&mut self, board: &mut KnBoard, depth: usize, alpha: f64, mut beta: f64) -> f64 {
        self.node_count += 1;
        if depth == 0 || board.is_game_over() {
            return Self::terminal_score(board);
        }

        let mut min = 1.0;
        for next in board.available_moves() {
            let score = {
                let mut child = ScopedMove::new(board, next);
                self.max_value(&mut child, depth - 1, alpha, beta)
            };
            min = f64::min(min, score);

            // player one will never allow this branch
            if min <= alpha {
                return min;
            }
            beta = f64::min(beta, min);
        }
        min
    }

    /// Scores `board` for the player to move with a full search window
    pub fn alphabeta(&mut self, board: &mut KnBoard, depth: usize) -> f64 {
        if board.player_one_to_move() {
            self.max_value(board, depth, -SCORE_BOUND, SCORE_BOUND)
        } else {
            self.min_value(board, depth, -SCORE_BOUND, SCORE_BOUND)
        }
    }

    /// Plain minimax without pruning, gives the same value as [`alphabeta`](Solver::alphabeta)
    pub fn minimax(&mut self, board: &mut KnBoard, depth: usize) -> f64 {
        self.node_count += 1;
        if depth == 0 || board.is_game_over() {
            return Self::terminal_score(board);
        }

        let maximising = board.player_one_to_move();
        let mut best: f64 = if maximising { -1.0 } else { 1.0 };
        for next in board.available_moves() {
            let score = {
                let mut child = ScopedMove::new(board, next);
                self.minimax(&mut child, depth - 1)
            };
            best = if maximising {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    /// Scores every available move by searching the resulting position to `depth - 1`
    pub fn score_moves(&mut self, board: &mut KnBoard, depth: usize) -> Vec<(Move, f64)> {
        board
            .available_moves()
            .into_iter()
            .map(|next| {
                let mut child = ScopedMove::new(board, next);
                let score = self.alphabeta(&mut child, depth.saturating_sub(1));
                (next, score)
            })
            .collect()
    }

    /// Picks the best move for the maximising or minimising player
    ///
    /// Ties go to the first move in row-major order. Returns `None` only
    /// if the board has no empty cell.
    pub fn best_move_for(&mut self, board: &mut KnBoard, depth: usize, maximizing: bool) -> Option<Move> {
        let start_nodes = self.node_count;
        let scores = self.score_moves(board, depth);
        debug!(
            ?scores,
            nodes = self.node_count - start_nodes,
            "scored candidate moves"
        );

        let mut best: Option<(Move, f64)> = None;
        for (next, score) in scores {
            let better = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((next, score));
            }
        }
        best.map(|(next, _)| next)
    }
}
