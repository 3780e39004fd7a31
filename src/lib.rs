//! A perfect agent for the k×n adjacency game
//!
//! Two players take turns marking empty cells of a k×n grid. A player whose
//! mark ends up horizontally or vertically next to one of their own marks
//! loses. If the grid fills without such a pair, player one wins on an odd
//! number of cells and player two on an even number.
//!
//! This agent walks the full game tree with alpha-beta pruning to find the
//! best move for either player.
//!
//! # Basic Usage
//!
//! ```
//! use kn_adjacency::{board::KnBoard, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = KnBoard::new(1, 3)?;
//! let mut solver = Solver::new();
//!
//! // every opening loses to best play on a 1x3 board, so the first cell is picked
//! let best_move = solver.best_move_for(&mut board, 3, true);
//! let score = solver.alphabeta(&mut board, 3);
//!
//! assert_eq!(best_move, Some((0, 0)));
//! assert_eq!(score, -1.0 / 3.0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod solver;

pub mod game;


pub use board::{Cell, GameState, KnBoard, Move, ScopedMove};
pub use error::BoardError;
pub use game::GameConfig;
pub use solver::Solver;

// the search window sentinel must lie outside every reachable score
const_assert!(solver::SCORE_BOUND > 1.0);

assert_impl_all!(KnBoard: Clone, Send, Sync);
assert_impl_all!(BoardError: std::error::Error, Send, Sync);
