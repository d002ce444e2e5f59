//! Gomoku engine: five-in-a-row on a 15×15 board under a strict per-turn
//! time budget.
//!
//! The crate splits into three layers:
//!
//! - [`board`]: the board with its incrementally maintained pattern/score
//!   model, neighbor counters, zobrist hashing, transposition cache, and
//!   tiered candidate generation.
//! - [`eval`]: the line-pattern classes, their weights, and the pure
//!   classification table.
//! - [`search`]: iterative-deepening alpha-beta minimax with a cooperative
//!   wall-clock cutoff and a forcing-moves extension below the horizon.
//!
//! ```no_run
//! use gomoku_minimax::{Board, Pos, Searcher, Stone};
//!
//! # fn main() -> Result<(), gomoku_minimax::SearchError> {
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::White)?;
//! let mut searcher = Searcher::new(Stone::Black);
//! let result = searcher.calculate(&mut board)?;
//! board.place_stone(result.pos, Stone::Black)?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod eval;
pub mod search;

pub use board::{Board, BoardError, Candidate, Pos, Stone, BOARD_SIZE};
pub use eval::{Pattern, WIN_SCORE};
pub use search::{MoveResult, SearchError, Searcher};
