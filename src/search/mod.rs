//! Iterative-deepening alpha-beta search

pub mod minimax;

pub use minimax::{MoveResult, Searcher};

use thiserror::Error;

use crate::board::BoardError;

/// Failures surfaced by a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("no playable cell remains")]
    NoMove,
}
