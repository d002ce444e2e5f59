//! Board representation for 15×15 Gomoku

pub mod board;
pub mod cache;
pub mod candidates;
pub mod zobrist;


// Re-exports
pub use board::Board;
pub use cache::{CacheEntry, ScoreCache};
pub use candidates::Candidate;

use thiserror::Error;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// How far a line scan reaches from its anchor cell.
pub const SCORE_RANGE: i32 = 5;

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Table index for a colored stone. Must not be called on `Empty`.
    #[inline]
    pub(crate) fn idx(self) -> usize {
        debug_assert!(self != Stone::Empty);
        match self {
            Stone::White => 1,
            _ => 0,
        }
    }
}

/// The four line orientations through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right
    DiagDown,
    /// Bottom-left to top-right
    DiagUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagDown,
        Direction::DiagUp,
    ];

    /// Unit step (row, col) along the line.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagDown => (1, 1),
            Direction::DiagUp => (-1, 1),
        }
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        match self {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
            Direction::DiagDown => 2,
            Direction::DiagUp => 3,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Whether this position lies on the board. Guards against positions
    /// built directly from untrusted coordinates.
    #[inline]
    pub fn in_range(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }
}

/// Contract violations on board mutation.
///
/// These indicate caller bugs rather than runtime conditions, but they are
/// surfaced as errors so a driving process can recover instead of dying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the 15x15 board")]
    OutOfRange { row: u8, col: u8 },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },
    #[error("cell ({row}, {col}) is already empty")]
    NotOccupied { row: u8, col: u8 },
}
