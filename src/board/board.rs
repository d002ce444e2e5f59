//! The board and its incrementally maintained score model.
//!
//! `Board` keeps, alongside the raw grid, everything the search reads hot:
//! per-cell neighbor counters, per-player pattern tables for the four lines
//! through every cell, per-player score totals, a win flag, and a zobrist
//! position hash keying the transposition cache. Every mutation updates all
//! of it locally; there is never a full-board rescan.

use std::fmt;

use rand::thread_rng;

use crate::eval::{classify, Pattern};

use super::cache::{CacheEntry, ScoreCache};
use super::zobrist::ZobristTable;
use super::{BoardError, Direction, Pos, Stone, BOARD_SIZE, SCORE_RANGE, TOTAL_CELLS};

/// 15×15 Gomoku board with incremental pattern/score bookkeeping.
pub struct Board {
    grid: [[Stone; BOARD_SIZE]; BOARD_SIZE],
    /// Stones within Chebyshev distance 1 of each cell.
    ring1: [[u8; BOARD_SIZE]; BOARD_SIZE],
    /// Stones at Chebyshev distance exactly 2.
    ring2: [[u8; BOARD_SIZE]; BOARD_SIZE],
    stones: u32,
    win: bool,
    /// Per player: sum of that player's pattern weights over occupied cells.
    totals: [i32; 2],
    /// `[player][cell][direction]`: the pattern a stone of that player at
    /// that cell anchors along that line. For empty cells this is the
    /// hypothetical shape a new stone would make; for occupied cells only
    /// the occupant's entries are kept current.
    patterns: Box<[[[Pattern; 4]; TOTAL_CELLS]; 2]>,
    zobrist: ZobristTable,
    hash: u64,
    cache: ScoreCache,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self {
            grid: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
            ring1: [[0; BOARD_SIZE]; BOARD_SIZE],
            ring2: [[0; BOARD_SIZE]; BOARD_SIZE],
            stones: 0,
            win: false,
            totals: [0; 2],
            patterns: Box::new([[[Pattern::Dead; 4]; TOTAL_CELLS]; 2]),
            zobrist: ZobristTable::new(&mut thread_rng()),
            hash: 0,
            cache: ScoreCache::new(),
        };
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                board.refresh_cell(Pos::new(row, col));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.grid[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    #[inline]
    #[must_use]
    pub fn stone_count(&self) -> u32 {
        self.stones
    }

    #[inline]
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.win
    }

    /// Current zobrist hash of the position.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Total pattern score of one player's stones.
    #[inline]
    #[must_use]
    pub fn score(&self, stone: Stone) -> i32 {
        self.totals[stone.idx()]
    }

    /// Sum of the four directional pattern weights a stone of `stone` has
    /// (or would have) at `pos`.
    #[inline]
    #[must_use]
    pub fn point_score(&self, pos: Pos, stone: Stone) -> i32 {
        let cell = pos.to_index();
        self.patterns[stone.idx()][cell]
            .iter()
            .map(|p| p.weight())
            .sum()
    }

    #[inline]
    pub(crate) fn pattern_at(&self, pos: Pos, stone: Stone, dir: Direction) -> Pattern {
        self.patterns[stone.idx()][pos.to_index()][dir.idx()]
    }

    /// Whether any stone sits within distance 1 of `pos`, or distance 2 when
    /// `include_ring2` is set.
    #[inline]
    pub fn has_neighbor(&self, pos: Pos, include_ring2: bool) -> bool {
        let (r, c) = (pos.row as usize, pos.col as usize);
        self.ring1[r][c] > 0 || (include_ring2 && self.ring2[r][c] > 0)
    }

    /// Place a stone. Fails on out-of-range coordinates or an occupied cell;
    /// the board is untouched on failure.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        debug_assert!(stone != Stone::Empty);
        if !pos.in_range() {
            return Err(BoardError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }

        self.grid[pos.row as usize][pos.col as usize] = stone;
        self.stones += 1;
        self.hash ^= self.zobrist.code(pos, stone);
        self.shift_neighbors(pos, 1);

        self.refresh_cell(pos);
        self.totals[stone.idx()] += self.point_score(pos, stone);
        for dir in Direction::ALL {
            self.refresh_window(pos, dir);
        }

        if !self.win {
            for dir in Direction::ALL {
                let (back, fwd) = self.contiguous_run(pos, stone, dir);
                if 1 + back + fwd >= 5 {
                    self.win = true;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Remove a stone. Fails on out-of-range coordinates or an empty cell;
    /// the board is untouched on failure.
    pub fn remove_stone(&mut self, pos: Pos) -> Result<(), BoardError> {
        if !pos.in_range() {
            return Err(BoardError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        let stone = self.get(pos);
        if stone == Stone::Empty {
            return Err(BoardError::NotOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        self.totals[stone.idx()] -= self.point_score(pos, stone);
        self.grid[pos.row as usize][pos.col as usize] = Stone::Empty;
        self.stones -= 1;
        self.hash ^= self.zobrist.code(pos, stone);
        self.shift_neighbors(pos, -1);

        self.refresh_cell(pos);
        for dir in Direction::ALL {
            self.refresh_window(pos, dir);
        }

        if self.win {
            // The flag can only have been set by a five through this cell:
            // the search never places past a won position, so removals unwind
            // the winning stone before anything else. The flag survives only
            // if a full five of the removed color remains on one side.
            let mut still_won = false;
            for dir in Direction::ALL {
                let (back, fwd) = self.contiguous_run(pos, stone, dir);
                if back >= 5 || fwd >= 5 {
                    still_won = true;
                    break;
                }
            }
            self.win = still_won;
        }
        Ok(())
    }

    /// Number of cached search results accumulated so far.
    #[inline]
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub(crate) fn cache_store(&mut self, score: i32, depth: i32) {
        self.cache.store(self.hash, score, depth);
    }

    #[inline]
    pub(crate) fn cache_probe(&self, depth: i32) -> Option<CacheEntry> {
        self.cache.probe(self.hash, depth)
    }

    /// Length of the contiguous runs of `stone` adjacent to `pos` on each
    /// side of `dir`, not counting `pos` itself.
    fn contiguous_run(&self, pos: Pos, stone: Stone, dir: Direction) -> (i32, i32) {
        let (dr, dc) = dir.delta();
        let mut runs = [0i32; 2];
        for (slot, sign) in [-1i32, 1].into_iter().enumerate() {
            let mut t = 1;
            loop {
                let r = pos.row as i32 + sign * dr * t;
                let c = pos.col as i32 + sign * dc * t;
                if !Pos::is_valid(r, c) || self.grid[r as usize][c as usize] != stone {
                    break;
                }
                runs[slot] += 1;
                t += 1;
            }
        }
        (runs[0], runs[1])
    }

    /// Recompute all eight pattern entries of one cell from the grid.
    fn refresh_cell(&mut self, pos: Pos) {
        for stone in [Stone::Black, Stone::White] {
            for dir in Direction::ALL {
                let pattern = self.classify_line(pos, stone, dir);
                self.patterns[stone.idx()][pos.to_index()][dir.idx()] = pattern;
            }
        }
    }

    /// Recompute the `dir` entries of every cell within scan range of a
    /// mutated cell, folding score deltas of occupied cells into the totals.
    fn refresh_window(&mut self, pos: Pos, dir: Direction) {
        let (dr, dc) = dir.delta();
        for sign in [-1i32, 1] {
            for t in 1..=SCORE_RANGE {
                let r = pos.row as i32 + sign * dr * t;
                let c = pos.col as i32 + sign * dc * t;
                if !Pos::is_valid(r, c) {
                    break;
                }
                let cell = Pos::new(r as u8, c as u8);
                let occupant = self.get(cell);
                if occupant == Stone::Empty {
                    for stone in [Stone::Black, Stone::White] {
                        let pattern = self.classify_line(cell, stone, dir);
                        self.patterns[stone.idx()][cell.to_index()][dir.idx()] = pattern;
                    }
                } else {
                    let idx = occupant.idx();
                    let old = self.patterns[idx][cell.to_index()][dir.idx()].weight();
                    let pattern = self.classify_line(cell, occupant, dir);
                    self.patterns[idx][cell.to_index()][dir.idx()] = pattern;
                    self.totals[idx] += pattern.weight() - old;
                }
            }
        }
    }

    /// Scan the line through `pos` along `dir` for a (possibly hypothetical)
    /// stone of `stone` there, and classify the shape.
    ///
    /// The scan walks up to [`SCORE_RANGE`] cells per side, counting own
    /// stones into the run and stopping at an edge or opponent stone (a
    /// block) or at an empty cell. A single empty cell backed by a further
    /// own stone is stepped over and recorded as the gap; the backward side
    /// is scanned first and at most one gap is admitted in total.
    fn classify_line(&self, pos: Pos, stone: Stone, dir: Direction) -> Pattern {
        let (dr, dc) = dir.delta();
        let mut run = 1i32;
        let mut blocks = 0i32;
        let mut gap: Option<i32> = None;

        for sign in [-1i32, 1] {
            for t in 1..=SCORE_RANGE {
                let r = pos.row as i32 + sign * dr * t;
                let c = pos.col as i32 + sign * dc * t;
                if !Pos::is_valid(r, c) {
                    blocks += 1;
                    break;
                }
                let cell = self.grid[r as usize][c as usize];
                if cell == stone {
                    run += 1;
                    if sign > 0 {
                        if let Some(g) = gap.as_mut() {
                            *g += 1;
                        }
                    }
                } else if cell == Stone::Empty {
                    let nr = r + sign * dr;
                    let nc = c + sign * dc;
                    let bridged = gap.is_none()
                        && Pos::is_valid(nr, nc)
                        && self.grid[nr as usize][nc as usize] == stone;
                    if bridged {
                        gap = Some(if sign > 0 { 0 } else { run });
                    } else {
                        break;
                    }
                } else {
                    blocks += 1;
                    break;
                }
            }
        }
        classify(run, blocks, gap)
    }

    /// Adjust the neighbor counters in the distance-2 box around `pos`.
    fn shift_neighbors(&mut self, pos: Pos, delta: i8) {
        for dr in -2i32..=2 {
            for dc in -2i32..=2 {
                let r = pos.row as i32 + dr;
                let c = pos.col as i32 + dc;
                if !Pos::is_valid(r, c) {
                    continue;
                }
                let ring = if dr.abs() <= 1 && dc.abs() <= 1 {
                    &mut self.ring1[r as usize][c as usize]
                } else {
                    &mut self.ring2[r as usize][c as usize]
                };
                *ring = (*ring as i8 + delta) as u8;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{col:>2} ")?;
        }
        writeln!(f)?;
        for (row, cells) in self.grid.iter().enumerate() {
            write!(f, "{row:>2} ")?;
            for cell in cells {
                let glyph = match cell {
                    Stone::Empty => '·',
                    Stone::Black => '●',
                    Stone::White => '○',
                };
                write!(f, " {glyph} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
