//! The move-choosing search.
//!
//! `Searcher` runs iterative-deepening minimax with alpha-beta pruning over
//! the board's tiered candidate sets. Depths go 2, 4, 6, 8; each completed
//! iteration narrows the root set to the moves scoring within a small window
//! of the best, so later iterations spend the clock on the live contenders.
//! The per-turn budget is enforced cooperatively: the wall clock is re-read
//! after every child, and on expiry the search unwinds keeping the best
//! fully-evaluated answer found so far.
//!
//! Two deliberate asymmetries shape the tree. Pruning is relaxed by a
//! tolerance (`alpha ≥ beta + prune_limit`), keeping near-equal siblings
//! alive for the final ranking. And the minimizing side's backed-up scores
//! are damped by `1 + depth/10`, so among equal outcomes the line that
//! resolves later weighs heavier against us.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use rand::{thread_rng, Rng};
use tracing::debug;

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};
use crate::eval::WIN_SCORE;

use super::SearchError;

/// Deepest main-search iteration.
const MAX_DEPTH: i32 = 8;
/// Depth of the forcing-moves-only extension below the horizon.
const CHECKMATE_DEPTH: i32 = 4;
/// Root moves within this many points of the best survive to the next depth.
const ROOT_WINDOW: i32 = 10;
/// Reserve carved out of the turn budget for unwinding and I/O.
const SAFETY_MARGIN_MS: u64 = 15;
/// Full per-turn allowance in milliseconds.
const DEFAULT_TURN_MS: u64 = 990;

/// The chosen move plus the diagnostics that came with finding it.
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    pub pos: Pos,
    pub score: i32,
    /// Deepest iteration reached.
    pub depth: i32,
    pub elapsed: Duration,
    pub timed_out: bool,
}

impl MoveResult {
    /// One-line diagnostics string for the judge's debug channel.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "t: {}ms; timeout: {}; final_d: {}",
            self.elapsed.as_millis(),
            self.timed_out,
            self.depth
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct RootMove {
    pos: Pos,
    score: i32,
}

#[derive(Debug, Clone, Copy)]
struct Scored {
    pos: Pos,
    score: i32,
    depth: i32,
}

/// Minimax searcher bound to one side.
pub struct Searcher {
    identity: Stone,
    /// Defensiveness `w ∈ [0, 1]`: evaluation is `own − (1−w)·opp`, so 0
    /// fears the opponent's position at full strength.
    weight: f32,
    /// Pruning tolerance and final-ranking score window.
    prune_limit: i32,
    budget: Duration,
    start: Instant,
    timed_out: bool,
}

impl Searcher {
    pub fn new(identity: Stone) -> Self {
        Self::with_config(identity, 0.5, 20, DEFAULT_TURN_MS)
    }

    /// Build a searcher with explicit tuning. `turn_ms` is the full per-turn
    /// allowance; the safety margin is carved out internally.
    pub fn with_config(identity: Stone, weight: f32, prune_limit: i32, turn_ms: u64) -> Self {
        Self {
            identity,
            weight: weight.clamp(0.0, 1.0),
            prune_limit,
            budget: Duration::from_millis(turn_ms.saturating_sub(SAFETY_MARGIN_MS)),
            start: Instant::now(),
            timed_out: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> Stone {
        self.identity
    }

    /// Choose a move for the current position.
    ///
    /// On an empty board this returns a near-center cell without searching.
    /// Otherwise it deepens until the budget runs out, a winning line is
    /// proven, or the deepest iteration completes, and ranks the per-depth
    /// answers:
    /// outside the tolerance window the raw score decides; within it a
    /// winning score prefers the shallower (faster) line and a losing score
    /// the deeper (slower) one.
    pub fn calculate(&mut self, board: &mut Board) -> Result<MoveResult, SearchError> {
        self.start = Instant::now();
        self.timed_out = false;

        if board.stone_count() == 0 {
            let mut rng = thread_rng();
            let pos = Pos::new(rng.gen_range(7..=8), rng.gen_range(7..=8));
            return Ok(MoveResult {
                pos,
                score: 0,
                depth: 0,
                elapsed: self.start.elapsed(),
                timed_out: false,
            });
        }

        let mut moves: Vec<RootMove> = board
            .candidates(self.identity, self.identity, false)
            .into_iter()
            .map(|c| RootMove {
                pos: c.pos,
                score: 0,
            })
            .collect();
        if moves.is_empty() {
            return Err(SearchError::NoMove);
        }

        let mut results: Vec<Scored> = Vec::new();
        let mut final_depth = 0;
        for depth in (2..=MAX_DEPTH).step_by(2) {
            let keep = self.search_root(board, depth, &mut moves)?;
            final_depth = depth;
            if self.timed_out {
                // Partial iteration: only usable if nothing finished yet.
                if results.is_empty() {
                    results.extend(moves.iter().take(keep).map(|m| Scored {
                        pos: m.pos,
                        score: m.score,
                        depth,
                    }));
                }
                break;
            }
            results.extend(moves.iter().take(keep).map(|m| Scored {
                pos: m.pos,
                score: m.score,
                depth,
            }));
            moves.truncate(keep);
            if moves[0].score >= WIN_SCORE {
                break;
            }
        }

        let mut best = results[0];
        for candidate in &results[1..] {
            best = self.prefer(best, *candidate);
        }
        let result = MoveResult {
            pos: best.pos,
            score: best.score,
            depth: final_depth,
            elapsed: self.start.elapsed(),
            timed_out: self.timed_out,
        };
        debug!(
            row = result.pos.row as u32,
            col = result.pos.col as u32,
            score = result.score,
            depth = result.depth,
            elapsed_ms = result.elapsed.as_millis() as u64,
            timed_out = result.timed_out,
            cache_len = board.cache_len(),
            "move chosen"
        );
        Ok(result)
    }

    /// Score every root move at `depth` and sort best-first. Returns how
    /// many leading moves fall within [`ROOT_WINDOW`] of the best.
    fn search_root(
        &mut self,
        board: &mut Board,
        depth: i32,
        moves: &mut [RootMove],
    ) -> Result<usize, SearchError> {
        for m in moves.iter_mut() {
            board.place_stone(m.pos, self.identity)?;
            let score = self.minimax(
                board,
                depth - 1,
                i32::MIN,
                i32::MAX,
                self.identity.opponent(),
                false,
            )?;
            board.remove_stone(m.pos)?;
            m.score = score;
            if self.out_of_time() {
                self.timed_out = true;
                break;
            }
        }
        moves.sort_unstable_by_key(|m| Reverse(m.score));
        let best = moves[0].score;
        Ok(moves
            .iter()
            .take_while(|m| best as i64 - m.score as i64 <= ROOT_WINDOW as i64)
            .count())
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        to_move: Stone,
        checkmate_only: bool,
    ) -> Result<i32, SearchError> {
        if !checkmate_only {
            if let Some(entry) = board.cache_probe(depth) {
                return Ok(entry.score);
            }
        }
        if board.is_won() {
            let score = self.evaluate(board);
            if !checkmate_only && !self.timed_out {
                board.cache_store(score, depth);
            }
            return Ok(score);
        }
        if depth <= 0 {
            if checkmate_only {
                return Ok(self.evaluate(board));
            }
            // Horizon: settle forcing sequences before trusting the eval.
            let score = self.minimax(board, CHECKMATE_DEPTH, alpha, beta, to_move, true)?;
            if !self.timed_out {
                board.cache_store(score, depth);
            }
            return Ok(score);
        }

        let candidates = board.candidates(to_move, self.identity, checkmate_only);
        if candidates.is_empty() {
            debug_assert!(checkmate_only || board.stone_count() == TOTAL_CELLS as u32);
            return Ok(self.evaluate(board));
        }

        if to_move == self.identity {
            let mut best = i32::MIN;
            for cand in candidates {
                board.place_stone(cand.pos, to_move)?;
                let score =
                    self.minimax(board, depth - 1, alpha, beta, to_move.opponent(), checkmate_only)?;
                board.remove_stone(cand.pos)?;
                // i32::MAX marks a minimizing child abandoned before any
                // evaluation; never back it up.
                if score != i32::MAX && score > best {
                    best = score;
                    alpha = alpha.max(best);
                }
                if self.out_of_time() {
                    self.timed_out = true;
                    break;
                }
                if alpha as i64 >= beta as i64 + self.prune_limit as i64 || alpha >= WIN_SCORE {
                    break;
                }
            }
            if !checkmate_only && !self.timed_out {
                board.cache_store(best, depth);
            }
            Ok(best)
        } else {
            let mut best = i32::MAX;
            for cand in candidates {
                board.place_stone(cand.pos, to_move)?;
                let score =
                    self.minimax(board, depth - 1, alpha, beta, to_move.opponent(), checkmate_only)?;
                board.remove_stone(cand.pos)?;
                if score != i32::MIN {
                    let damped = (score as f64 * (1.0 + depth as f64 / 10.0)) as i32;
                    if damped < best {
                        best = damped;
                        beta = beta.min(best);
                    }
                }
                if self.out_of_time() {
                    self.timed_out = true;
                    break;
                }
                if alpha as i64 >= beta as i64 + self.prune_limit as i64 || beta <= -WIN_SCORE {
                    break;
                }
            }
            if !checkmate_only && !self.timed_out {
                board.cache_store(best, depth);
            }
            Ok(best)
        }
    }

    /// Static evaluation from the searcher's point of view.
    #[inline]
    fn evaluate(&self, board: &Board) -> i32 {
        let own = board.score(self.identity) as f32;
        let opp = board.score(self.identity.opponent()) as f32;
        (own - (1.0 - self.weight) * opp) as i32
    }

    /// Rank two per-depth answers. Scores apart by more than the tolerance
    /// compare raw; within it, a winning score prefers the shallower depth
    /// and anything else the deeper one.
    fn prefer(&self, a: Scored, b: Scored) -> Scored {
        if (a.score as i64 - b.score as i64).abs() > self.prune_limit as i64 {
            if b.score > a.score {
                b
            } else {
                a
            }
        } else if a.score > 0 {
            if b.depth < a.depth {
                b
            } else {
                a
            }
        } else if b.depth > a.depth {
            b
        } else {
            a
        }
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        self.start.elapsed() >= self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardError;

    #[test]
    fn test_evaluate_weighting() -> Result<(), BoardError> {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black)?;
        board.place_stone(Pos::new(0, 0), Stone::White)?;

        let fearless = Searcher::with_config(Stone::Black, 1.0, 20, 990);
        let fearful = Searcher::with_config(Stone::Black, 0.0, 20, 990);
        assert_eq!(fearless.evaluate(&board), board.score(Stone::Black));
        assert_eq!(
            fearful.evaluate(&board),
            board.score(Stone::Black) - board.score(Stone::White)
        );
        Ok(())
    }

    #[test]
    fn test_empty_board_opens_near_center() {
        let mut board = Board::new();
        let mut searcher = Searcher::new(Stone::Black);
        let result = searcher.calculate(&mut board).unwrap();
        assert!((7..=8).contains(&result.pos.row));
        assert!((7..=8).contains(&result.pos.col));
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_tiny_budget_still_returns_a_move() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::White).unwrap();
        let mut searcher = Searcher::with_config(Stone::Black, 0.5, 20, SAFETY_MARGIN_MS);
        let result = searcher.calculate(&mut board).unwrap();
        assert!(board.is_empty(result.pos));
    }

    #[test]
    fn test_prefer_raw_score_outside_tolerance() {
        let searcher = Searcher::with_config(Stone::Black, 0.5, 20, 990);
        let a = Scored {
            pos: Pos::new(0, 0),
            score: 100,
            depth: 2,
        };
        let b = Scored {
            pos: Pos::new(1, 1),
            score: 500,
            depth: 4,
        };
        assert_eq!(searcher.prefer(a, b).pos, b.pos);
    }

    #[test]
    fn test_prefer_fast_win_and_slow_loss() {
        let searcher = Searcher::with_config(Stone::Black, 0.5, 20, 990);
        let shallow_win = Scored {
            pos: Pos::new(0, 0),
            score: WIN_SCORE,
            depth: 2,
        };
        let deep_win = Scored {
            pos: Pos::new(1, 1),
            score: WIN_SCORE + 5,
            depth: 6,
        };
        assert_eq!(searcher.prefer(deep_win, shallow_win).pos, shallow_win.pos);

        let shallow_loss = Scored {
            pos: Pos::new(2, 2),
            score: -WIN_SCORE,
            depth: 2,
        };
        let deep_loss = Scored {
            pos: Pos::new(3, 3),
            score: -WIN_SCORE + 5,
            depth: 6,
        };
        assert_eq!(searcher.prefer(shallow_loss, deep_loss).pos, deep_loss.pos);
    }
}
