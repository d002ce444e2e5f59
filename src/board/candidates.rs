//! Tiered candidate move generation.
//!
//! Reads the board's stored pattern tables (never re-scanning lines) to sort
//! empty cells into threat tiers, and returns only the most urgent non-empty
//! tier. Forced moves therefore produce tiny candidate sets and the search
//! tree stays narrow where it matters.

use std::cmp::Reverse;

use crate::eval::Pattern;

use super::board::Board;
use super::{Direction, Pos, Stone, BOARD_SIZE};

/// Cap on the low-urgency tiers (open twos, plain neighbors).
const TIER_CAP: usize = 20;

/// Stones on the board before the candidate radius widens to distance 2.
const WIDE_RADIUS_THRESHOLD: u32 = 6;

/// A candidate move with the summed directional weights for both sides.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub pos: Pos,
    /// What the mover's stone here would be worth.
    pub own_score: i32,
    /// What the opponent's stone here would be worth.
    pub opp_score: i32,
}

impl Candidate {
    #[inline]
    fn urgency(&self) -> i32 {
        self.own_score.max(self.opp_score)
    }
}

#[derive(Default)]
struct Tiers {
    opp_five: Vec<Candidate>,
    own_open_four: Vec<Candidate>,
    opp_open_four: Vec<Candidate>,
    own_combo: Vec<Candidate>,
    opp_combo: Vec<Candidate>,
    own_double_three: Vec<Candidate>,
    opp_double_three: Vec<Candidate>,
    own_half_four: Vec<Candidate>,
    opp_half_four: Vec<Candidate>,
    own_three: Vec<Candidate>,
    opp_three: Vec<Candidate>,
    own_two: Vec<Candidate>,
    opp_two: Vec<Candidate>,
    neighbor: Vec<Candidate>,
}

impl Board {
    /// Generate candidate moves for `mover`, most urgent tier only.
    ///
    /// `identity` is the color the search plays; in `checkmate_only` mode the
    /// set is restricted to forcing shapes (mover-side threats when the mover
    /// is the search identity, both sides' threats otherwise) and may be
    /// empty. Outside checkmate mode the result is only empty when no empty
    /// cell has a neighboring stone.
    pub fn candidates(
        &self,
        mover: Stone,
        identity: Stone,
        checkmate_only: bool,
    ) -> Vec<Candidate> {
        let opponent = mover.opponent();
        let wide = self.stone_count() >= WIDE_RADIUS_THRESHOLD;
        let mut tiers = Tiers::default();

        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let pos = Pos::new(row, col);
                if !self.is_empty(pos) || !self.has_neighbor(pos, wide) {
                    continue;
                }
                let cand = Candidate {
                    pos,
                    own_score: self.point_score(pos, mover),
                    opp_score: self.point_score(pos, opponent),
                };

                let mut own_five = false;
                let mut opp_five = false;
                let mut own_open_four = false;
                let mut opp_open_four = false;
                let mut own_half_four = 0;
                let mut opp_half_four = 0;
                let mut own_open_three = 0;
                let mut opp_open_three = 0;
                let mut own_open_two = 0;
                let mut opp_open_two = 0;
                for dir in Direction::ALL {
                    match self.pattern_at(pos, mover, dir) {
                        Pattern::Five => own_five = true,
                        Pattern::OpenFour => own_open_four = true,
                        Pattern::HalfFour => own_half_four += 1,
                        Pattern::OpenThree => own_open_three += 1,
                        Pattern::OpenTwo => own_open_two += 1,
                        _ => {}
                    }
                    match self.pattern_at(pos, opponent, dir) {
                        Pattern::Five => opp_five = true,
                        Pattern::OpenFour => opp_open_four = true,
                        Pattern::HalfFour => opp_half_four += 1,
                        Pattern::OpenThree => opp_open_three += 1,
                        Pattern::OpenTwo => opp_open_two += 1,
                        _ => {}
                    }
                }

                // An immediate five is the only move worth returning.
                if own_five {
                    return vec![cand];
                }
                if opp_five {
                    tiers.opp_five.push(cand);
                } else if own_open_four {
                    tiers.own_open_four.push(cand);
                } else if opp_open_four {
                    tiers.opp_open_four.push(cand);
                } else if own_open_three >= 2 {
                    tiers.own_double_three.push(cand);
                } else if opp_open_three >= 2 {
                    tiers.opp_double_three.push(cand);
                } else if own_open_three + own_half_four >= 2 {
                    tiers.own_combo.push(cand);
                } else if opp_open_three + opp_half_four >= 2 {
                    tiers.opp_combo.push(cand);
                } else if own_half_four > 0 {
                    tiers.own_half_four.push(cand);
                } else if opp_half_four > 0 {
                    tiers.opp_half_four.push(cand);
                } else if own_open_three > 0 {
                    tiers.own_three.push(cand);
                } else if opp_open_three > 0 {
                    tiers.opp_three.push(cand);
                } else if own_open_two > 0 {
                    tiers.own_two.push(cand);
                } else if opp_open_two > 0 {
                    tiers.opp_two.push(cand);
                } else {
                    tiers.neighbor.push(cand);
                }
            }
        }

        select_tier(tiers, mover, identity, checkmate_only)
    }
}

fn select_tier(tiers: Tiers, mover: Stone, identity: Stone, checkmate_only: bool) -> Vec<Candidate> {
    let Tiers {
        opp_five,
        own_open_four,
        opp_open_four,
        own_combo,
        opp_combo,
        own_double_three,
        opp_double_three,
        own_half_four,
        opp_half_four,
        own_three,
        opp_three,
        own_two,
        opp_two,
        neighbor,
    } = tiers;

    for forced in [
        opp_five,
        own_open_four,
        opp_open_four,
        own_combo,
        opp_combo,
        own_double_three,
        opp_double_three,
    ] {
        if !forced.is_empty() {
            return forced;
        }
    }

    if checkmate_only {
        let mut threats = own_three;
        threats.extend(own_half_four);
        if mover != identity {
            threats.extend(opp_half_four);
            threats.extend(opp_three);
        }
        return threats;
    }

    // A lone opponent open three with no four of our own to answer with has
    // to be dealt with first.
    if !opp_three.is_empty() && opp_half_four.is_empty() {
        let mut moves = opp_three;
        moves.extend(own_half_four);
        moves.extend(own_three);
        return moves;
    }

    let mut moves = own_three;
    moves.extend(opp_three);
    moves.extend(own_half_four);
    moves.extend(opp_half_four);
    if !moves.is_empty() {
        return moves;
    }

    let mut twos = own_two;
    twos.extend(opp_two);
    if !twos.is_empty() {
        return capped(twos);
    }
    capped(neighbor)
}

fn capped(mut moves: Vec<Candidate>) -> Vec<Candidate> {
    moves.sort_unstable_by_key(|c| Reverse(c.urgency()));
    moves.truncate(TIER_CAP);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardError;

    fn place_row(board: &mut Board, row: u8, cols: &[u8], stone: Stone) -> Result<(), BoardError> {
        for &col in cols {
            board.place_stone(Pos::new(row, col), stone)?;
        }
        Ok(())
    }

    #[test]
    fn test_mover_five_returns_single_candidate() -> Result<(), BoardError> {
        let mut board = Board::new();
        place_row(&mut board, 7, &[3, 4, 5, 6], Stone::Black)?;
        // Far-away noise that would otherwise land in lower tiers
        board.place_stone(Pos::new(0, 0), Stone::White)?;
        board.place_stone(Pos::new(0, 1), Stone::White)?;

        let moves = board.candidates(Stone::Black, Stone::Black, false);
        assert_eq!(moves.len(), 1);
        let pos = moves[0].pos;
        assert!(pos == Pos::new(7, 2) || pos == Pos::new(7, 7));
        Ok(())
    }

    #[test]
    fn test_open_four_tier_for_open_three() -> Result<(), BoardError> {
        let mut board = Board::new();
        place_row(&mut board, 7, &[3, 4, 5], Stone::Black)?;

        let moves = board.candidates(Stone::Black, Stone::Black, false);
        let cells: Vec<Pos> = moves.iter().map(|c| c.pos).collect();
        assert!(cells.contains(&Pos::new(7, 2)));
        assert!(cells.contains(&Pos::new(7, 6)));
        // Extending to an open four outranks every quieter shape
        assert!(moves
            .iter()
            .all(|c| c.own_score >= Pattern::OpenFour.weight()));
        Ok(())
    }

    #[test]
    fn test_double_three_intersection() -> Result<(), BoardError> {
        let mut board = Board::new();
        place_row(&mut board, 7, &[5, 6], Stone::Black)?;
        board.place_stone(Pos::new(5, 7), Stone::Black)?;
        board.place_stone(Pos::new(6, 7), Stone::Black)?;

        let moves = board.candidates(Stone::Black, Stone::Black, false);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].pos, Pos::new(7, 7));
        Ok(())
    }

    #[test]
    fn test_quiet_tiers_are_capped() -> Result<(), BoardError> {
        let mut board = Board::new();
        for (row, col) in [(2, 2), (2, 12), (7, 7), (12, 2), (12, 12)] {
            board.place_stone(Pos::new(row, col), Stone::Black)?;
        }
        let moves = board.candidates(Stone::Black, Stone::Black, false);
        assert!(moves.len() <= TIER_CAP);
        // Sorted most urgent first
        for pair in moves.windows(2) {
            assert!(pair[0].urgency() >= pair[1].urgency());
        }
        Ok(())
    }

    #[test]
    fn test_neighbor_fallback_nonempty() -> Result<(), BoardError> {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::White)?;
        let moves = board.candidates(Stone::Black, Stone::Black, false);
        assert!(!moves.is_empty());
        for cand in &moves {
            assert!(board.is_empty(cand.pos));
            assert!(board.has_neighbor(cand.pos, false));
        }
        Ok(())
    }

    #[test]
    fn test_checkmate_mode_empty_on_quiet_board() -> Result<(), BoardError> {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black)?;
        board.place_stone(Pos::new(8, 8), Stone::White)?;
        let moves = board.candidates(Stone::Black, Stone::Black, true);
        assert!(moves.is_empty());
        Ok(())
    }

    #[test]
    fn test_opponent_open_four_threat_tier() -> Result<(), BoardError> {
        let mut board = Board::new();
        place_row(&mut board, 7, &[4, 5, 6], Stone::White)?;
        board.place_stone(Pos::new(2, 2), Stone::Black)?;

        // Extending the white three to an open four dominates everything the
        // lone black stone offers.
        let moves = board.candidates(Stone::Black, Stone::Black, false);
        let cells: Vec<Pos> = moves.iter().map(|c| c.pos).collect();
        assert_eq!(cells.len(), 2);
        assert!(cells.contains(&Pos::new(7, 3)));
        assert!(cells.contains(&Pos::new(7, 7)));
        Ok(())
    }

    #[test]
    fn test_lone_opponent_open_three_is_answered() -> Result<(), BoardError> {
        let mut board = Board::new();
        place_row(&mut board, 7, &[5, 6], Stone::White)?;
        board.place_stone(Pos::new(2, 2), Stone::Black)?;

        // White's open two grows into an open three; black has no four to
        // answer with, so only the blocking/extending cells come back.
        let moves = board.candidates(Stone::Black, Stone::Black, false);
        assert!(!moves.is_empty());
        for cand in &moves {
            assert!(
                Direction::ALL
                    .iter()
                    .any(|&d| board.pattern_at(cand.pos, Stone::White, d) == Pattern::OpenThree),
                "unexpected quiet candidate at {:?}",
                cand.pos
            );
        }
        Ok(())
    }
}
