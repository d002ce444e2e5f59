//! Line-pattern classes and the classification decision table.
//!
//! A scanned line is summarized by three numbers: contiguous run length
//! (counting the anchor cell as occupied), number of blocked ends, and the
//! offset of a single internal gap, and mapped to one of a fixed set of
//! pattern classes, each carrying a heuristic weight. The weights drive both
//! the static evaluation (summed into the per-player totals) and the tiered
//! candidate generator.

/// Discrete classification of a directional line anchored at one cell.
///
/// Ordered strongest to weakest. `HalfFour` weighs 1001 against
/// `OpenThree`'s 1000: the two classes are nearly interchangeable as forcing
/// threats, with a one-point edge so ties break toward the four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pattern {
    /// Five or more in a row: terminal.
    Five,
    /// Four with both extensions free: wins next move regardless of reply.
    OpenFour,
    /// Four with a single completion point (blocked end or internal gap).
    HalfFour,
    /// Three with both ends free.
    OpenThree,
    /// Three with one end blocked.
    HalfThree,
    /// Two with both ends free.
    OpenTwo,
    /// Two split by a gap, both ends free.
    SplitTwo,
    /// Two with one end blocked.
    HalfTwo,
    /// Lone stone with both ends free.
    OpenOne,
    /// Lone stone with one end blocked.
    HalfOne,
    /// No usable shape.
    #[default]
    Dead,
}

impl Pattern {
    /// Heuristic weight of this class.
    #[inline]
    pub const fn weight(self) -> i32 {
        match self {
            Pattern::Five => 1_000_000,
            Pattern::OpenFour => 10_000,
            Pattern::HalfFour => 1_001,
            Pattern::OpenThree => 1_000,
            Pattern::HalfThree => 101,
            Pattern::OpenTwo => 100,
            Pattern::SplitTwo => 50,
            Pattern::HalfTwo => 10,
            Pattern::OpenOne => 9,
            Pattern::HalfOne => 1,
            Pattern::Dead => 0,
        }
    }
}

/// Winning score threshold: a five on the board.
pub const WIN_SCORE: i32 = Pattern::Five.weight();

/// Classify a scanned line.
///
/// * `run`: stones of the scanned color found, anchor included (so ≥ 1),
///   counting across the single permitted gap.
/// * `blocks`: blocked ends (opponent stone or board edge), 0..=2.
/// * `gap`: offset of the internal gap measured from the far end of the
///   forward scan, `None` when the run is solid. Offsets 0 and `run` both
///   describe a gap at the very end of the run and are treated as solid.
///
/// Pure and total: unmatched combinations fall through to [`Pattern::Dead`].
pub fn classify(run: i32, blocks: i32, gap: Option<i32>) -> Pattern {
    let gap = gap.unwrap_or(-1);

    if gap <= 0 {
        if run >= 5 {
            return Pattern::Five;
        }
        match (blocks, run) {
            (0, 1) => return Pattern::OpenOne,
            (0, 2) => return Pattern::OpenTwo,
            (0, 3) => return Pattern::OpenThree,
            (0, 4) => return Pattern::OpenFour,
            (1, 1) => return Pattern::HalfOne,
            (1, 2) => return Pattern::HalfTwo,
            (1, 3) => return Pattern::HalfThree,
            (1, 4) => return Pattern::HalfFour,
            _ => {}
        }
    } else if gap == 1 || gap == run - 1 {
        // Gap one step in from the run's end
        if run >= 6 {
            return Pattern::Five;
        }
        match (blocks, run) {
            (0, 2) => return Pattern::SplitTwo,
            (0, 3) => return Pattern::OpenThree,
            (0, 4) => return Pattern::HalfFour,
            (0, 5) => return Pattern::OpenFour,
            (1, 2) => return Pattern::HalfTwo,
            (1, 3) => return Pattern::HalfThree,
            (1, 4) | (1, 5) => return Pattern::HalfFour,
            _ => {}
        }
    } else if gap == 2 || gap == run - 2 {
        if run >= 7 {
            return Pattern::Five;
        }
        match (blocks, run) {
            (0, 3) => return Pattern::OpenThree,
            (0, 4) | (0, 5) => return Pattern::HalfFour,
            (0, 6) => return Pattern::OpenFour,
            (1, 3) => return Pattern::HalfThree,
            (1, 4) | (1, 5) => return Pattern::HalfFour,
            (1, 6) => return Pattern::OpenFour,
            (2, 4) | (2, 5) | (2, 6) => return Pattern::HalfFour,
            _ => {}
        }
    } else if gap == 3 || gap == run - 3 {
        if run >= 8 {
            return Pattern::Five;
        }
        match (blocks, run) {
            (0, 4) | (0, 5) => return Pattern::OpenThree,
            (0, 6) => return Pattern::HalfFour,
            (0, 7) => return Pattern::OpenFour,
            (1, 4) | (1, 5) | (1, 6) => return Pattern::HalfFour,
            (1, 7) => return Pattern::OpenFour,
            (2, 4) | (2, 5) | (2, 6) | (2, 7) => return Pattern::HalfFour,
            _ => {}
        }
    } else if gap == 4 || gap == run - 4 {
        if run > 9 {
            return Pattern::Five;
        }
        match (blocks, run) {
            (0, 5) | (0, 6) | (0, 7) | (0, 8) => return Pattern::OpenFour,
            (1, 4) | (1, 5) | (1, 6) | (1, 7) => return Pattern::HalfFour,
            (1, 8) => return Pattern::OpenFour,
            (2, 5) | (2, 6) | (2, 7) | (2, 8) => return Pattern::HalfFour,
            _ => {}
        }
    } else if gap == 5 || gap == run - 5 {
        return Pattern::Five;
    }

    Pattern::Dead
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_hierarchy() {
        assert!(Pattern::Five.weight() > Pattern::OpenFour.weight());
        assert!(Pattern::OpenFour.weight() > Pattern::HalfFour.weight());
        assert!(Pattern::OpenThree.weight() > Pattern::HalfThree.weight());
        assert!(Pattern::HalfThree.weight() > Pattern::OpenTwo.weight());
        assert!(Pattern::OpenTwo.weight() > Pattern::SplitTwo.weight());
        assert!(Pattern::SplitTwo.weight() > Pattern::HalfTwo.weight());
        assert!(Pattern::HalfTwo.weight() > Pattern::OpenOne.weight());
        assert!(Pattern::OpenOne.weight() > Pattern::HalfOne.weight());
        assert_eq!(Pattern::Dead.weight(), 0);
    }

    #[test]
    fn test_four_three_weight_adjacency() {
        // The half-open four outranks the open three by exactly one point so
        // ties break toward the four.
        assert_eq!(Pattern::HalfFour.weight(), Pattern::OpenThree.weight() + 1);
    }

    #[test]
    fn test_solid_runs() {
        assert_eq!(classify(5, 0, None), Pattern::Five);
        assert_eq!(classify(5, 1, None), Pattern::Five);
        assert_eq!(classify(5, 2, None), Pattern::Five);
        assert_eq!(classify(6, 2, None), Pattern::Five);
        assert_eq!(classify(4, 0, None), Pattern::OpenFour);
        assert_eq!(classify(4, 1, None), Pattern::HalfFour);
        assert_eq!(classify(3, 0, None), Pattern::OpenThree);
        assert_eq!(classify(3, 1, None), Pattern::HalfThree);
        assert_eq!(classify(2, 0, None), Pattern::OpenTwo);
        assert_eq!(classify(2, 1, None), Pattern::HalfTwo);
        assert_eq!(classify(1, 0, None), Pattern::OpenOne);
        assert_eq!(classify(1, 1, None), Pattern::HalfOne);
    }

    #[test]
    fn test_fully_blocked_short_runs_are_dead() {
        assert_eq!(classify(4, 2, None), Pattern::Dead);
        assert_eq!(classify(3, 2, None), Pattern::Dead);
        assert_eq!(classify(2, 2, None), Pattern::Dead);
        assert_eq!(classify(1, 2, None), Pattern::Dead);
    }

    #[test]
    fn test_gap_at_one() {
        assert_eq!(classify(2, 0, Some(1)), Pattern::SplitTwo);
        assert_eq!(classify(3, 0, Some(1)), Pattern::OpenThree);
        assert_eq!(classify(4, 0, Some(1)), Pattern::HalfFour);
        assert_eq!(classify(5, 0, Some(1)), Pattern::OpenFour);
        assert_eq!(classify(6, 0, Some(1)), Pattern::Five);
        assert_eq!(classify(3, 1, Some(1)), Pattern::HalfThree);
        assert_eq!(classify(5, 1, Some(1)), Pattern::HalfFour);
    }

    #[test]
    fn test_gap_offset_symmetry() {
        // An offset of run - k mirrors an offset of k
        assert_eq!(classify(4, 0, Some(3)), classify(4, 0, Some(1)));
        assert_eq!(classify(5, 0, Some(3)), classify(5, 0, Some(2)));
        assert_eq!(classify(6, 1, Some(4)), classify(6, 1, Some(2)));
    }

    #[test]
    fn test_gap_at_two_and_three() {
        assert_eq!(classify(4, 0, Some(2)), Pattern::HalfFour);
        assert_eq!(classify(6, 0, Some(2)), Pattern::OpenFour);
        assert_eq!(classify(5, 0, Some(3)), Pattern::HalfFour);
        assert_eq!(classify(4, 2, Some(2)), Pattern::HalfFour);
        assert_eq!(classify(5, 0, Some(4)), Pattern::OpenFour);
    }

    #[test]
    fn test_gap_terminal_fives() {
        assert_eq!(classify(7, 0, Some(2)), Pattern::Five);
        assert_eq!(classify(8, 0, Some(3)), Pattern::Five);
        assert_eq!(classify(10, 0, Some(4)), Pattern::Five);
        assert_eq!(classify(9, 0, Some(5)), Pattern::Five);
    }

    #[test]
    fn test_gap_zero_is_solid() {
        // A gap recorded at the very end of the forward scan never formed:
        // treat exactly like a solid run.
        assert_eq!(classify(3, 0, Some(0)), classify(3, 0, None));
        assert_eq!(classify(4, 1, Some(0)), classify(4, 1, None));
    }

    #[test]
    fn test_classify_is_pure() {
        for _ in 0..3 {
            assert_eq!(classify(4, 0, None), Pattern::OpenFour);
            assert_eq!(classify(3, 0, Some(1)), Pattern::OpenThree);
        }
    }
}
