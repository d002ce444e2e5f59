//! Zobrist hashing for board positions.
//!
//! One random 64-bit code per (cell, color) pair. The position hash is the
//! XOR of the codes of all occupied cells, so placing and removing the same
//! stone cancel exactly and the hash is independent of move order. An empty
//! board hashes to 0.

use rand::Rng;

use super::{Pos, Stone, TOTAL_CELLS};

/// Per-board table of zobrist codes, randomized at construction.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    codes: [[u64; TOTAL_CELLS]; 2],
}

impl ZobristTable {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut codes = [[0u64; TOTAL_CELLS]; 2];
        for color in &mut codes {
            for code in color.iter_mut() {
                *code = rng.gen();
            }
        }
        Self { codes }
    }

    /// Code for a colored stone at `pos`. `stone` must not be `Empty`.
    #[inline]
    pub fn code(&self, pos: Pos, stone: Stone) -> u64 {
        self.codes[stone.idx()][pos.to_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_codes_differ_per_color() {
        let table = ZobristTable::new(&mut thread_rng());
        let pos = Pos::new(7, 7);
        assert_ne!(table.code(pos, Stone::Black), table.code(pos, Stone::White));
    }

    #[test]
    fn test_xor_cancels() {
        let table = ZobristTable::new(&mut thread_rng());
        let a = table.code(Pos::new(3, 4), Stone::Black);
        let b = table.code(Pos::new(10, 2), Stone::White);
        let hash = 0u64 ^ a ^ b;
        assert_eq!(hash ^ b ^ a, 0);
        assert_eq!(0u64 ^ b ^ a, hash);
    }
}
