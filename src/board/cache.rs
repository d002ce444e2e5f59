//! Transposition cache: position hash to evaluated score.
//!
//! Unbounded for the lifetime of one game. A stored result is reusable only
//! when it was computed at least as deep as the current request; a fresh
//! insert for the same hash overwrites the older entry.

use rustc_hash::FxHashMap;

/// A cached search result for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub score: i32,
    pub depth: i32,
}

/// Hash-keyed score store backing the search.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: FxHashMap<u64, CacheEntry>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, replacing any previous entry for this hash.
    #[inline]
    pub fn store(&mut self, hash: u64, score: i32, depth: i32) {
        self.entries.insert(hash, CacheEntry { score, depth });
    }

    /// Look up a result usable at `depth` or deeper.
    #[inline]
    pub fn probe(&self, hash: u64, depth: i32) -> Option<CacheEntry> {
        self.entries
            .get(&hash)
            .copied()
            .filter(|entry| entry.depth >= depth)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_probe() {
        let mut cache = ScoreCache::new();
        cache.store(42, 1234, 6);
        assert_eq!(
            cache.probe(42, 6),
            Some(CacheEntry {
                score: 1234,
                depth: 6
            })
        );
        assert_eq!(cache.probe(42, 4), cache.probe(42, 6));
        assert_eq!(cache.probe(7, 0), None);
    }

    #[test]
    fn test_shallow_entry_rejected_for_deeper_request() {
        let mut cache = ScoreCache::new();
        cache.store(42, 1234, 2);
        assert_eq!(cache.probe(42, 4), None);
    }

    #[test]
    fn test_newest_write_wins() {
        let mut cache = ScoreCache::new();
        cache.store(42, 100, 2);
        cache.store(42, 200, 6);
        assert_eq!(
            cache.probe(42, 2),
            Some(CacheEntry {
                score: 200,
                depth: 6
            })
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = ScoreCache::new();
        cache.store(1, 1, 1);
        cache.store(2, 2, 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
