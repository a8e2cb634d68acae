//! Reference in-memory occurrence-count store (§4.I, `store` feature).
//!
//! Purely a caller-side bookkeeping surface for tallying how often a given
//! (source, target) pairing was actually chosen; the compiler and decoder
//! never consult it. The [`OccurrenceStore`] trait lets a caller swap in a
//! persistent backend without touching the rest of the crate.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// A key-value surface over (source, target) occurrence counts.
pub trait OccurrenceStore {
    /// Add `count` (default 1 via [`OccurrenceStore::record`]) to the tally
    /// for `(source, target)`.
    fn add(&self, source: &str, target: &str, count: u64);

    /// Every target observed for `source`, with its count.
    fn get(&self, source: &str) -> FxHashMap<String, u64>;

    /// The count for one exact (source, target) pair, or 0 if never seen.
    fn get_pair(&self, source: &str, target: &str) -> u64;

    /// All recorded triples, in no particular order.
    fn entries(&self) -> Vec<(String, String, u64)>;

    /// `add(source, target, 1)`.
    fn record(&self, source: &str, target: &str) {
        self.add(source, target, 1);
    }

    /// Apply every `(source, target, count)` triple in `updates`.
    fn update<I>(&self, updates: I)
    where
        I: IntoIterator<Item = (String, String, u64)>,
    {
        for (source, target, count) in updates {
            self.add(&source, &target, count);
        }
    }
}

/// In-memory, mutex-guarded [`OccurrenceStore`]. Safe to share across
/// threads; callers with no concurrent writers may ignore the locking
/// entirely since it's uncontended in that case.
#[derive(Default)]
pub struct MemoryOccurrenceStore {
    counts: Mutex<FxHashMap<String, FxHashMap<String, u64>>>,
}

impl MemoryOccurrenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new store with source and target swapped in every recorded triple.
    pub fn inverted(&self) -> Self {
        let inverted = Self::new();
        for (source, target, count) in self.entries() {
            inverted.add(&target, &source, count);
        }
        inverted
    }
}

impl OccurrenceStore for MemoryOccurrenceStore {
    fn add(&self, source: &str, target: &str, count: u64) {
        let mut counts = self.counts.lock();
        *counts
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_insert(0) += count;
    }

    fn get(&self, source: &str) -> FxHashMap<String, u64> {
        self.counts.lock().get(source).cloned().unwrap_or_default()
    }

    fn get_pair(&self, source: &str, target: &str) -> u64 {
        self.counts
            .lock()
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    fn entries(&self) -> Vec<(String, String, u64)> {
        self.counts
            .lock()
            .iter()
            .flat_map(|(source, targets)| {
                targets
                    .iter()
                    .map(|(target, count)| (source.clone(), target.clone(), *count))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_counts_per_pair() {
        let store = MemoryOccurrenceStore::new();
        store.record("sh", "ש");
        store.record("sh", "ש");
        store.record("sh", "שׁ");
        assert_eq!(store.get_pair("sh", "ש"), 2);
        assert_eq!(store.get_pair("sh", "שׁ"), 1);
        assert_eq!(store.get_pair("sh", "x"), 0);
    }

    #[test]
    fn get_returns_every_target_for_a_source() {
        let store = MemoryOccurrenceStore::new();
        store.record("a", "X");
        store.record("a", "Y");
        let targets = store.get("a");
        assert_eq!(targets.len(), 2);
        assert_eq!(targets["X"], 1);
        assert_eq!(targets["Y"], 1);
    }

    #[test]
    fn update_applies_bulk_triples() {
        let store = MemoryOccurrenceStore::new();
        store.update(vec![
            ("a".to_string(), "X".to_string(), 3),
            ("a".to_string(), "X".to_string(), 2),
        ]);
        assert_eq!(store.get_pair("a", "X"), 5);
    }

    #[test]
    fn inverted_swaps_source_and_target() {
        let store = MemoryOccurrenceStore::new();
        store.add("a", "X", 4);
        let inverted = store.inverted();
        assert_eq!(inverted.get_pair("X", "a"), 4);
        assert_eq!(inverted.get_pair("a", "X"), 0);
    }
}
