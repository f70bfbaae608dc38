//! SSTable implementation
//!
//! Sorted String Table - an immutable, key-sorted, leveled snapshot of
//! entries. Built exactly once, at flush time or at compaction time, and
//! never mutated afterwards; a table leaves the live set only when a later
//! compaction consumes it.

use crate::memtable::Entry;

/// An immutable sorted run of entries
#[derive(Debug)]
pub struct SSTable<K, V> {
    /// Unique id within the owning index instance
    id: u64,

    /// Generation number: 0 for freshly flushed tables, incremented by
    /// each compaction pass
    level: u32,

    /// Entries sorted ascending by key, at most one per key.
    /// Tombstones are kept: a flush must carry deletions forward.
    entries: Vec<Entry<K, V>>,
}

impl<K, V> SSTable<K, V>
where
    K: Ord,
{
    /// Build a table from a batch of entries
    ///
    /// The batch is sorted by key; the caller guarantees at most one entry
    /// per key (MemTable drains and compaction merges both do). O(n log n).
    pub fn build(id: u64, level: u32, mut entries: Vec<Entry<K, V>>) -> Self {
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Self { id, level, entries }
    }

    /// Look up a key by binary search. O(log n).
    ///
    /// The returned entry may be a tombstone; the caller decides what a
    /// deletion means at its layer.
    pub fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.entries
            .binary_search_by(|e| e.key.cmp(key))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Unique table id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Generation number
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of entries (tombstones count)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ascending key order
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Consume the table, yielding its entries (the compaction path)
    pub fn into_entries(self) -> Vec<Entry<K, V>> {
        self.entries
    }

    /// Smallest key in the table, if any
    pub fn min_key(&self) -> Option<&K> {
        self.entries.first().map(|e| &e.key)
    }

    /// Largest key in the table, if any
    pub fn max_key(&self) -> Option<&K> {
        self.entries.last().map(|e| &e.key)
    }
}
