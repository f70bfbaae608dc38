//! MemTable implementation
//!
//! BTreeMap-based mutable buffer holding the most recent write per key.

use std::collections::BTreeMap;

use super::Entry;

/// In-memory table for recent writes
#[derive(Debug)]
pub struct MemTable<K, V> {
    /// Newest entry per key, ordered by key
    data: BTreeMap<K, Entry<K, V>>,
}

impl<K, V> MemTable<K, V>
where
    K: Ord + Clone,
{
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Upsert a live value for a key
    ///
    /// A later put/delete of the same key overwrites in place, so the
    /// entry count never grows past one per key.
    pub fn put(&mut self, key: K, value: V, seqno: u64) {
        let entry = Entry::put(key.clone(), value, seqno);
        self.data.insert(key, entry);
    }

    /// Upsert a tombstone for a key
    ///
    /// Deleting an absent key still records a tombstone: without consulting
    /// the SSTables there is no way to tell "never existed" from "existed,
    /// now deleted", and the tombstone must survive into a flush either way.
    pub fn delete(&mut self, key: K, seqno: u64) {
        let entry = Entry::tombstone(key.clone(), seqno);
        self.data.insert(key, entry);
    }

    /// Get the newest entry for a key (may be a tombstone)
    pub fn get(&self, key: &K) -> Option<&Entry<K, V>> {
        self.data.get(key)
    }

    /// Number of entries (tombstones count)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.data.values()
    }

    /// Take every entry out of the table, leaving it empty
    ///
    /// This is the flush path: the drained batch becomes a level-0 SSTable.
    pub fn drain(&mut self) -> Vec<Entry<K, V>> {
        let data = std::mem::take(&mut self.data);
        data.into_values().collect()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K, V> Default for MemTable<K, V>
where
    K: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
