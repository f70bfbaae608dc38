//! Index Module
//!
//! The public facade that coordinates all components.
//!
//! ## Responsibilities
//! - Route writes to the MemTable and stamp them with sequence numbers
//! - Trigger flushes and compactions inline when thresholds are crossed
//! - Answer point and scan queries across the MemTable and the table set
//!
//! ## Concurrency Model: One Coarse Lock
//!
//! A single `parking_lot::Mutex` guards all interior state, and **every**
//! public operation holds it for its entire duration. There is no
//! reader/writer distinction, no background thread, and no task queue:
//! concurrent callers are fully serialized, so a `get` can never observe a
//! half-completed `put`, and a flush or compaction triggered by one
//! caller's write blocks everyone else until it finishes. A caller that
//! needs bounded latency must budget for the occasional flush (O(n log n)
//! sort) or compaction (O(total entries in the batch)) landing inside a
//! `put`/`delete`.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::memtable::MemTable;
use crate::storage::{Compactor, TableSet};

/// The in-memory LSM index
///
/// A write-optimized key/value index: writes land in a mutable key-ordered
/// MemTable; when the MemTable reaches its threshold it is flushed into an
/// immutable level-0 SSTable; when enough level-0 tables accumulate they
/// are compacted into one table at the next level, dropping superseded
/// versions and tombstones.
///
/// Keys need a total order (`Ord`) plus `Hash` for the scan accumulator;
/// values only need to be clonable out of the index.
pub struct LsmIndex<K, V> {
    /// Index configuration (immutable after construction)
    config: Config,

    /// Compaction policy derived from the configuration
    compactor: Compactor,

    /// All mutable state, behind the one coarse lock
    inner: Mutex<Inner<K, V>>,
}

/// Everything the lock guards
struct Inner<K, V> {
    /// Mutable buffer for the most recent writes
    memtable: MemTable<K, V>,

    /// Live immutable tables across all levels
    tables: TableSet<K, V>,

    /// Monotonic sequence counter shared by every put/delete on this
    /// instance; uniqueness makes seqno a total order over recency
    seqno: u64,
}

impl<K, V> LsmIndex<K, V>
where
    K: Ord + Hash + Clone,
    V: Clone,
{
    /// Create an index with the given config
    ///
    /// Fails fast on an invalid configuration: a zero MemTable threshold
    /// would degrade every write into a flush, so it is rejected here
    /// rather than silently tolerated.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let compactor = Compactor::new(config.level0_compaction_trigger);

        Ok(Self {
            config,
            compactor,
            inner: Mutex::new(Inner {
                memtable: MemTable::new(),
                tables: TableSet::new(),
                seqno: 0,
            }),
        })
    }

    /// Create an index with the default config and the given MemTable
    /// threshold (convenience method)
    pub fn with_threshold(threshold: usize) -> Result<Self> {
        Self::new(Config::builder().memtable_threshold(threshold).build())
    }

    /// Insert or overwrite a key
    ///
    /// Runs the flush/compaction trigger chain before returning, so this
    /// call occasionally pays for a flush and a compaction.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();

        inner.seqno += 1;
        let seqno = inner.seqno;
        inner.memtable.put(key, value, seqno);

        self.maybe_flush(&mut inner);
    }

    /// Delete a key
    ///
    /// Records a tombstone; deleting a key that never existed still
    /// succeeds and still writes a tombstone.
    pub fn delete(&self, key: K) {
        let mut inner = self.inner.lock();

        inner.seqno += 1;
        let seqno = inner.seqno;
        inner.memtable.delete(key, seqno);

        self.maybe_flush(&mut inner);
    }

    /// Get the value for a key
    ///
    /// Search order:
    /// 1. MemTable (most recent writes); a tombstone here short-circuits
    ///    to `None` without consulting any table
    /// 2. Live SSTables ordered by level descending, newest first within
    ///    a level; first hit wins
    pub fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.lock();

        if let Some(entry) = inner.memtable.get(key) {
            return entry.value().cloned();
        }

        inner
            .tables
            .find(key)
            .and_then(|entry| entry.value().cloned())
    }

    /// Whether a live (non-tombstone) entry exists for a key
    pub fn contains(&self, key: &K) -> bool {
        let inner = self.inner.lock();

        if let Some(entry) = inner.memtable.get(key) {
            return !entry.is_tombstone();
        }

        inner
            .tables
            .find(key)
            .is_some_and(|entry| !entry.is_tombstone())
    }

    /// All live key/value pairs, in unspecified order
    ///
    /// Folds every table in ascending level order, then the MemTable last:
    /// a later layer's entry overwrites an earlier one for the same key,
    /// and a tombstone removes the key. The accumulator is a hash map, so
    /// callers needing sorted output must sort explicitly.
    pub fn get_all(&self) -> Vec<(K, V)> {
        let inner = self.inner.lock();
        Self::fold_live(&inner).into_iter().collect()
    }

    /// Live key/value pairs with `start <= key <= end`, in unspecified order
    ///
    /// Built by filtering the full fold, so the cost is O(total live
    /// entries across the MemTable and every table), not O(matching
    /// entries); there is no per-table range seek.
    pub fn range(&self, start: &K, end: &K) -> Vec<(K, V)> {
        let inner = self.inner.lock();
        Self::fold_live(&inner)
            .into_iter()
            .filter(|(k, _)| k >= start && k <= end)
            .collect()
    }

    /// Reset to the just-constructed state
    ///
    /// Empties the MemTable, discards every SSTable, and resets the
    /// sequence counter to zero. The configuration is unchanged.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.memtable.clear();
        inner.tables.clear();
        inner.seqno = 0;
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of entries currently buffered in the MemTable
    pub fn memtable_len(&self) -> usize {
        self.inner.lock().memtable.len()
    }

    /// Number of live SSTables across all levels
    pub fn sstable_count(&self) -> usize {
        self.inner.lock().tables.len()
    }

    /// Number of live SSTables at a given level
    pub fn sstable_count_at(&self, level: u32) -> usize {
        self.inner.lock().tables.level_count(level)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Flush/compaction trigger chain, run after every upsert
    ///
    /// The threshold check happens after the write, so the MemTable holds
    /// exactly `memtable_threshold` entries for the moment before the
    /// flush drains it.
    fn maybe_flush(&self, inner: &mut Inner<K, V>) {
        if inner.memtable.len() < self.config.memtable_threshold {
            return;
        }

        let batch = inner.memtable.drain();
        inner.tables.flush(batch);

        if self.compactor.should_compact(&inner.tables) {
            self.compactor.compact(&mut inner.tables);
        }
    }

    /// Fold tables in ascending level order, then the MemTable, into the
    /// surviving live value per key
    fn fold_live(inner: &Inner<K, V>) -> HashMap<K, V> {
        let mut acc = HashMap::new();

        for table in inner.tables.iter_level_ascending() {
            for entry in table.entries() {
                match entry.value() {
                    Some(v) => {
                        acc.insert(entry.key.clone(), v.clone());
                    }
                    None => {
                        acc.remove(&entry.key);
                    }
                }
            }
        }

        for entry in inner.memtable.iter() {
            match entry.value() {
                Some(v) => {
                    acc.insert(entry.key.clone(), v.clone());
                }
                None => {
                    acc.remove(&entry.key);
                }
            }
        }

        acc
    }
}
