//! Table set and compaction policy
//!
//! `TableSet` tracks the live SSTables and allocates table ids;
//! `Compactor` decides when level 0 is merged and performs the merge.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::memtable::Entry;

use super::SSTable;

/// The live collection of SSTables for one index instance
///
/// Tables are kept sorted by (level, id), so forward iteration is the
/// fold order for scans and reverse iteration is the lookup order. Only
/// a later compaction removes a table.
#[derive(Debug)]
pub struct TableSet<K, V> {
    /// Sorted ascending by (level, id); ids grow monotonically, so id
    /// order within a level is creation order
    tables: Vec<SSTable<K, V>>,

    /// Next id handed to a freshly built table
    next_table_id: u64,
}

impl<K, V> TableSet<K, V>
where
    K: Ord,
{
    /// Create an empty table set
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            next_table_id: 0,
        }
    }

    /// Build a level-0 table from a drained MemTable batch and add it to
    /// the live set
    pub fn flush(&mut self, entries: Vec<Entry<K, V>>) {
        let id = self.alloc_table_id();
        let table = SSTable::build(id, 0, entries);
        debug!(table_id = id, entries = table.len(), "flushed memtable to level-0 sstable");
        self.insert_table(table);
    }

    /// Look up a key across the live set
    ///
    /// Tables are scanned ordered by level descending, newest first within
    /// a level, and the first hit wins (it may be a tombstone). Within one
    /// level a newer table shadows an older one, so a tombstone flushed
    /// after a value hides it even before the two tables compact. Across
    /// levels the higher level still wins, so an older version already
    /// promoted by a compaction can shadow a fresher level-0 entry for the
    /// same key; that ambiguity is documented, not corrected.
    pub fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.tables.iter().rev().find_map(|table| table.find(key))
    }

    /// Iterate tables in ascending level order (ties by creation order)
    ///
    /// This is the fold order for scans: later tables overwrite earlier
    /// ones, giving higher levels precedence and newer tables precedence
    /// within a level, the same precedence `find` applies in reverse.
    pub fn iter_level_ascending(&self) -> impl Iterator<Item = &SSTable<K, V>> {
        self.tables.iter()
    }

    /// Number of live tables at a given level
    pub fn level_count(&self, level: u32) -> usize {
        self.tables.iter().filter(|t| t.level() == level).count()
    }

    /// Number of live tables across all levels
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the set holds no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drop every table and reset the id allocator
    pub fn clear(&mut self) {
        self.tables.clear();
        self.next_table_id = 0;
    }

    /// Insert a table at its sorted (level, id) position
    fn insert_table(&mut self, table: SSTable<K, V>) {
        let pos = self
            .tables
            .partition_point(|t| (t.level(), t.id()) < (table.level(), table.id()));
        self.tables.insert(pos, table);
    }

    /// Remove and return every level-0 table, preserving creation order
    fn take_level0(&mut self) -> Vec<SSTable<K, V>> {
        let mut taken = Vec::new();
        let mut kept = Vec::new();
        for table in self.tables.drain(..) {
            if table.level() == 0 {
                taken.push(table);
            } else {
                kept.push(table);
            }
        }
        self.tables = kept;
        taken
    }

    fn alloc_table_id(&mut self) -> u64 {
        let id = self.next_table_id;
        self.next_table_id += 1;
        id
    }
}

impl<K, V> Default for TableSet<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Level-0 compaction policy
///
/// When the number of live level-0 tables reaches the fan-in trigger,
/// every current level-0 table is merged into a single table at level 1.
#[derive(Debug, Clone, Copy)]
pub struct Compactor {
    /// Level-0 table count that fires a compaction
    trigger: usize,
}

impl Compactor {
    /// Create a compactor with the given level-0 fan-in trigger
    pub fn new(trigger: usize) -> Self {
        Self { trigger }
    }

    /// Whether the table set has accumulated enough level-0 tables
    pub fn should_compact<K: Ord, V>(&self, tables: &TableSet<K, V>) -> bool {
        tables.level_count(0) >= self.trigger
    }

    /// Merge all current level-0 tables into one table at level 1
    ///
    /// The batch is scanned oldest generation first, keeping per key the
    /// entry with the strictly greatest seqno; keys whose surviving entry
    /// is a tombstone are then discarded. If nothing survives, no output
    /// table is produced. The consumed inputs leave the live set either way.
    ///
    /// The merge consults only the level-0 batch. A tombstone dropped here
    /// can resurrect an older version of the same key that was already
    /// promoted to a higher level: that table is outside the batch and
    /// keeps its stale entry. This matches the documented policy; correct
    /// multi-level compaction would have to pull the overlapping higher
    /// levels into the batch.
    pub fn compact<K, V>(&self, tables: &mut TableSet<K, V>)
    where
        K: Ord + Hash + Clone,
    {
        // take_level0 preserves the set's (level, id) order, so the batch
        // arrives oldest first; the outcome is decided by the seqno
        // comparison below, not the scan order.
        let inputs = tables.take_level0();

        let input_count = inputs.len();
        let source_level = inputs.iter().map(|t| t.level()).max().unwrap_or(0);

        let mut latest: HashMap<K, Entry<K, V>> = HashMap::new();
        for table in inputs {
            for entry in table.into_entries() {
                match latest.get(&entry.key) {
                    Some(existing) if existing.seqno > entry.seqno => {}
                    _ => {
                        latest.insert(entry.key.clone(), entry);
                    }
                }
            }
        }

        let survivors: Vec<Entry<K, V>> = latest
            .into_values()
            .filter(|entry| !entry.is_tombstone())
            .collect();

        if survivors.is_empty() {
            debug!(inputs = input_count, "compaction dropped every entry, no output table");
            return;
        }

        let id = tables.alloc_table_id();
        let output = SSTable::build(id, source_level + 1, survivors);
        debug!(
            inputs = input_count,
            table_id = id,
            level = output.level(),
            entries = output.len(),
            "compacted level-0 sstables"
        );
        tables.insert_table(output);
    }
}
