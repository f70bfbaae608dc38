//! MemTable Module
//!
//! In-memory data structure for recent writes.
//!
//! ## Responsibilities
//! - Fast upserts of the newest version of each key
//! - Ordered iteration for SSTable creation
//! - Track entry count for the flush trigger
//!
//! ## Data Structure Choice
//! BTreeMap keyed by `K`:
//! - Ordered keys (required for SSTable generation)
//! - At most one entry per key; a later write overwrites in place
//! - Exclusivity comes from the owning index's coarse lock, so the table
//!   itself needs no interior locking

mod table;

pub use table::MemTable;

/// Payload of an entry: a live value or a deletion marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<V> {
    /// A live value
    Put(V),

    /// A tombstone (deleted key)
    Tombstone,
}

/// A single versioned key/value record (or tombstone)
///
/// `seqno` comes from the owning index's monotonic counter, so no two
/// entries in one index instance ever share a sequence number. Among any
/// set of entries for the same key, the greatest `seqno` is authoritative;
/// that is the only tie-break rule anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: Value<V>,
    pub seqno: u64,
}

impl<K, V> Entry<K, V> {
    /// Create a live entry
    pub fn put(key: K, value: V, seqno: u64) -> Self {
        Self {
            key,
            value: Value::Put(value),
            seqno,
        }
    }

    /// Create a tombstone entry
    pub fn tombstone(key: K, seqno: u64) -> Self {
        Self {
            key,
            value: Value::Tombstone,
            seqno,
        }
    }

    /// Whether this entry marks a deletion
    pub fn is_tombstone(&self) -> bool {
        matches!(self.value, Value::Tombstone)
    }

    /// The live value, if any
    pub fn value(&self) -> Option<&V> {
        match &self.value {
            Value::Put(v) => Some(v),
            Value::Tombstone => None,
        }
    }
}
