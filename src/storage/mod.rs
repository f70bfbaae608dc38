//! Storage Module
//!
//! Immutable, sorted, leveled snapshots of entries and the policy that
//! merges them.
//!
//! ## Responsibilities
//! - Hold flushed entries in key-sorted SSTables with O(log n) point lookup
//! - Track the live table set across levels
//! - Compact level-0 tables into the next level, dropping superseded
//!   versions and tombstones
//!
//! ## Layout
//! ```text
//! level 0: freshly flushed tables, up to the fan-in trigger
//! level 1+: single tables produced by successive compaction passes
//! ```

mod sstable;
mod compactor;

pub use sstable::SSTable;
pub use compactor::{Compactor, TableSet};
