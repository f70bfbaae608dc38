//! # StrataLSM
//!
//! An in-memory log-structured merge (LSM) index with:
//! - A mutable, key-ordered MemTable buffering the newest writes
//! - Immutable, sorted, leveled SSTables produced by flushing the MemTable
//! - Inline level-0 compaction that merges tables and reclaims tombstones
//! - A single coarse lock fully serializing every operation
//!
//! Everything lives in process memory: there is no write-ahead log, no
//! on-disk table format, and no recovery. A surrounding system that wants
//! durability sits in front of `put`/`delete` and replays into this
//! structure on startup.
//!
//! ## Architecture Overview
//!
//! ```text
//! put / delete                      get / contains / get_all / range
//!      │                                          │
//! ┌────▼──────────────────────────────────────────▼────┐
//! │                 LsmIndex (one Mutex)               │
//! └────┬──────────────────────────────────────────┬────┘
//!      │                                          │
//! ┌────▼────────┐   flush (threshold)    ┌────────▼────────┐
//! │  MemTable   ├───────────────────────►│    TableSet     │
//! │ (BTreeMap)  │                        │  level 0, 1, …  │
//! └─────────────┘                        └────────┬────────┘
//!                                                 │ compact (fan-in)
//!                                        ┌────────▼────────┐
//!                                        │    Compactor    │
//!                                        └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod memtable;
pub mod storage;
pub mod index;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StrataError};
pub use config::{Config, ConfigBuilder};
pub use memtable::{Entry, Value};
pub use index::LsmIndex;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of StrataLSM
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
