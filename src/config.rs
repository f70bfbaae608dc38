//! Configuration for StrataLSM
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, StrataError};

/// Main configuration for an [`LsmIndex`](crate::LsmIndex) instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // MemTable Configuration
    // -------------------------------------------------------------------------
    /// Max number of MemTable entries before a flush fires.
    ///
    /// Checked after each upsert, so the MemTable may transiently hold
    /// exactly this many entries inside the `put`/`delete` call that
    /// triggers the flush. Must be positive: a zero threshold would
    /// silently degrade every write into a flush, so construction rejects
    /// it instead.
    pub memtable_threshold: usize,

    // -------------------------------------------------------------------------
    // Compaction Configuration
    // -------------------------------------------------------------------------
    /// Number of live level-0 SSTables that triggers a compaction of all
    /// of them into one table at level 1. Must be at least 2.
    pub level0_compaction_trigger: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memtable_threshold: 1024,
            level0_compaction_trigger: 4,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validate the configuration, rejecting values that would degrade
    /// the index rather than misbehave loudly
    pub fn validate(&self) -> Result<()> {
        if self.memtable_threshold == 0 {
            return Err(StrataError::Config(
                "memtable_threshold must be positive (0 would flush on every write)".to_string(),
            ));
        }
        if self.level0_compaction_trigger < 2 {
            return Err(StrataError::Config(
                "level0_compaction_trigger must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the MemTable entry threshold
    pub fn memtable_threshold(mut self, count: usize) -> Self {
        self.config.memtable_threshold = count;
        self
    }

    /// Set the level-0 compaction trigger (fan-in)
    pub fn level0_compaction_trigger(mut self, count: usize) -> Self {
        self.config.level0_compaction_trigger = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
