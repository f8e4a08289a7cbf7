use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use sysinfo::System;
use crate::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupeConfig {
    pub base_directory: PathBuf,
    pub files: Vec<ManagedFile>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One cache file and how it gets deduplicated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedFile {
    pub name: String,
    #[serde(default = "default_key_columns")]
    pub key_columns: Vec<String>,
    pub strategy: Strategy,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// Expected scale of a file, which picks the processing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    InMemory,
    DiskBacked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_ram_usage_percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbosity: String,
}

fn default_key_columns() -> Vec<String> {
    vec![DEFAULT_KEY_COLUMN.to_string()]
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from(DEFAULT_BASE_DIRECTORY),
            files: vec![
                ManagedFile::new(POOLS_CACHE_FILE, Strategy::DiskBacked),
                ManagedFile::new(TOKENS_CACHE_FILE, Strategy::InMemory),
            ],
            memory: MemoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_ram_usage_percent: DEFAULT_MAX_RAM_USAGE_PERCENT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: "normal".to_string(),
        }
    }
}

impl ManagedFile {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            key_columns: default_key_columns(),
            strategy,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_key_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::InMemory => write!(f, "in-memory"),
            Strategy::DiskBacked => write!(f, "disk-backed"),
        }
    }
}

impl MemoryConfig {
    /// Bytes an in-memory run may comfortably use, based on currently available RAM
    pub fn in_memory_budget_bytes(&self) -> u64 {
        let mut system = System::new();
        system.refresh_memory();

        let available = system.available_memory() as f64;
        (available * self.max_ram_usage_percent as f64 / PERCENT_100) as u64
    }
}
