pub mod in_memory;
pub mod on_disk;
pub mod record;
pub mod scratch;
pub mod writer;


pub use in_memory::dedupe_in_memory;
pub use on_disk::{dedupe_on_disk, dedupe_on_disk_in};
pub use record::{normalize_cell, DedupKey, HeaderLayout};
pub use scratch::ScratchStore;
pub use writer::AtomicCsvWriter;

use std::path::Path;
use std::time::Duration;
use crate::config::{ManagedFile, Strategy};
use crate::error::DedupeResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeStats {
    pub strategy: Strategy,
    pub total_records: usize,
    pub unique_records: usize,
    pub duplicates_removed: usize,
    pub processing_time_ms: u64,
}

impl DedupeStats {
    pub fn new(strategy: Strategy, total_records: usize, unique_records: usize, elapsed: Duration) -> Self {
        Self {
            strategy,
            total_records,
            unique_records,
            duplicates_removed: total_records.saturating_sub(unique_records),
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }

    /// Range of ids written to the output; empty when no rows survived
    pub fn id_range(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.unique_records
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Deduplicate one managed file in place using its configured strategy
pub fn dedupe_file(path: &Path, file: &ManagedFile) -> DedupeResult<DedupeStats> {
    match file.strategy {
        Strategy::InMemory => dedupe_in_memory(path, &file.key_columns),
        Strategy::DiskBacked => dedupe_on_disk(path, &file.key_columns, file.batch_size),
    }
}
