use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};
use crate::config::{DedupeConfig, ManagedFile, Strategy};
use crate::constants::*;
use crate::dedupe::{dedupe_file, DedupeStats};
use crate::error::DedupeError;
use crate::utils::format_bytes;

/// What happened to one configured file
#[derive(Debug)]
pub enum FileOutcome {
    Deduplicated(DedupeStats),
    Skipped,
    Failed(DedupeError),
}

#[derive(Debug)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub processing_time_ms: u64,
}

impl RunReport {
    pub fn processed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Deduplicated(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Skipped))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed(_)))
            .count()
    }

    /// 0 when every file was deduplicated or skipped as missing, 1 if any failed
    pub fn exit_code(&self) -> u8 {
        if self.failed_count() > 0 {
            EXIT_CODE_FILE_FAILED
        } else {
            EXIT_CODE_SUCCESS
        }
    }
}

/// Process every configured file in order.
///
/// Missing files are skipped with a warning. A failing file is logged and
/// recorded, and the remaining files are still attempted; its original
/// content is never replaced.
pub fn run(config: &DedupeConfig) -> RunReport {
    let start_time = Instant::now();
    let mut report = RunReport::default();

    for file in &config.files {
        let path = config.base_directory.join(&file.name);

        let outcome = if !path.is_file() {
            warn!("⚠️ File not found, skipping: {}", path.display());
            FileOutcome::Skipped
        } else {
            check_memory_budget(config, file, &path);
            match dedupe_file(&path, file) {
                Ok(stats) => FileOutcome::Deduplicated(stats),
                Err(e) => {
                    if e.is_configuration_error() {
                        error!("💥 {}: configuration error: {}", file.name, e);
                    } else {
                        error!("💥 {}: {}", file.name, e);
                    }
                    FileOutcome::Failed(e)
                }
            }
        };

        report.files.push(FileReport {
            name: file.name.clone(),
            path,
            outcome,
        });
    }

    report.processing_time_ms = start_time.elapsed().as_millis() as u64;
    info!(
        "🎉 Finished: {} deduplicated, {} skipped, {} failed",
        report.processed_count(),
        report.skipped_count(),
        report.failed_count()
    );
    report
}

fn check_memory_budget(config: &DedupeConfig, file: &ManagedFile, path: &Path) {
    if file.strategy != Strategy::InMemory {
        return;
    }

    let Ok(metadata) = std::fs::metadata(path) else {
        return;
    };
    let budget = config.memory.in_memory_budget_bytes();
    if let Some(message) = memory_budget_warning(file, metadata.len(), budget) {
        warn!("{}", message);
    }
}

/// Warning text when an in-memory file is larger than the RAM budget
pub fn memory_budget_warning(file: &ManagedFile, file_size: u64, budget: u64) -> Option<String> {
    if file.strategy != Strategy::InMemory || budget == 0 || file_size <= budget {
        return None;
    }

    Some(format!(
        "{} is {} but only {} of RAM is budgeted; consider the disk_backed strategy",
        file.name,
        format_bytes(file_size),
        format_bytes(budget)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_budget_warning_only_for_oversized_in_memory_files() {
        let tokens = ManagedFile::new(".cached-tokens.csv", Strategy::InMemory);
        let pools = ManagedFile::new(".cached-pools.csv", Strategy::DiskBacked);

        let message = memory_budget_warning(&tokens, 2048, 1024).unwrap();
        assert!(message.contains(".cached-tokens.csv"));
        assert!(message.contains("2.00 KB"));
        assert!(message.contains("1.00 KB"));
        assert!(message.contains("disk_backed"));

        assert!(memory_budget_warning(&tokens, 1024, 1024).is_none());
        assert!(memory_budget_warning(&tokens, 2048, 0).is_none());
        assert!(memory_budget_warning(&pools, 2048, 1024).is_none());
    }

    #[test]
    fn test_memory_budget_reads_available_memory() {
        let config = DedupeConfig::default();
        let budget = config.memory.in_memory_budget_bytes();
        let file = ManagedFile::new("tiny.csv", Strategy::InMemory);

        // A zero-byte file never exceeds the budget, whatever the host reports.
        assert!(memory_budget_warning(&file, 0, budget).is_none());
    }

    #[test]
    fn test_exit_code_reflects_failures() {
        let mut report = RunReport::default();
        report.files.push(FileReport {
            name: "a.csv".to_string(),
            path: PathBuf::from("cache/a.csv"),
            outcome: FileOutcome::Skipped,
        });
        assert_eq!(report.exit_code(), EXIT_CODE_SUCCESS);

        report.files.push(FileReport {
            name: "b.csv".to_string(),
            path: PathBuf::from("cache/b.csv"),
            outcome: FileOutcome::Failed(DedupeError::MissingHeader { file: PathBuf::from("cache/b.csv") }),
        });
        assert_eq!(report.exit_code(), EXIT_CODE_FILE_FAILED);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
    }
}
