pub mod model;


use anyhow::{Context, Result};
use std::path::Path;

// Re-export main types
pub use self::model::{DedupeConfig, LoggingConfig, ManagedFile, MemoryConfig, Strategy};

use crate::constants::*;

impl DedupeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            anyhow::bail!("at least one managed file must be configured");
        }

        for file in &self.files {
            if file.name.trim().is_empty() {
                anyhow::bail!("managed file name cannot be empty");
            }

            if file.key_columns.is_empty() {
                anyhow::bail!("{}: key_columns cannot be empty", file.name);
            }

            if file.key_columns.iter().any(|c| c.trim().is_empty()) {
                anyhow::bail!("{}: key column names cannot be blank", file.name);
            }

            if file.batch_size < MIN_BATCH_SIZE || file.batch_size > MAX_BATCH_SIZE {
                anyhow::bail!(
                    "{}: batch_size must be between {} and {}",
                    file.name, MIN_BATCH_SIZE, MAX_BATCH_SIZE
                );
            }
        }

        if self.memory.max_ram_usage_percent == 0
            || self.memory.max_ram_usage_percent > MAX_RAM_USAGE_PERCENT
        {
            anyhow::bail!(
                "max_ram_usage_percent must be between 1 and {}",
                MAX_RAM_USAGE_PERCENT
            );
        }

        if !matches!(self.logging.verbosity.as_str(), "silent" | "normal" | "verbose") {
            anyhow::bail!("verbosity must be 'silent', 'normal', or 'verbose'");
        }

        Ok(())
    }
}
