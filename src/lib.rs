pub mod cli;
pub mod config;
pub mod constants;
pub mod dedupe;
pub mod driver;
pub mod error;
pub mod utils;

// Re-export main types for convenience
pub use config::{DedupeConfig, ManagedFile, Strategy};
pub use dedupe::{dedupe_file, dedupe_in_memory, dedupe_on_disk, DedupeStats};
pub use driver::{run, FileOutcome, RunReport};
pub use error::{DedupeError, DedupeResult};
