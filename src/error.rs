use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while deduplicating a single cache file
#[derive(Error, Debug)]
pub enum DedupeError {
    #[error("{}: missing header", .file.display())]
    MissingHeader { file: PathBuf },

    #[error("{}: column '{column}' not found in header", .file.display())]
    MissingColumn { file: PathBuf, column: String },

    #[error("{}: no key columns configured", .file.display())]
    NoKeyColumns { file: PathBuf },

    #[error("{}: CSV error: {source}", .file.display())]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: IO error: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scratch store {}: {source}", .store.display())]
    ScratchStore {
        store: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{}: failed to replace original: {source}", .file.display())]
    Persist {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DedupeResult<T> = Result<T, DedupeError>;

impl DedupeError {
    pub(crate) fn csv(file: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { file: file.into(), source }
    }

    pub(crate) fn io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { file: file.into(), source }
    }

    pub(crate) fn store(store: impl Into<PathBuf>, source: rusqlite::Error) -> Self {
        Self::ScratchStore { store: store.into(), source }
    }

    /// True for errors caused by the file layout rather than the environment
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingHeader { .. } | Self::MissingColumn { .. } | Self::NoKeyColumns { .. })
    }
}
