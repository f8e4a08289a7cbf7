use csv::StringRecord;
use std::path::Path;
use crate::constants::ID_COLUMN;
use crate::error::{DedupeError, DedupeResult};

/// Normalized key values of one row, compared for exact equality
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(Vec<String>);

impl DedupKey {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self(values.into_iter().map(normalize_cell).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// Trim surrounding whitespace and fold case
pub fn normalize_cell(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Column positions resolved once from a file's header
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    column_count: usize,
    key_indices: Vec<usize>,
    id_index: usize,
}

impl HeaderLayout {
    pub fn resolve(file: &Path, header: &StringRecord, key_columns: &[String]) -> DedupeResult<Self> {
        if header.is_empty() || header.iter().all(|name| name.trim().is_empty()) {
            return Err(DedupeError::MissingHeader { file: file.to_path_buf() });
        }

        if key_columns.is_empty() {
            return Err(DedupeError::NoKeyColumns { file: file.to_path_buf() });
        }

        let position = |column: &str| {
            header
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| DedupeError::MissingColumn {
                    file: file.to_path_buf(),
                    column: column.to_string(),
                })
        };

        let key_indices = key_columns
            .iter()
            .map(|column| position(column))
            .collect::<DedupeResult<Vec<_>>>()?;
        let id_index = position(ID_COLUMN)?;

        Ok(Self {
            column_count: header.len(),
            key_indices,
            id_index,
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn key_indices(&self) -> &[usize] {
        &self.key_indices
    }

    pub fn id_index(&self) -> usize {
        self.id_index
    }

    pub fn key_of(&self, record: &StringRecord) -> DedupKey {
        DedupKey::from_values(self.key_indices.iter().map(|&i| record.get(i).unwrap_or("")))
    }

    pub fn key_of_cells(&self, cells: &[String]) -> DedupKey {
        DedupKey::from_values(
            self.key_indices
                .iter()
                .map(|&i| cells.get(i).map(String::as_str).unwrap_or("")),
        )
    }

    /// Copy of `record` with the id column set to `id`
    pub fn with_id(&self, record: &StringRecord, id: usize) -> StringRecord {
        let id = id.to_string();
        record
            .iter()
            .enumerate()
            .map(|(i, value)| if i == self.id_index { id.as_str() } else { value })
            .collect()
    }
}
