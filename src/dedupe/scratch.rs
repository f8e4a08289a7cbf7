use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tempfile::TempPath;
use tracing::{debug, warn};
use crate::constants::*;
use crate::dedupe::record::DedupKey;
use crate::error::{DedupeError, DedupeResult};

/// One trimmed input row waiting to be inserted, with its normalized key
#[derive(Debug, Clone)]
pub struct BufferedRow {
    pub cells: Vec<String>,
    pub key: DedupKey,
}

/// Disposable SQLite table holding one row per distinct key.
///
/// Rows keep their insertion order through an autoincrement `seq` column and
/// a unique index over the normalized key columns turns repeated keys into
/// silent no-ops via `INSERT OR IGNORE`.
pub struct ScratchStore {
    conn: Connection,
    // Dropped after `conn`; removes the backing file if `close` never ran.
    path: TempPath,
    column_count: usize,
    insert_sql: String,
    select_sql: String,
}

impl ScratchStore {
    /// Create a fresh, empty store file inside `directory`
    pub fn create_in(directory: &Path, column_count: usize, key_count: usize) -> DedupeResult<Self> {
        let path = tempfile::Builder::new()
            .prefix(SCRATCH_STORE_PREFIX)
            .suffix(SCRATCH_STORE_SUFFIX)
            .tempfile_in(directory)
            .map_err(|e| DedupeError::io(directory, e))?
            .into_temp_path();

        let conn = Connection::open(&path).map_err(|e| DedupeError::store(&*path, e))?;

        let data_columns: Vec<String> = (0..column_count).map(|i| format!("c{}", i)).collect();
        let key_columns: Vec<String> = (0..key_count).map(|i| format!("k{}", i)).collect();

        let definitions = data_columns
            .iter()
            .chain(key_columns.iter())
            .map(|c| format!("{} TEXT", c))
            .collect::<Vec<_>>()
            .join(", ");

        // Scratch data: no crash durability required.
        conn.pragma_update(None, "synchronous", "OFF")
            .map_err(|e| DedupeError::store(&*path, e))?;
        conn.pragma_update_and_check(None, "journal_mode", "MEMORY", |row| row.get::<_, String>(0))
            .map_err(|e| DedupeError::store(&*path, e))?;

        let schema = format!(
            "CREATE TABLE {table} (seq INTEGER PRIMARY KEY AUTOINCREMENT, {definitions});
             CREATE UNIQUE INDEX {index} ON {table} ({keys});",
            table = SCRATCH_TABLE_NAME,
            index = SCRATCH_INDEX_NAME,
            definitions = definitions,
            keys = key_columns.join(", "),
        );
        conn.execute_batch(&schema)
            .map_err(|e| DedupeError::store(&*path, e))?;

        let all_columns = data_columns
            .iter()
            .chain(key_columns.iter())
            .cloned()
            .collect::<Vec<_>>();
        let placeholders = (1..=all_columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        let insert_sql = format!(
            "INSERT OR IGNORE INTO {} ({}) VALUES ({})",
            SCRATCH_TABLE_NAME,
            all_columns.join(", "),
            placeholders
        );
        let select_sql = format!(
            "SELECT {} FROM {} ORDER BY seq",
            data_columns.join(", "),
            SCRATCH_TABLE_NAME
        );

        debug!("Created scratch store at {}", path.display());

        Ok(Self {
            conn,
            path,
            column_count,
            insert_sql,
            select_sql,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert one batch inside a single transaction; returns rows actually stored
    pub fn insert_batch(&mut self, rows: &[BufferedRow]) -> DedupeResult<usize> {
        let path = &self.path;
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DedupeError::store(&**path, e))?;

        let mut inserted = 0;
        {
            let mut stmt = tx
                .prepare_cached(&self.insert_sql)
                .map_err(|e| DedupeError::store(&**path, e))?;
            for row in rows {
                let values = row.cells.iter().chain(row.key.values().iter());
                inserted += stmt
                    .execute(params_from_iter(values))
                    .map_err(|e| DedupeError::store(&**path, e))?;
            }
        }

        tx.commit().map_err(|e| DedupeError::store(&**path, e))?;
        Ok(inserted)
    }

    pub fn count(&self) -> DedupeResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", SCRATCH_TABLE_NAME), [], |row| row.get(0))
            .map_err(|e| DedupeError::store(&*self.path, e))?;
        Ok(count as usize)
    }

    /// Visit stored rows in first-seen order
    pub fn for_each_row<F>(&self, mut visit: F) -> DedupeResult<()>
    where
        F: FnMut(Vec<String>) -> DedupeResult<()>,
    {
        let path = &*self.path;
        let mut stmt = self
            .conn
            .prepare(&self.select_sql)
            .map_err(|e| DedupeError::store(path, e))?;
        let mut rows = stmt.query([]).map_err(|e| DedupeError::store(path, e))?;

        while let Some(row) = rows.next().map_err(|e| DedupeError::store(path, e))? {
            let cells = (0..self.column_count)
                .map(|i| row.get::<_, String>(i))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DedupeError::store(path, e))?;
            visit(cells)?;
        }

        Ok(())
    }

    /// Close the connection and delete the backing file.
    ///
    /// A file that is already gone is not an error; any other removal
    /// failure is logged and ignored.
    pub fn close(self) -> DedupeResult<()> {
        let Self { conn, path, .. } = self;

        if let Err((_, e)) = conn.close() {
            return Err(DedupeError::store(&*path, e));
        }

        let store_path = path.to_path_buf();
        match path.close() {
            Ok(()) => debug!("Removed scratch store {}", store_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove scratch store {}: {}", store_path.display(), e),
        }

        Ok(())
    }
}
