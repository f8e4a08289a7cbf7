use csv::StringRecord;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use crate::config::Strategy;
use crate::constants::{DEFAULT_BATCH_SIZE, PROGRESS_REPORT_INTERVAL_RECORDS};
use crate::dedupe::record::HeaderLayout;
use crate::dedupe::scratch::{BufferedRow, ScratchStore};
use crate::dedupe::writer::AtomicCsvWriter;
use crate::dedupe::{display_name, DedupeStats};
use crate::error::{DedupeError, DedupeResult};

/// Deduplicate `path` through a SQLite scratch store in the system temp
/// directory, then rewrite it with a fresh 1..N id column.
pub fn dedupe_on_disk(path: &Path, key_columns: &[String], batch_size: usize) -> DedupeResult<DedupeStats> {
    dedupe_on_disk_in(path, key_columns, batch_size, &std::env::temp_dir())
}

/// Same as [`dedupe_on_disk`] with the scratch store placed in `scratch_dir`
pub fn dedupe_on_disk_in(
    path: &Path,
    key_columns: &[String],
    batch_size: usize,
    scratch_dir: &Path,
) -> DedupeResult<DedupeStats> {
    let start_time = Instant::now();
    let batch_size = batch_size.max(1);
    let name = display_name(path);

    info!("🔍 {}: scanning into scratch store (batch size {})", name, batch_size);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| DedupeError::csv(path, e))?;

    let mut header = StringRecord::new();
    if !reader.read_record(&mut header).map_err(|e| DedupeError::csv(path, e))? {
        return Err(DedupeError::MissingHeader { file: path.to_path_buf() });
    }
    let layout = HeaderLayout::resolve(path, &header, key_columns)?;

    let mut store = ScratchStore::create_in(scratch_dir, layout.column_count(), key_columns.len())?;

    // Scan phase
    let mut batch: Vec<BufferedRow> = Vec::with_capacity(batch_size.min(DEFAULT_BATCH_SIZE));
    let mut record = StringRecord::new();
    let mut total_records = 0;

    while reader.read_record(&mut record).map_err(|e| DedupeError::csv(path, e))? {
        total_records += 1;

        let cells: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
        let key = layout.key_of_cells(&cells);
        batch.push(BufferedRow { cells, key });

        if batch.len() >= batch_size {
            store.insert_batch(&batch)?;
            batch.clear();
        }

        if total_records % PROGRESS_REPORT_INTERVAL_RECORDS == 0 {
            debug!("{}: {} rows scanned", name, total_records);
        }
    }
    if !batch.is_empty() {
        store.insert_batch(&batch)?;
    }
    drop(batch);

    let unique_records = store.count()?;
    info!("📊 {}: {} rows read, {} unique", name, total_records, unique_records);

    // Emit phase
    let mut output = AtomicCsvWriter::create(path)?;
    output.write_header(&header)?;

    let id_index = layout.id_index();
    let mut next_id = 1usize;
    store.for_each_row(|mut cells| {
        cells[id_index] = next_id.to_string();
        next_id += 1;
        output.write_row(&cells)
    })?;

    store.close()?;
    output.commit()?;

    info!("✅ {}: rewritten with ids 1..={}", name, next_id - 1);

    Ok(DedupeStats::new(
        Strategy::DiskBacked,
        total_records,
        unique_records,
        start_time.elapsed(),
    ))
}
