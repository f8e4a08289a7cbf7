use csv::StringRecord;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use crate::config::Strategy;
use crate::constants::PROGRESS_REPORT_INTERVAL_RECORDS;
use crate::dedupe::record::{DedupKey, HeaderLayout};
use crate::dedupe::writer::AtomicCsvWriter;
use crate::dedupe::{display_name, DedupeStats};
use crate::error::{DedupeError, DedupeResult};

/// Deduplicate `path` holding every distinct key in memory, then rewrite it
/// with a fresh 1..N id column.
pub fn dedupe_in_memory(path: &Path, key_columns: &[String]) -> DedupeResult<DedupeStats> {
    let start_time = Instant::now();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| DedupeError::csv(path, e))?;
    let header = reader.headers().map_err(|e| DedupeError::csv(path, e))?.clone();
    let layout = HeaderLayout::resolve(path, &header, key_columns)?;

    let mut output = AtomicCsvWriter::create(path)?;
    output.write_header(&header)?;

    let mut seen: HashSet<DedupKey> = HashSet::new();
    let mut record = StringRecord::new();
    let mut total_records = 0;

    while reader.read_record(&mut record).map_err(|e| DedupeError::csv(path, e))? {
        total_records += 1;
        if total_records % PROGRESS_REPORT_INTERVAL_RECORDS == 0 {
            debug!("{}: {} rows read, {} unique so far", path.display(), total_records, seen.len());
        }

        if !seen.insert(layout.key_of(&record)) {
            continue;
        }
        output.write_row(&layout.with_id(&record, seen.len()))?;
    }

    let unique_records = output.rows_written();
    output.commit()?;

    info!(
        "✅ {}: {} rows read, kept {} with ids 1..={}",
        display_name(path),
        total_records,
        unique_records,
        unique_records
    );

    Ok(DedupeStats::new(
        Strategy::InMemory,
        total_records,
        unique_records,
        start_time.elapsed(),
    ))
}
