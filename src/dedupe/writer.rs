use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::error::{DedupeError, DedupeResult};

/// CSV writer that stages output next to `target` and swaps it in on commit.
///
/// The temp file lives in the target's directory so the final rename never
/// crosses filesystems. Records end with the same terminator as the target's
/// header line (CRLF or LF). Until `commit` succeeds the original file is left
/// untouched; dropping the writer without committing removes the temp file.
pub struct AtomicCsvWriter {
    target: PathBuf,
    writer: csv::Writer<NamedTempFile>,
    rows_written: usize,
}

impl AtomicCsvWriter {
    pub fn create(target: &Path) -> DedupeResult<Self> {
        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(&format!("{}{}.", TEMP_FILE_PREFIX, file_name))
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(directory)
            .map_err(|e| DedupeError::io(target, e))?;

        // Keep the original's mode; temp files are created owner-only.
        if let Ok(metadata) = std::fs::metadata(target) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| DedupeError::io(temp.path(), e))?;
        }

        Ok(Self {
            target: target.to_path_buf(),
            writer: csv::WriterBuilder::new()
                .terminator(detect_terminator(target)?)
                .from_writer(temp),
            rows_written: 0,
        })
    }

    pub fn temp_path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    pub fn write_header<I, T>(&mut self, header: I) -> DedupeResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(header)
            .map_err(|e| DedupeError::csv(&self.target, e))
    }

    pub fn write_row<I, T>(&mut self, row: I) -> DedupeResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(row)
            .map_err(|e| DedupeError::csv(&self.target, e))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush, sync and rename the staged file over the target
    pub fn commit(self) -> DedupeResult<()> {
        let Self { target, mut writer, .. } = self;

        writer.flush().map_err(|e| DedupeError::io(&target, e))?;
        let temp = writer.into_inner().map_err(|e| {
            DedupeError::io(&target, std::io::Error::new(e.error().kind(), e.to_string()))
        })?;
        temp.as_file()
            .sync_all()
            .map_err(|e| DedupeError::io(temp.path(), e))?;
        temp.persist(&target)
            .map_err(|e| DedupeError::Persist { file: target.clone(), source: e.error })?;

        Ok(())
    }
}

/// Line terminator used by the first line of `path`; LF when absent or empty
pub fn detect_terminator(path: &Path) -> DedupeResult<csv::Terminator> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(csv::Terminator::Any(b'\n')),
        Err(e) => return Err(DedupeError::io(path, e)),
    };

    let mut first_line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut first_line)
        .map_err(|e| DedupeError::io(path, e))?;

    if first_line.ends_with(b"\r\n") {
        Ok(csv::Terminator::CRLF)
    } else {
        Ok(csv::Terminator::Any(b'\n'))
    }
}
