//! CSV implementation of [`RecordSink`]

use crate::config::OutputMode;
use crate::output::RecordSink;
use crate::record::{RestaurantRecord, COLUMNS};
use crate::SinkError;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Writes records to a comma-separated file with a single header row
///
/// # Example
///
/// ```no_run
/// use restaurant_harvest::config::OutputMode;
/// use restaurant_harvest::output::{CsvSink, RecordSink};
///
/// let mut sink = CsvSink::new("restaurants_dataset.csv", OutputMode::Truncate);
/// sink.initialize().unwrap();
/// ```
pub struct CsvSink {
    path: PathBuf,
    mode: OutputMode,
    writer: Option<csv::Writer<File>>,
    last_id: u64,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            path: path.into(),
            mode,
            writer: None,
            last_id: 0,
        }
    }

    /// Creates or truncates the file and writes the header
    fn create(&mut self) -> Result<(), SinkError> {
        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(COLUMNS)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;

        self.writer = Some(writer);
        self.last_id = 0;
        Ok(())
    }

    /// Opens an existing file for appending after checking its header
    ///
    /// A file whose last row lacks its line terminator gets one first, so new
    /// rows never run into the existing last row.
    fn reopen(&mut self) -> Result<(), SinkError> {
        self.last_id = read_last_id(&self.path)?;

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !ends_with_newline(&mut file)? {
            tracing::warn!(
                "{} does not end with a newline, terminating its last row",
                self.path.display()
            );
            file.write_all(b"\n")?;
            file.sync_data()?;
        }
        self.writer = Some(
            csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file),
        );
        Ok(())
    }
}

impl RecordSink for CsvSink {
    /// Calling this again after a successful call is a no-op
    fn initialize(&mut self) -> Result<(), SinkError> {
        if self.writer.is_some() {
            return Ok(());
        }

        let has_content = std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false);

        match self.mode {
            OutputMode::Append if has_content => {
                self.reopen()?;
                tracing::info!(
                    "Appending to {} after id {}",
                    self.path.display(),
                    self.last_id
                );
            }
            _ => {
                self.create()?;
                tracing::info!("Created {}", self.path.display());
            }
        }

        Ok(())
    }

    fn append(&mut self, records: &[RestaurantRecord]) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::NotInitialized)?;

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        writer.get_ref().sync_data()?;

        if let Some(last) = records.last() {
            self.last_id = last.id;
        }
        Ok(())
    }

    fn last_id(&self) -> u64 {
        self.last_id
    }
}

/// Validates the header of an existing file and returns its last id
fn read_last_id(path: &Path) -> Result<u64, SinkError> {
    let mut reader = csv::Reader::from_path(path)?;

    let found: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if found != COLUMNS {
        return Err(SinkError::HeaderMismatch {
            path: path.display().to_string(),
            found,
            expected: COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }

    let mut last_id = 0;
    for row in reader.records() {
        let row = row?;
        let value = row.get(0).unwrap_or_default();
        // u64::MAX leaves no id to continue with
        last_id = value
            .parse::<u64>()
            .ok()
            .filter(|id| id.checked_add(1).is_some())
            .ok_or_else(|| SinkError::InvalidId {
                path: path.display().to_string(),
                value: value.to_string(),
            })?;
    }

    Ok(last_id)
}

/// Whether a non-empty file's final byte is `\n`
fn ends_with_newline(file: &mut File) -> Result<bool, SinkError> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
