use crate::record::{Sample, CSV_HEADER};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open log {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to append to log {path}: {source}")]
    Write { path: String, source: csv::Error },
    #[error("failed to flush log {path}: {source}")]
    Flush {
        path: String,
        source: std::io::Error,
    },
}

/// Append-only CSV log. The destination is an explicit constructor argument,
/// and the file handle is opened and released inside each `append` call.
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, writing the header first if the file is being
    /// created by this call. O_APPEND keeps external readers safe.
    pub fn append(&self, sample: &Sample) -> Result<(), LogError> {
        let fresh = !self.path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| LogError::Open {
                path: self.path.display().to_string(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if fresh {
            self.write_record(&mut writer, &CSV_HEADER)?;
        }
        self.write_record(&mut writer, &sample.fields())?;
        writer.flush().map_err(|source| LogError::Flush {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_record<W, I, F>(&self, writer: &mut csv::Writer<W>, record: I) -> Result<(), LogError>
    where
        W: std::io::Write,
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        writer.write_record(record).map_err(|source| LogError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}
