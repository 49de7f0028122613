//! Persistence adapters for the failure ledger.
//!
//! The validator never decides where failing rows go; callers hand the
//! ledger to a [`FailureSink`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Destination for the failure ledger.
pub trait FailureSink {
    /// Persist the ledger verbatim.
    fn write_failures(&mut self, failures: &DataFrame) -> Result<()>;
}

/// Writes the failure ledger as CSV with a header row.
///
/// Nulls are written as empty fields.
#[derive(Debug)]
pub struct CsvFailureSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvFailureSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvFailureSink<File> {
    /// Create (or truncate) a CSV file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> FailureSink for CsvFailureSink<W> {
    fn write_failures(&mut self, failures: &DataFrame) -> Result<()> {
        if failures.width() == 0 {
            debug!("failure ledger is empty, nothing to write");
            return Ok(());
        }
        let mut frame = failures.clone();
        CsvWriter::new(&mut self.writer)
            .include_header(true)
            .finish(&mut frame)?;
        self.writer.flush()?;
        debug!(rows = frame.height(), "failure ledger written as CSV");
        Ok(())
    }
}

/// Keeps every handed-over ledger in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<DataFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written ledger.
    pub fn last(&self) -> Option<&DataFrame> {
        self.frames.last()
    }
}

impl FailureSink for MemorySink {
    fn write_failures(&mut self, failures: &DataFrame) -> Result<()> {
        self.frames.push(failures.clone());
        Ok(())
    }
}
