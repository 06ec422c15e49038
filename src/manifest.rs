//! Manifest of generated stimuli.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Column names of the manifest table, in order.
pub const HEADER: [&str; 4] = ["Background", "Foreground", "Ratio", "Filename"];

/// One generated stimulus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Background source path without extension.
    #[serde(rename = "Background")]
    pub background: String,
    /// Foreground source path without extension.
    #[serde(rename = "Foreground")]
    pub foreground: String,
    /// Achieved foreground/background pixel ratio.
    #[serde(rename = "Ratio")]
    pub ratio: f64,
    /// File name of the composite within its background directory.
    #[serde(rename = "Filename")]
    pub filename: String,
}

/// Append-only collection of [`Record`]s.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    records: Vec<Record>,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no rows have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Write the manifest as CSV to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let wrap = |source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|e| wrap(csv::Error::from(e)))?;
        self.to_writer(file).map_err(wrap)
    }

    /// Serialize the manifest as CSV. The header is written even when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv.write_record(HEADER)?;
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }
}
