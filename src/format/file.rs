use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::distr::Alphanumeric;
use rand::{Rng, rng};

use super::{Error, read, serialize};
use crate::schema::{self, SqlBatch, TableSchema};
use crate::storage::{Dataset, Record};

/// An NRT file held in memory: header block, labels and normalized records.
#[derive(Clone, Debug, Default)]
pub struct DataFile {
    path: Option<PathBuf>,
    header: String,
    labels: Vec<String>,
    records: Vec<Record<String>>,
}

impl DataFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            log::error!("could not open {}: {}", path.display(), e);
            e
        })?;

        let mut file = Self::from_text(&text)?;
        file.path = Some(path.to_path_buf());
        log::debug!("loaded {} records from {}", file.records.len(), path.display());
        Ok(file)
    }

    pub fn from_text(text: &str) -> Result<Self, Error> {
        let (header, labels, records) = read(text)?;
        Ok(Self {
            path: None,
            header,
            labels,
            records,
        })
    }

    /// Snapshot of a dataset, values rendered with `Display`
    pub fn from_dataset<V: Display>(header: &str, dataset: &Dataset<V>) -> Self {
        let series = dataset.series();
        let records = (0..dataset.len())
            .map(|pos| Record {
                timestamp: series[0].points()[pos].timestamp,
                values: series.iter().map(|s| s.points()[pos].value.to_string()).collect(),
            })
            .collect();

        Self {
            path: None,
            header: header.to_string(),
            labels: dataset.labels(),
            records,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn records(&self) -> &[Record<String>] {
        &self.records
    }

    /// Appends every line of `structure` to the header as a `#! ` directive.
    pub fn append_directives(&mut self, structure: &str) {
        for line in structure.lines().filter(|l| !l.trim().is_empty()) {
            if !self.header.is_empty() {
                self.header.push('\n');
            }
            self.header.push_str("#! ");
            self.header.push_str(line.trim());
        }
    }

    pub fn push_table(&mut self, table: &TableSchema) {
        self.append_directives(&table.to_directive());
    }

    /// SQL compiled from the directive lines of the header
    pub fn sql(&self) -> SqlBatch {
        schema::compile_header(&self.header)
    }

    /// Builds a dataset with one variable per non-time label.
    pub fn to_dataset(&self) -> Result<Dataset<String>, Error> {
        let mut dataset = Dataset::new(self.labels.get(1..).unwrap_or_default())?;
        dataset.add_data(self.records.iter().cloned())?;
        Ok(dataset)
    }

    pub fn to_text(&self) -> String {
        serialize(&self.header, &self.labels, &self.records)
    }

    /// Writes the file to `path`.
    ///
    /// The text goes to a temporary sibling first and is renamed over the
    /// destination, so a failed write leaves any existing file intact.
    pub fn write<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let text = self.to_text();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "nrt".to_string());
        let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, generate_random_string(10)));

        if let Err(e) = write_and_sync(&temp_path, &text) {
            log::error!("could not write {}: {}", path.display(), e);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            log::error!("could not move {} into place: {}", path.display(), e);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

fn write_and_sync(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

fn generate_random_string(len: usize) -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
