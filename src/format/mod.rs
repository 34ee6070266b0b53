//! NRT text interchange format: `#` header block, label row, comma-separated rows

use std::fmt::Display;
use std::io;

use crate::storage::{self, Record};

mod file;
mod time_columns;

#[cfg(test)]
mod tests;

pub use file::DataFile;
pub use time_columns::{TimeConvention, normalize_time_columns};

/// Errors raised while reading or writing NRT text
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Format error on line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error("Unrecognized time columns: {0:?}")]
    UnknownTimeColumns(Vec<String>),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] storage::Error),
}

impl Error {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Error::Format {
            line,
            reason: reason.into(),
        }
    }
}

/// Label row written in front of every serialized body
pub const SPLIT_TIME_LABELS: [&str; 6] = ["YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND"];

/// A data row as read from the body, with its 1-based line number
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub line: usize,
    pub cells: Vec<String>,
}

/// Text split into its three parts, before any time normalization
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawText {
    /// Leading `#` lines joined with `\n`, no trailing newline
    pub header: String,
    /// Upper-cased labels
    pub labels: Vec<String>,
    pub rows: Vec<RawRow>,
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Splits `text` into header block, label row and data rows.
pub fn parse(text: &str) -> Result<RawText, Error> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let mut header = Vec::new();
    let (label_line, label_text) = loop {
        match lines.next() {
            Some((_, line)) if is_comment(line) => header.push(line),
            Some(found) => break found,
            None => return Err(Error::format(header.len() + 1, "missing label row after header")),
        }
    };

    let labels: Vec<String> = label_text.split(',').map(|l| l.trim().to_uppercase()).collect();
    if labels.iter().any(|l| l.is_empty()) {
        return Err(Error::format(label_line, "empty column label"));
    }

    let mut rows = Vec::new();
    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        let cells: Vec<String> = text.split(',').map(str::to_string).collect();
        if cells.len() != labels.len() {
            return Err(Error::format(
                line,
                format!("{} fields for {} labels", cells.len(), labels.len()),
            ));
        }
        rows.push(RawRow { line, cells });
    }

    log::debug!(
        "parsed {} header lines, {} labels, {} rows",
        header.len(),
        labels.len(),
        rows.len()
    );

    Ok(RawText {
        header: header.join("\n"),
        labels,
        rows,
    })
}

/// Parses and normalizes in one step, returning the header, the labels
/// (starting with `DATETIME`) and the records.
pub fn read(text: &str) -> Result<(String, Vec<String>, Vec<Record<String>>), Error> {
    let raw = parse(text)?;
    let (labels, records) = normalize_time_columns(&raw.labels, &raw.rows)?;
    Ok((raw.header, labels, records))
}

/// Renders records back to text.
///
/// `labels[0]` names the timestamp column and is replaced by the six split
/// time labels; every timestamp is written as `YEAR,...,SECOND` fields.
pub fn serialize<S, V>(header: &str, labels: &[S], records: &[Record<V>]) -> String
where
    S: AsRef<str>,
    V: Display,
{
    let mut out = String::new();
    if !header.is_empty() {
        out.push_str(header);
        out.push('\n');
    }

    out.push_str(&SPLIT_TIME_LABELS.join(","));
    for label in labels.iter().skip(1) {
        out.push(',');
        out.push_str(&label.as_ref().to_uppercase());
    }
    out.push('\n');

    for record in records {
        out.push_str(&record.timestamp.format("%Y,%m,%d,%H,%M,%S").to_string());
        for value in &record.values {
            out.push(',');
            out.push_str(&value.to_string());
        }
        out.push('\n');
    }
    out
}
