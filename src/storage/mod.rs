//! Time-indexed in-memory storage: single-variable series and aligned datasets

mod dataset;
mod export;
mod locator;
mod series;
mod shared;
mod view;

#[cfg(test)]
mod tests;

pub use dataset::{Dataset, Record};
pub use export::ColumnValue;
pub use locator::{Bound, Locator};
pub use series::{Point, TimeSeries};
pub use shared::{SharedDataset, UpdateGate};
pub use view::{RowView, SeriesView};

/// Label of the synthetic timestamp column that leads every dataset
pub const DATETIME_LABEL: &str = "DATETIME";

/// Common error type for storage operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Lookup error: {0}")]
    Lookup(String),
    #[error("Name conflict: cannot merge series '{left}' and '{right}'")]
    NameConflict { left: String, right: String },
    #[error("Operation '{0}' requires full slicing capability")]
    CapabilityDisabled(&'static str),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
}

/// What a series keeps indexed.
///
/// `AppendOnly` skips the timestamp index: points can be appended, the
/// timestamp at a position can be read and the whole store can be exported,
/// but timestamp lookups and slicing are refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    #[default]
    FullSlicing,
    AppendOnly,
}

/// Configuration for datasets
#[derive(Clone, Debug, Default)]
pub struct DatasetConfig {
    pub capability: Capability,
}
