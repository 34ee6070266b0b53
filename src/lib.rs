//! Time-indexed storage for aircraft instrument data.
//!
//! [`storage`] holds series and datasets addressable by position or
//! timestamp, [`format`] reads and writes the NRT text layout, and
//! [`schema`] turns `#!` header directives into SQL.

pub mod format;
pub mod schema;
pub mod storage;

pub use format::DataFile;
pub use schema::{SqlBatch, compile_header};
pub use storage::{Bound, Dataset, Locator, Record, SharedDataset, TimeSeries};
