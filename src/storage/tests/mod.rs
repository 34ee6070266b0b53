pub mod dataset;
pub mod shared;
pub mod slicing;

use super::*;
use chrono::{NaiveDate, NaiveDateTime};

/// 2011-07-21 10:00:00 plus `secs` seconds
pub fn ts(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2011, 7, 21)
        .unwrap()
        .and_hms_opt(10, secs / 60, secs % 60)
        .unwrap()
}

pub fn test_series(name: &str, n: u32) -> TimeSeries<f64> {
    let mut series = TimeSeries::new(name);
    series
        .append((0..n).map(|i| (ts(i), i as f64 * 1.5)))
        .unwrap();
    series
}

pub fn test_dataset(rows: u32) -> Dataset<f64> {
    let mut dataset = Dataset::new(&["ozone", "CO2", "temp"]).unwrap();
    dataset
        .add_data((0..rows).map(|i| Record::new(ts(i), vec![i as f64, i as f64 * 10.0, -(i as f64)])))
        .unwrap();
    dataset
}
