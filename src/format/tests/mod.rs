pub mod round_trip;

use super::*;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

pub const SPLIT_BODY: &str = "YEAR,MONTH,DAY,HOUR,MINUTE,SECOND,CO,O3\n\
2011,07,21,10,31,47,101.5,33.2\n\
2011,07,21,10,31,48,101.7,33.1\n\
2011,07,21,10,31,49,101.6,-999\n";

pub const HEADER: &str = "# Flight RF04, near-real-time feed\n\
#! flt = ('COLUMNS',('id','integer',0),('note','text',1)) % (1,'ok')";

pub fn flight_text() -> String {
    format!("{}\n{}", HEADER, SPLIT_BODY)
}

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2011, 7, 21).unwrap().and_hms_opt(h, m, s).unwrap()
}

pub fn raw_rows(rows: &[&str]) -> Vec<RawRow> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| RawRow {
            line: idx + 2,
            cells: row.split(',').map(str::to_string).collect(),
        })
        .collect()
}
