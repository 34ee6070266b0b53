use chrono::{NaiveDate, NaiveDateTime};

use super::{Error, RawRow, SPLIT_TIME_LABELS};
use crate::storage::{DATETIME_LABEL, Record};

/// Layouts accepted for the leading time columns of a label row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeConvention {
    /// `YEAR,MONTH,DAY,HOUR,MINUTE,SECOND` as six integer columns
    SplitFields,
    /// `DATE,UTC` with the date written year-day-month (`2011-21-07`)
    /// and the time as `HH:MM:SS`
    DateUtc,
}

impl TimeConvention {
    pub const DATE_UTC_FORMAT: &'static str = "%Y-%d-%m %H:%M:%S";

    pub fn detect<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        let leading: Vec<&str> = labels.iter().map(AsRef::as_ref).collect();
        if leading.starts_with(&SPLIT_TIME_LABELS) {
            Some(TimeConvention::SplitFields)
        } else if leading.starts_with(&["DATE", "UTC"]) {
            Some(TimeConvention::DateUtc)
        } else {
            None
        }
    }

    /// Number of label columns the convention consumes
    pub fn width(self) -> usize {
        match self {
            TimeConvention::SplitFields => SPLIT_TIME_LABELS.len(),
            TimeConvention::DateUtc => 2,
        }
    }

    pub fn timestamp(self, cells: &[String]) -> Result<NaiveDateTime, String> {
        match self {
            TimeConvention::SplitFields => split_fields_timestamp(cells),
            TimeConvention::DateUtc => {
                let text = format!("{} {}", cells[0].trim(), cells[1].trim());
                NaiveDateTime::parse_from_str(&text, Self::DATE_UTC_FORMAT)
                    .map_err(|e| format!("'{}' is not a {} timestamp: {}", text, Self::DATE_UTC_FORMAT, e))
            }
        }
    }
}

fn split_fields_timestamp(cells: &[String]) -> Result<NaiveDateTime, String> {
    let mut fields = [0u32; 6];
    for ((field, cell), label) in fields.iter_mut().zip(cells).zip(SPLIT_TIME_LABELS) {
        *field = cell
            .trim()
            .parse()
            .map_err(|_| format!("{} value '{}' is not an unsigned integer", label, cell))?;
    }
    let [year, month, day, hour, minute, second] = fields;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| format!("{:?} is not a valid date and time", fields))
}

/// Collapses the leading time columns into one timestamp per row.
///
/// The returned labels start with `DATETIME`; the remaining columns are
/// passed through untouched.
pub fn normalize_time_columns<S: AsRef<str>>(
    labels: &[S],
    rows: &[RawRow],
) -> Result<(Vec<String>, Vec<Record<String>>), Error> {
    let convention = TimeConvention::detect(labels).ok_or_else(|| {
        Error::UnknownTimeColumns(labels.iter().take(6).map(|l| l.as_ref().to_string()).collect())
    })?;
    let width = convention.width();

    let normalized = std::iter::once(DATETIME_LABEL.to_string())
        .chain(labels[width..].iter().map(|l| l.as_ref().to_string()))
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            if row.cells.len() != labels.len() {
                return Err(Error::format(
                    row.line,
                    format!("{} fields for {} labels", row.cells.len(), labels.len()),
                ));
            }
            let timestamp = convention
                .timestamp(&row.cells[..width])
                .map_err(|reason| Error::format(row.line, reason))?;
            Ok(Record::new(timestamp, row.cells[width..].to_vec()))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    log::debug!("normalized {} rows using {:?}", records.len(), convention);
    Ok((normalized, records))
}
