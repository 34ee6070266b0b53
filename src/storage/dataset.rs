use std::collections::HashMap;
use std::fmt::Display;

use chrono::NaiveDateTime;

use super::view::{RowView, row_values};
use super::{Bound, Capability, DATETIME_LABEL, DatasetConfig, Error, Locator, TimeSeries};

/// One normalized data row: a timestamp and one value per variable
#[derive(Clone, Debug, PartialEq)]
pub struct Record<V> {
    pub timestamp: NaiveDateTime,
    pub values: Vec<V>,
}

impl<V> Record<V> {
    pub fn new(timestamp: NaiveDateTime, values: Vec<V>) -> Self {
        Self { timestamp, values }
    }
}

/// Ordered set of variables that are always advanced together.
///
/// The first variable is the time reference: row timestamps and timestamp
/// lookups go through its index.
#[derive(Clone, Debug)]
pub struct Dataset<V> {
    series: Vec<TimeSeries<V>>,
    by_name: HashMap<String, usize>,
    config: DatasetConfig,
}

impl<V> Dataset<V> {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, Error> {
        Self::with_config(names, DatasetConfig::default())
    }

    pub fn with_config<S: AsRef<str>>(names: &[S], config: DatasetConfig) -> Result<Self, Error> {
        let series = names
            .iter()
            .map(|name| TimeSeries::with_capability(name.as_ref(), config.capability))
            .collect();
        Self::assemble(series, config)
    }

    /// Builds a dataset around existing series, which must be named, share
    /// one capability and hold the same timestamps at the same positions.
    pub fn from_series(series: Vec<TimeSeries<V>>) -> Result<Self, Error> {
        let capability = match series.first() {
            Some(first) => first.capability(),
            None => Capability::FullSlicing,
        };
        if let Some(first) = series.first() {
            for s in &series[1..] {
                let name = s.name().unwrap_or("<anonymous>");
                if s.capability() != capability {
                    return Err(Error::Validation(format!(
                        "series '{}' is {:?}, expected {:?}",
                        name,
                        s.capability(),
                        capability
                    )));
                }
                if s.len() != first.len() {
                    return Err(Error::Validation(format!(
                        "series '{}' has {} points, expected {}",
                        name,
                        s.len(),
                        first.len()
                    )));
                }
                let misaligned = s
                    .points()
                    .iter()
                    .zip(first.points())
                    .position(|(a, b)| a.timestamp != b.timestamp);
                if let Some(pos) = misaligned {
                    return Err(Error::Validation(format!(
                        "series '{}' has {} at position {}, expected {}",
                        name,
                        s.points()[pos].timestamp,
                        pos,
                        first.points()[pos].timestamp
                    )));
                }
            }
        }
        Self::assemble(series, DatasetConfig { capability })
    }

    fn assemble(series: Vec<TimeSeries<V>>, config: DatasetConfig) -> Result<Self, Error> {
        if series.is_empty() {
            return Err(Error::Validation("a dataset needs at least one variable".into()));
        }

        let mut by_name = HashMap::with_capacity(series.len());
        for (idx, s) in series.iter().enumerate() {
            let name = s
                .name()
                .ok_or_else(|| Error::Validation("dataset variables must be named".into()))?;
            if by_name.insert(name.to_string(), idx).is_some() {
                return Err(Error::Validation(format!("duplicate variable '{}'", name)));
            }
        }

        Ok(Self {
            series,
            by_name,
            config,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().filter_map(|s| s.name()).collect()
    }

    /// `DATETIME` followed by every variable name
    pub fn labels(&self) -> Vec<String> {
        std::iter::once(DATETIME_LABEL.to_string())
            .chain(self.names().into_iter().map(str::to_string))
            .collect()
    }

    pub fn variable(&self, name: &str) -> Result<&TimeSeries<V>, Error> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.series[idx])
            .ok_or_else(|| Error::Lookup(format!("no variable named '{}'", name)))
    }

    pub fn series(&self) -> &[TimeSeries<V>] {
        &self.series
    }

    /// Distributes each record's values over the variables in order.
    ///
    /// Every record is checked before any variable grows, so a rejected batch
    /// leaves the dataset as it was.
    pub fn add_data<I>(&mut self, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Record<V>>,
    {
        let records: Vec<Record<V>> = records.into_iter().collect();
        if records.is_empty() {
            return Ok(());
        }

        let width = self.series.len();
        if let Some((row, record)) = records.iter().enumerate().find(|(_, r)| r.values.len() != width) {
            return Err(Error::Validation(format!(
                "row {} has {} values for {} variables",
                row,
                record.values.len(),
                width
            )));
        }
        for s in &self.series {
            s.check_new_timestamps(records.iter().map(|r| r.timestamp))?;
        }

        let mut columns: Vec<Vec<(NaiveDateTime, V)>> =
            (0..width).map(|_| Vec::with_capacity(records.len())).collect();
        for record in records {
            let timestamp = record.timestamp;
            for (column, value) in columns.iter_mut().zip(record.values) {
                column.push((timestamp, value));
            }
        }
        for (s, column) in self.series.iter_mut().zip(columns) {
            s.push_unchecked(column);
        }

        log::debug!("dataset now holds {} rows", self.len());
        Ok(())
    }

    pub fn row(&self, locator: impl Into<Locator>) -> Result<Vec<&V>, Error> {
        let pos = self.series[0].locate(locator.into())?;
        Ok(row_values(&self.series, pos))
    }

    pub fn row_with_time(&self, locator: impl Into<Locator>) -> Result<(NaiveDateTime, Vec<&V>), Error> {
        let pos = self.series[0].locate(locator.into())?;
        Ok((self.series[0].points()[pos].timestamp, row_values(&self.series, pos)))
    }

    pub fn row_slice(&self, start: impl Into<Bound>, stop: impl Into<Bound>) -> Result<RowView<'_, V>, Error> {
        if self.config.capability == Capability::AppendOnly {
            return Err(Error::CapabilityDisabled("row_slice"));
        }
        let (start, stop) = self.series[0].resolve_range(start.into(), stop.into())?;
        Ok(RowView::new(&self.series, start, stop))
    }

    /// Timestamp at the last position of `name`, `None` while it is empty
    pub fn last_timestamp(&self, name: &str) -> Result<Option<NaiveDateTime>, Error> {
        Ok(self.variable(name)?.last_timestamp())
    }
}

impl<V: Clone> Dataset<V> {
    /// Flat export of every row in arrival order
    pub fn to_records(&self) -> Vec<Record<V>> {
        (0..self.len())
            .map(|pos| Record {
                timestamp: self.series[0].points()[pos].timestamp,
                values: row_values(&self.series, pos).into_iter().cloned().collect(),
            })
            .collect()
    }
}

impl<V: Display> Dataset<V> {
    /// Lower-case CSV with the timestamp split into its six fields.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("year,month,day,hour,minute,second");
        for name in self.names() {
            out.push(',');
            out.push_str(name);
        }
        for pos in 0..self.len() {
            out.push('\n');
            let ts = self.series[0].points()[pos].timestamp;
            out.push_str(&ts.format("%Y,%m,%d,%H,%M,%S").to_string());
            for value in row_values(&self.series, pos) {
                out.push(',');
                out.push_str(&value.to_string());
            }
        }
        out
    }
}
