use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use super::locator::{resolve_index, resolve_slice_position};
use super::view::SeriesView;
use super::{Bound, Capability, Error, Locator};

/// A single stored observation
#[derive(Clone, Debug, PartialEq)]
pub struct Point<V> {
    pub timestamp: NaiveDateTime,
    pub value: V,
}

/// One chronological variable.
///
/// Points live in an append-only arena in arrival order, which doubles as the
/// position -> timestamp side of the index. The timestamp -> position side is
/// a hash map, absent when the series is [`Capability::AppendOnly`].
#[derive(Clone, Debug)]
pub struct TimeSeries<V> {
    name: Option<String>,
    points: Vec<Point<V>>,
    positions: Option<HashMap<NaiveDateTime, usize>>,
}

impl<V> TimeSeries<V> {
    pub fn new(name: &str) -> Self {
        Self::with_capability(name, Capability::FullSlicing)
    }

    pub fn with_capability(name: &str, capability: Capability) -> Self {
        Self::build(Some(name.to_lowercase()), capability)
    }

    /// A series without a name, e.g. a contribution to [`TimeSeries::merge`]
    pub fn anonymous() -> Self {
        Self::build(None, Capability::FullSlicing)
    }

    fn build(name: Option<String>, capability: Capability) -> Self {
        let positions = match capability {
            Capability::FullSlicing => Some(HashMap::new()),
            Capability::AppendOnly => None,
        };
        Self {
            name,
            points: Vec::new(),
            positions,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn capability(&self) -> Capability {
        if self.positions.is_some() {
            Capability::FullSlicing
        } else {
            Capability::AppendOnly
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat read-only access to every stored point in arrival order
    pub fn points(&self) -> &[Point<V>] {
        &self.points
    }

    /// Appends `(timestamp, value)` rows in argument order.
    ///
    /// A timestamp already present, or repeated inside `rows`, rejects the
    /// whole batch and leaves the series untouched.
    pub fn append<I>(&mut self, rows: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (NaiveDateTime, V)>,
    {
        let rows: Vec<(NaiveDateTime, V)> = rows.into_iter().collect();
        self.check_new_timestamps(rows.iter().map(|(ts, _)| *ts))?;
        self.push_unchecked(rows);
        Ok(())
    }

    /// Verifies that none of `timestamps` would break index uniqueness.
    pub(crate) fn check_new_timestamps<I>(&self, timestamps: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let Some(positions) = &self.positions else {
            return Ok(());
        };

        let mut batch = HashSet::new();
        for ts in timestamps {
            if positions.contains_key(&ts) || !batch.insert(ts) {
                return Err(Error::Validation(format!(
                    "{}: duplicate timestamp {}",
                    self.display_name(),
                    ts
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn push_unchecked(&mut self, rows: Vec<(NaiveDateTime, V)>) {
        self.points.reserve(rows.len());
        for (timestamp, value) in rows {
            if let Some(positions) = self.positions.as_mut() {
                positions.insert(timestamp, self.points.len());
            }
            self.points.push(Point { timestamp, value });
        }
    }

    pub fn at(&self, locator: impl Into<Locator>) -> Result<&V, Error> {
        let pos = self.locate(locator.into())?;
        Ok(&self.points[pos].value)
    }

    /// Timestamp stored at `pos`; negative positions count from the end.
    pub fn timestamp_at(&self, pos: isize) -> Result<NaiveDateTime, Error> {
        let idx = resolve_index(pos, self.points.len())?;
        Ok(self.points[idx].timestamp)
    }

    pub fn position_of(&self, ts: NaiveDateTime) -> Result<usize, Error> {
        let positions = self
            .positions
            .as_ref()
            .ok_or(Error::CapabilityDisabled("timestamp lookup"))?;
        positions
            .get(&ts)
            .copied()
            .ok_or_else(|| Error::Lookup(format!("{}: no value at {}", self.display_name(), ts)))
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.first().map(|p| p.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.last().map(|p| p.timestamp)
    }

    /// Returns the points between `start` (inclusive) and `stop` (exclusive).
    pub fn slice(
        &self,
        start: impl Into<Bound>,
        stop: impl Into<Bound>,
    ) -> Result<SeriesView<'_, V>, Error> {
        if self.positions.is_none() {
            return Err(Error::CapabilityDisabled("slice"));
        }
        let (start, stop) = self.resolve_range(start.into(), stop.into())?;
        Ok(SeriesView::new(&self.points[start..stop.max(start)]))
    }

    /// Everything up to `stop`
    pub fn slice_to(&self, stop: impl Into<Bound>) -> Result<SeriesView<'_, V>, Error> {
        self.slice(Bound::Unbounded, stop)
    }

    pub(crate) fn locate(&self, locator: Locator) -> Result<usize, Error> {
        if self.positions.is_none() {
            return Err(Error::CapabilityDisabled("indexed access"));
        }
        match locator {
            Locator::Position(pos) => resolve_index(pos, self.points.len()),
            Locator::Time(ts) => self.position_of(ts),
        }
    }

    pub(crate) fn resolve_range(&self, start: Bound, stop: Bound) -> Result<(usize, usize), Error> {
        let start = match start {
            Bound::Unbounded => 0,
            Bound::At(loc) => self.resolve_bound(loc)?,
        };
        let stop = match stop {
            Bound::Unbounded => self.points.len(),
            Bound::At(loc) => self.resolve_bound(loc)?,
        };
        Ok((start, stop))
    }

    fn resolve_bound(&self, locator: Locator) -> Result<usize, Error> {
        match locator {
            Locator::Position(pos) => resolve_slice_position(pos, self.points.len()),
            Locator::Time(ts) => self.position_of(ts),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl<V: Clone> TimeSeries<V> {
    /// Combines this series with `other` into a new series ordered by timestamp.
    ///
    /// Equal timestamps keep their relative order (this series first), which
    /// then fails the uniqueness check of the result.
    pub fn merge(&self, other: &TimeSeries<V>) -> Result<TimeSeries<V>, Error> {
        let name = merged_name(self.name.as_deref(), other.name.as_deref())?;
        let contribution = other.points.iter().map(|p| (p.timestamp, p.value.clone()));
        self.merge_into(name, contribution)
    }

    /// Same as [`TimeSeries::merge`] with an anonymous contribution
    pub fn merge_points<I>(&self, points: I) -> Result<TimeSeries<V>, Error>
    where
        I: IntoIterator<Item = (NaiveDateTime, V)>,
    {
        self.merge_into(self.name.clone(), points)
    }

    fn merge_into<I>(&self, name: Option<String>, contribution: I) -> Result<TimeSeries<V>, Error>
    where
        I: IntoIterator<Item = (NaiveDateTime, V)>,
    {
        let mut rows: Vec<(NaiveDateTime, V)> = self
            .points
            .iter()
            .map(|p| (p.timestamp, p.value.clone()))
            .chain(contribution)
            .collect();
        rows.sort_by_key(|(ts, _)| *ts);

        let mut merged = TimeSeries::build(name, self.capability());
        merged.append(rows)?;
        Ok(merged)
    }
}

fn merged_name(left: Option<&str>, right: Option<&str>) -> Result<Option<String>, Error> {
    match (left, right) {
        (Some(l), Some(r)) if l == r => Ok(Some(l.to_string())),
        (Some(l), Some(r)) => Err(Error::NameConflict {
            left: l.to_string(),
            right: r.to_string(),
        }),
        (Some(name), None) | (None, Some(name)) => Ok(Some(name.to_string())),
        (None, None) => Ok(None),
    }
}
