use chrono::NaiveDateTime;

use super::{Point, TimeSeries};

/// Borrowed, read-only window over a run of points of one series.
///
/// Iterating a view never consumes it, so the same view can be walked any
/// number of times.
#[derive(Debug)]
pub struct SeriesView<'a, V> {
    points: &'a [Point<V>],
}

impl<V> Clone for SeriesView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for SeriesView<'_, V> {}

impl<'a, V> SeriesView<'a, V> {
    pub(crate) fn new(points: &'a [Point<V>]) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &'a [Point<V>] {
        self.points
    }

    pub fn values(self) -> impl Iterator<Item = &'a V> {
        self.points.iter().map(|p| &p.value)
    }

    pub fn with_time(self) -> impl Iterator<Item = (NaiveDateTime, &'a V)> {
        self.points.iter().map(|p| (p.timestamp, &p.value))
    }

    pub fn timestamps(self) -> impl Iterator<Item = NaiveDateTime> + 'a {
        self.points.iter().map(|p| p.timestamp)
    }
}

impl<V: Clone> SeriesView<'_, V> {
    pub fn to_vec(&self) -> Vec<V> {
        self.values().cloned().collect()
    }
}

/// Borrowed window over a run of aligned rows of a dataset.
#[derive(Debug)]
pub struct RowView<'a, V> {
    series: &'a [TimeSeries<V>],
    start: usize,
    stop: usize,
}

impl<V> Clone for RowView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for RowView<'_, V> {}

impl<'a, V> RowView<'a, V> {
    pub(crate) fn new(series: &'a [TimeSeries<V>], start: usize, stop: usize) -> Self {
        Self {
            series,
            start,
            stop: stop.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// One tuple of values per row, variables in dataset order
    pub fn rows(self) -> impl Iterator<Item = Vec<&'a V>> {
        let series = self.series;
        (self.start..self.stop).map(move |pos| row_values(series, pos))
    }

    /// Same as [`RowView::rows`] prefixed with the row timestamp
    pub fn rows_with_time(self) -> impl Iterator<Item = (NaiveDateTime, Vec<&'a V>)> {
        let series = self.series;
        (self.start..self.stop).map(move |pos| (series[0].points()[pos].timestamp, row_values(series, pos)))
    }
}

pub(crate) fn row_values<V>(series: &[TimeSeries<V>], pos: usize) -> Vec<&V> {
    series.iter().map(|s| &s.points()[pos].value).collect()
}
