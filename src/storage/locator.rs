use chrono::NaiveDateTime;

use super::Error;

/// Addresses a single point either by arrival position or by timestamp.
///
/// Negative positions count back from the current end, so `-1` is the most
/// recently appended point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator {
    Position(isize),
    Time(NaiveDateTime),
}

/// One end of a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Bound {
    #[default]
    Unbounded,
    At(Locator),
}

impl From<isize> for Locator {
    fn from(pos: isize) -> Self {
        Locator::Position(pos)
    }
}

impl From<i32> for Locator {
    fn from(pos: i32) -> Self {
        Locator::Position(pos as isize)
    }
}

impl From<i64> for Locator {
    fn from(pos: i64) -> Self {
        Locator::Position(pos as isize)
    }
}

impl From<usize> for Locator {
    fn from(pos: usize) -> Self {
        Locator::Position(pos as isize)
    }
}

impl From<NaiveDateTime> for Locator {
    fn from(ts: NaiveDateTime) -> Self {
        Locator::Time(ts)
    }
}

macro_rules! bound_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Bound {
                fn from(value: $ty) -> Self {
                    Bound::At(value.into())
                }
            }
        )*
    };
}

bound_from!(isize, i32, i64, usize, NaiveDateTime, Locator);

impl Bound {
    pub fn from_option<T: Into<Locator>>(value: Option<T>) -> Self {
        value.map_or(Bound::Unbounded, |v| Bound::At(v.into()))
    }
}

/// Resolves a position against `len` for element access (`0..len`).
pub(crate) fn resolve_index(pos: isize, len: usize) -> Result<usize, Error> {
    let resolved = wrap(pos, len);
    match resolved {
        Some(idx) if idx < len => Ok(idx),
        _ => Err(Error::Lookup(format!(
            "position {} out of range for length {}",
            pos, len
        ))),
    }
}

/// Resolves a position against `len` for slicing, where `len` itself is valid.
pub(crate) fn resolve_slice_position(pos: isize, len: usize) -> Result<usize, Error> {
    match wrap(pos, len) {
        Some(idx) if idx <= len => Ok(idx),
        _ => Err(Error::Lookup(format!(
            "slice bound {} out of range for length {}",
            pos, len
        ))),
    }
}

fn wrap(pos: isize, len: usize) -> Option<usize> {
    if pos < 0 {
        len.checked_sub(pos.unsigned_abs())
    } else {
        Some(pos as usize)
    }
}
