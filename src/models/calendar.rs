//! Calendar day ranges.
//!
//! # Day Model
//! All ranges are inclusive on both ends and measured in whole calendar
//! days (`NaiveDate`). Weekdays are numbered 0 = Sunday .. 6 = Saturday.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days [from, to].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub from: NaiveDate,
    /// Last day (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a new range. No ordering check is made; see [`is_empty`](Self::is_empty).
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether `to` lies before `from`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// Number of days covered (0 when empty).
    pub fn len_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.to - self.from).num_days() + 1
        }
    }

    /// Whether a day falls within the range.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Overlap of two ranges, or `None` if they do not intersect.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let range = Self::new(self.from.max(other.from), self.to.min(other.to));
        (!range.is_empty()).then_some(range)
    }

    /// Iterates every day in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from
            .iter_days()
            .take_while(move |d| *d <= self.to)
    }
}

/// Weekday number of a date, 0 = Sunday .. 6 = Saturday.
#[inline]
pub(crate) fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
