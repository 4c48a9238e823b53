use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    BeautyReason, CalendarDate, Classifier, DECEMBER, JANUARY, MIN_DAY, ParseError,
    Month, RANGE_SEPARATOR, prelude::*,
};

/// An inclusive span of calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Every day of one month, as shown on a calendar page.
    ///
    /// # Errors
    /// Returns `RangeError::ParseError` if `month` is out of range.
    pub fn month(year: i32, month: u8) -> Result<Self, RangeError> {
        let month = Month::new(month)?;
        let start = CalendarDate::new(year, month.get(), MIN_DAY)?;
        let end = CalendarDate::new(year, month.get(), month.days_in(year))?;
        Self::new(start, end)
    }

    /// Every day of one year.
    ///
    /// # Errors
    /// Infallible for any `i32` year; kept fallible for symmetry with [`DateRange::month`].
    pub fn year(year: i32) -> Result<Self, RangeError> {
        let december = Month::new(DECEMBER)?;
        let start = CalendarDate::new(year, JANUARY, MIN_DAY)?;
        let end = CalendarDate::new(year, DECEMBER, december.days_in(year))?;
        Self::new(start, end)
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the range (never zero), computed from day numbers.
    pub const fn day_count(&self) -> u64 {
        days_between(self.start, self.end)
    }

    /// [`DateRange::day_count`] as `usize`, saturating where it does not fit.
    pub fn len(&self) -> usize {
        usize::try_from(self.day_count()).unwrap_or(usize::MAX)
    }

    /// Always false: a valid range holds at least its start date.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: Some(self.start),
            end:  self.end,
        }
    }

    /// Beautiful dates in calendar order, each with its first matching reason.
    pub fn beautiful_dates(&self, classifier: Classifier) -> BeautifulDates {
        log::debug!("scanning {self} for beautiful dates ({:?})", classifier.config().order);
        BeautifulDates {
            days: self.iter(),
            classifier,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = CalendarDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = CalendarDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Day-by-day walk over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<CalendarDate>,
    end:  CalendarDate,
}

impl Iterator for DateRangeIter {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current < self.end {
            self.next = current.next_day();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map_or(0, |next| days_between(next, self.end));
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for DateRangeIter {}

/// Inclusive day count from `start` to `end`; `start <= end`.
const fn days_between(start: CalendarDate, end: CalendarDate) -> u64 {
    (end.day_number() - start.day_number()).unsigned_abs() + 1
}

/// Iterator returned by [`DateRange::beautiful_dates`].
#[derive(Debug, Clone)]
pub struct BeautifulDates {
    days:       DateRangeIter,
    classifier: Classifier,
}

impl Iterator for BeautifulDates {
    type Item = (CalendarDate, BeautyReason);

    fn next(&mut self) -> Option<Self::Item> {
        let classifier = self.classifier;
        self.days
            .by_ref()
            .find_map(|date| classifier.beauty_reason(&date).map(|reason| (date, reason)))
    }
}

impl FusedIterator for BeautifulDates {}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
