mod classifier;
mod consts;
mod digits;
mod prelude;
mod range;
mod reason;
mod types;

pub use classifier::{
    BeautyVerdict, Classifier, ClassifierConfig, RuleOrder, beauty_reason, beauty_reason_label,
    classify, is_beautiful,
};
pub use consts::*;
pub use digits::{DateDigits, last_two_digits};
pub use range::{BeautifulDates, DateRange, DateRangeIter, RangeError};
pub use reason::BeautyReason;
pub use types::{Day, Month, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// A civil calendar date: no time of day, no offset.
///
/// Month and day are validated against each other on construction; the year is
/// unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, "month.get()", "day.get()")]
pub struct CalendarDate {
    year: i32,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: i32 },
    #[display(fmt = "Unknown beauty reason: {_0}")]
    InvalidReason(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date, validating month and day-of-month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay`.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        let month_typed = Month::new(month)?;
        let day_typed = Day::new(day, year, month)?;
        Ok(Self {
            year,
            month: month_typed,
            day: day_typed,
        })
    }

    /// Creates a date from typed parts, re-checking the day against the month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that month.
    pub fn from_parts(year: i32, month: Month, day: Day) -> Result<Self, ParseError> {
        Self::new(year, month.get(), day.get())
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// `year mod 100`, wrapping for any year
    pub const fn last_two_digits_of_year(&self) -> i32 {
        last_two_digits(self.year)
    }

    /// The DDMMYYYY digit string
    pub const fn digits(&self) -> DateDigits {
        DateDigits::from_ymd(self.year, self.month.get(), self.day.get())
    }

    /// Days since 1970-01-01, negative before it
    pub const fn day_number(&self) -> i64 {
        types::days_from_civil(self.year, self.month, self.day)
    }

    /// Following calendar day. `None` only when the year would overflow.
    pub fn next_day(&self) -> Option<Self> {
        let (year, month, day) = (self.year, self.month(), self.day());
        let next = if day < self.month.days_in(year) {
            (year, month, day + 1)
        } else if month < DECEMBER {
            (year, month + 1, MIN_DAY)
        } else {
            (year.checked_add(1)?, JANUARY, MIN_DAY)
        };
        Self::new(next.0, next.1, next.2).ok()
    }

    /// Preceding calendar day. `None` only when the year would underflow.
    pub fn previous_day(&self) -> Option<Self> {
        let (year, month, day) = (self.year, self.month(), self.day());
        let previous = if day > MIN_DAY {
            (year, month, day - 1)
        } else if month > JANUARY {
            let earlier = Month::new(month - 1).ok()?;
            (year, earlier.get(), earlier.days_in(year))
        } else {
            (year.checked_sub(1)?, DECEMBER, DAYS_IN_MONTH[DECEMBER as usize])
        };
        Self::new(previous.0, previous.1, previous.2).ok()
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_dot = trimmed.contains(DAY_FIRST_SEPARATOR);
        // A leading '-' is a negative year sign, not a separator
        let has_hyphen = trimmed
            .strip_prefix(DATE_SEPARATOR)
            .unwrap_or(trimmed)
            .contains(DATE_SEPARATOR);

        if has_dot && has_hyphen {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {DAY_FIRST_SEPARATOR})"
            )));
        }

        if has_hyphen {
            Self::parse_iso(trimmed)
        } else if has_dot {
            Self::parse_day_first(trimmed)
        } else {
            Self::parse_compact(trimmed)
        }
    }
}

impl CalendarDate {
    fn parse_i32(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// `YYYY-MM-DD`, optionally with a leading minus on the year
    fn parse_iso(s: &str) -> Result<Self, ParseError> {
        let (sign, unsigned) = match s.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (-1, rest),
            None => (1, s),
        };
        let parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} components",
                parts.len()
            )));
        }

        let year = sign * Self::parse_i32(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;
        Self::new(year, month, day)
    }

    /// `DD.MM.YYYY`
    fn parse_day_first(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split(DAY_FIRST_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected DD{DAY_FIRST_SEPARATOR}MM{DAY_FIRST_SEPARATOR}YYYY, found {} components",
                parts.len()
            )));
        }

        let day = Self::parse_u8(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let year = Self::parse_i32(parts[2])?;
        Self::new(year, month, day)
    }

    /// Bare `DDMMYYYY`
    fn parse_compact(s: &str) -> Result<Self, ParseError> {
        let digits: DateDigits = s.parse()?;
        let [d0, d1, m0, m1, y0, y1, y2, y3] = digits.as_array();
        let year = [y0, y1, y2, y3]
            .into_iter()
            .fold(0i32, |acc, d| acc * 10 + i32::from(d));
        Self::new(year, m0 * 10 + m1, d0 * 10 + d1)
    }
}

impl TryFrom<(i32, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<CalendarDate> for (i32, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        (date.year, date.month(), date.day())
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let month = u8::try_from(date.month())
            .map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day =
            u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::new(date.year(), month, day)
    }
}

impl TryFrom<CalendarDate> for chrono::NaiveDate {
    type Error = ParseError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        Self::from_ymd_opt(date.year, u32::from(date.month()), u32::from(date.day()))
            .ok_or_else(|| ParseError::InvalidFormat(format!("{date} is outside chrono's range")))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
