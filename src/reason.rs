use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ParseError, prelude::*};

/// Why a date counts as beautiful. Displays as the user-facing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BeautyReason {
    /// DDMMYYYY reads the same backward
    #[display(fmt = "Palindrome")]
    Palindrome,
    #[display(fmt = "All digits are identical")]
    AllDigitsIdentical,
    /// Four identical two-digit chunks
    #[display(fmt = "Repeating pairs")]
    RepeatingPairs,
    #[display(fmt = "29 February")]
    LeapDay,
    #[display(fmt = "Day equals Month")]
    DayEqualsMonth,
    #[display(fmt = "Day equals last two digits")]
    DayEqualsYearSuffix,
    #[display(fmt = "Month equals last two digits")]
    MonthEqualsYearSuffix,
    #[display(fmt = "Day + Month equals last two digits")]
    DayPlusMonthEqualsYearSuffix,
    #[display(fmt = "Ascending sequence")]
    Ascending,
    #[display(fmt = "Descending sequence")]
    Descending,
    /// Day, month and the year's last two digits all coincide
    #[display(fmt = "Perfect match")]
    PerfectMatch,
    /// Flagged by the user, no predicate involved
    #[display(fmt = "Custom Date")]
    Custom,
}

impl BeautyReason {
    /// Predicate reasons in their historical evaluation order.
    pub const LEGACY_ORDER: [Self; 11] = [
        Self::Palindrome,
        Self::AllDigitsIdentical,
        Self::RepeatingPairs,
        Self::LeapDay,
        Self::DayEqualsMonth,
        Self::DayEqualsYearSuffix,
        Self::MonthEqualsYearSuffix,
        Self::DayPlusMonthEqualsYearSuffix,
        Self::Ascending,
        Self::Descending,
        Self::PerfectMatch,
    ];

    /// Same predicates, narrower ones first so every label can be reported.
    pub const MOST_SPECIFIC_FIRST_ORDER: [Self; 11] = [
        Self::AllDigitsIdentical,
        Self::Palindrome,
        Self::RepeatingPairs,
        Self::LeapDay,
        Self::PerfectMatch,
        Self::DayEqualsMonth,
        Self::DayEqualsYearSuffix,
        Self::MonthEqualsYearSuffix,
        Self::DayPlusMonthEqualsYearSuffix,
        Self::Ascending,
        Self::Descending,
    ];

    /// The label shown to the user
    pub const fn label(self) -> &'static str {
        match self {
            Self::Palindrome => "Palindrome",
            Self::AllDigitsIdentical => "All digits are identical",
            Self::RepeatingPairs => "Repeating pairs",
            Self::LeapDay => "29 February",
            Self::DayEqualsMonth => "Day equals Month",
            Self::DayEqualsYearSuffix => "Day equals last two digits",
            Self::MonthEqualsYearSuffix => "Month equals last two digits",
            Self::DayPlusMonthEqualsYearSuffix => "Day + Month equals last two digits",
            Self::Ascending => "Ascending sequence",
            Self::Descending => "Descending sequence",
            Self::PerfectMatch => "Perfect match",
            Self::Custom => "Custom Date",
        }
    }

    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl FromStr for BeautyReason {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        Self::LEGACY_ORDER
            .into_iter()
            .chain([Self::Custom])
            .find(|reason| reason.label() == trimmed)
            .ok_or_else(|| ParseError::InvalidReason(trimmed.to_owned()))
    }
}

impl Serialize for BeautyReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for BeautyReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
