//! Beautiful date classification.
//!
//! A date is beautiful when at least one of eleven numerological predicates
//! holds over its day, month, year and DDMMYYYY digit string. The reported
//! reason is the first predicate that matches in the configured [`RuleOrder`].

use serde::{Deserialize, Serialize};

use crate::digits::{DateDigits, last_two_digits};
use crate::{BeautyReason, CalendarDate, FEBRUARY, FEBRUARY_DAYS_LEAP, ParseError};

/// Evaluation order of the predicates.
///
/// Under [`RuleOrder::Legacy`] "All digits are identical" never comes first
/// (such a string is always a palindrome) and neither does "Perfect match"
/// ("Day equals Month" holds whenever it does). Both stay in the predicate set,
/// so `is_beautiful` does not depend on the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    #[default]
    Legacy,
    MostSpecificFirst,
}

impl RuleOrder {
    pub const fn reasons(self) -> &'static [BeautyReason] {
        match self {
            Self::Legacy => &BeautyReason::LEGACY_ORDER,
            Self::MostSpecificFirst => &BeautyReason::MOST_SPECIFIC_FIRST_ORDER,
        }
    }
}

/// Settings a host application may load from its own configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub order: RuleOrder,
}

/// Outcome of classifying one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VerdictRepr", into = "VerdictRepr")]
pub struct BeautyVerdict {
    reason: Option<BeautyReason>,
}

impl BeautyVerdict {
    pub const NOT_BEAUTIFUL: Self = Self { reason: None };

    /// Verdict for a date the user flagged as notable.
    pub const fn custom() -> Self {
        Self {
            reason: Some(BeautyReason::Custom),
        }
    }

    pub const fn is_beautiful(&self) -> bool {
        self.reason.is_some()
    }

    pub const fn reason(&self) -> Option<BeautyReason> {
        self.reason
    }

    /// The reason label, or an empty string when nothing matched.
    pub fn label(&self) -> &'static str {
        self.reason.map_or("", BeautyReason::label)
    }
}

#[derive(Serialize, Deserialize)]
struct VerdictRepr {
    is_beautiful: bool,
    reason: Option<BeautyReason>,
}

impl From<BeautyVerdict> for VerdictRepr {
    fn from(verdict: BeautyVerdict) -> Self {
        Self {
            is_beautiful: verdict.is_beautiful(),
            reason: verdict.reason,
        }
    }
}

impl TryFrom<VerdictRepr> for BeautyVerdict {
    type Error = ParseError;

    fn try_from(repr: VerdictRepr) -> Result<Self, Self::Error> {
        if repr.is_beautiful != repr.reason.is_some() {
            return Err(ParseError::InvalidFormat(format!(
                "is_beautiful = {} contradicts reason {}",
                repr.is_beautiful,
                repr.reason.map_or("null", BeautyReason::label)
            )));
        }
        Ok(Self {
            reason: repr.reason,
        })
    }
}

/// Quantities every predicate reads, computed once per date.
#[derive(Debug, Clone, Copy)]
struct Facts {
    digits: DateDigits,
    day: i32,
    month: i32,
    year_suffix: i32,
}

impl Facts {
    fn of(date: &CalendarDate) -> Self {
        Self {
            digits: date.digits(),
            day: i32::from(date.day()),
            month: i32::from(date.month()),
            year_suffix: last_two_digits(date.year()),
        }
    }

    fn holds(&self, reason: BeautyReason) -> bool {
        match reason {
            BeautyReason::Palindrome => self.digits.is_palindrome(),
            BeautyReason::AllDigitsIdentical => self.digits.all_identical(),
            BeautyReason::RepeatingPairs => self.digits.has_repeating_pairs(),
            BeautyReason::LeapDay => {
                self.day == i32::from(FEBRUARY_DAYS_LEAP) && self.month == i32::from(FEBRUARY)
            }
            BeautyReason::DayEqualsMonth => self.day == self.month,
            BeautyReason::DayEqualsYearSuffix => self.day == self.year_suffix,
            BeautyReason::MonthEqualsYearSuffix => self.month == self.year_suffix,
            BeautyReason::DayPlusMonthEqualsYearSuffix => {
                self.day + self.month == self.year_suffix
            }
            BeautyReason::Ascending => self.digits.is_ascending(),
            BeautyReason::Descending => self.digits.is_descending(),
            BeautyReason::PerfectMatch => {
                self.day == self.month && self.month == self.year_suffix
            }
            BeautyReason::Custom => false,
        }
    }
}

/// Stateless classifier; cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub const fn with_order(order: RuleOrder) -> Self {
        Self::new(ClassifierConfig { order })
    }

    pub const fn config(&self) -> ClassifierConfig {
        self.config
    }

    /// Evaluates the predicates once, yielding both the verdict and its reason.
    pub fn classify(&self, date: &CalendarDate) -> BeautyVerdict {
        let facts = Facts::of(date);
        let reason = self
            .config
            .order
            .reasons()
            .iter()
            .copied()
            .find(|&reason| facts.holds(reason));

        log::trace!(
            "{date} ({}) -> {}",
            facts.digits,
            reason.map_or("not beautiful", BeautyReason::label)
        );
        BeautyVerdict { reason }
    }

    pub fn is_beautiful(&self, date: &CalendarDate) -> bool {
        self.classify(date).is_beautiful()
    }

    /// First matching reason, `None` iff the date is not beautiful.
    pub fn beauty_reason(&self, date: &CalendarDate) -> Option<BeautyReason> {
        self.classify(date).reason()
    }

    /// Label for display. User-defined dates always read "Custom Date";
    /// otherwise the first matching label, or an empty string.
    pub fn beauty_reason_label(&self, date: &CalendarDate, is_user_defined: bool) -> String {
        if is_user_defined {
            return BeautyReason::Custom.label().to_owned();
        }
        self.classify(date).label().to_owned()
    }

    /// Every predicate that holds, in evaluation order.
    pub fn matching_reasons(&self, date: &CalendarDate) -> Vec<BeautyReason> {
        let facts = Facts::of(date);
        self.config
            .order
            .reasons()
            .iter()
            .copied()
            .filter(|&reason| facts.holds(reason))
            .collect()
    }
}

/// [`Classifier::classify`] with the default configuration.
pub fn classify(date: &CalendarDate) -> BeautyVerdict {
    Classifier::default().classify(date)
}

/// [`Classifier::is_beautiful`] with the default configuration.
pub fn is_beautiful(date: &CalendarDate) -> bool {
    Classifier::default().is_beautiful(date)
}

/// [`Classifier::beauty_reason`] with the default configuration.
pub fn beauty_reason(date: &CalendarDate) -> Option<BeautyReason> {
    Classifier::default().beauty_reason(date)
}

/// [`Classifier::beauty_reason_label`] with the default configuration.
pub fn beauty_reason_label(date: &CalendarDate, is_user_defined: bool) -> String {
    Classifier::default().beauty_reason_label(date, is_user_defined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("test date should be valid")
    }

    #[test]
    fn test_first_match_cases() {
        struct TestCase {
            date: CalendarDate,
            expected: Option<BeautyReason>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date: date(2020, 2, 2),
                expected: Some(BeautyReason::Palindrome),
                description: "02022020 reads the same backward",
            },
            TestCase {
                date: date(1111, 11, 11),
                expected: Some(BeautyReason::Palindrome),
                description: "identical digits are also a palindrome, which is checked first",
            },
            TestCase {
                date: date(1212, 12, 12),
                expected: Some(BeautyReason::RepeatingPairs),
                description: "12121212",
            },
            TestCase {
                date: date(2024, 2, 29),
                expected: Some(BeautyReason::LeapDay),
                description: "leap day with no earlier digit rule",
            },
            TestCase {
                date: date(2092, 2, 29),
                expected: Some(BeautyReason::Palindrome),
                description: "29022092 is a palindrome, so it wins over the leap day",
            },
            TestCase {
                date: date(2023, 5, 5),
                expected: Some(BeautyReason::DayEqualsMonth),
                description: "day 5 equals month 5",
            },
            TestCase {
                date: date(2023, 4, 23),
                expected: Some(BeautyReason::DayEqualsYearSuffix),
                description: "day 23 equals year suffix 23",
            },
            TestCase {
                date: date(2007, 7, 15),
                expected: Some(BeautyReason::MonthEqualsYearSuffix),
                description: "month 7 equals year suffix 07",
            },
            TestCase {
                date: date(2015, 5, 10),
                expected: Some(BeautyReason::DayPlusMonthEqualsYearSuffix),
                description: "10 + 5 equals 15",
            },
            TestCase {
                date: date(2007, 7, 7),
                expected: Some(BeautyReason::DayEqualsMonth),
                description: "perfect match is shadowed by day equals month",
            },
            TestCase {
                date: date(1996, 7, 3),
                expected: None,
                description: "03071996 matches nothing",
            },
        ];

        let classifier = Classifier::default();
        for case in &cases {
            let verdict = classifier.classify(&case.date);
            assert_eq!(
                verdict.reason(),
                case.expected,
                "{} ({})",
                case.date,
                case.description
            );
            assert_eq!(verdict.is_beautiful(), case.expected.is_some());
        }
    }

    #[test]
    fn test_free_functions_agree() {
        for d in [date(2020, 2, 2), date(1996, 7, 3), date(2024, 2, 29), date(1900, 1, 1)] {
            assert_eq!(is_beautiful(&d), beauty_reason(&d).is_some(), "{d}");
            assert_eq!(classify(&d).reason(), beauty_reason(&d), "{d}");
        }
    }

    #[test]
    fn test_year_suffix_wraps_for_any_year() {
        // 1900 -> suffix 00, no day or month is zero
        assert_eq!(beauty_reason(&date(1900, 3, 1)), None);
        // 2105 -> suffix 05
        assert_eq!(
            beauty_reason(&date(2105, 5, 30)),
            Some(BeautyReason::MonthEqualsYearSuffix)
        );
        // Year outside the usual picker range still classifies
        assert_eq!(
            beauty_reason(&date(12_023, 4, 23)),
            Some(BeautyReason::DayEqualsYearSuffix)
        );
    }

    #[test]
    fn test_label_for_user_defined_dates() {
        let plain = date(1996, 7, 3);
        assert_eq!(beauty_reason_label(&plain, true), "Custom Date");
        assert_eq!(beauty_reason_label(&plain, false), "");

        let palindrome = date(2020, 2, 2);
        assert_eq!(beauty_reason_label(&palindrome, true), "Custom Date");
        assert_eq!(beauty_reason_label(&palindrome, false), "Palindrome");
    }

    #[test]
    fn test_matching_reasons_lists_shadowed_predicates() {
        let reasons = Classifier::default().matching_reasons(&date(1111, 11, 11));
        assert_eq!(
            reasons,
            vec![
                BeautyReason::Palindrome,
                BeautyReason::AllDigitsIdentical,
                BeautyReason::RepeatingPairs,
                BeautyReason::DayEqualsMonth,
                BeautyReason::DayEqualsYearSuffix,
                BeautyReason::MonthEqualsYearSuffix,
                BeautyReason::PerfectMatch,
            ]
        );

        assert!(Classifier::default().matching_reasons(&date(1996, 7, 3)).is_empty());
    }

    #[test]
    fn test_most_specific_first_order() {
        let classifier = Classifier::with_order(RuleOrder::MostSpecificFirst);
        assert_eq!(
            classifier.beauty_reason(&date(1111, 11, 11)),
            Some(BeautyReason::AllDigitsIdentical)
        );
        assert_eq!(
            classifier.beauty_reason(&date(2007, 7, 7)),
            Some(BeautyReason::PerfectMatch)
        );
        assert_eq!(
            classifier.beauty_reason(&date(2020, 2, 2)),
            Some(BeautyReason::Palindrome)
        );
        assert_eq!(classifier.beauty_reason(&date(1996, 7, 3)), None);
    }

    #[test]
    fn test_order_does_not_change_is_beautiful() {
        let legacy = Classifier::default();
        let specific = Classifier::with_order(RuleOrder::MostSpecificFirst);
        let mut current = date(1999, 1, 1);
        let end = date(2001, 12, 31);
        while current <= end {
            assert_eq!(
                legacy.is_beautiful(&current),
                specific.is_beautiful(&current),
                "{current}"
            );
            current = current.next_day().expect("no overflow near year 2000");
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let d = date(2024, 2, 29);
        assert_eq!(classify(&d), classify(&d));
        assert_eq!(beauty_reason_label(&d, false), beauty_reason_label(&d, false));
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<Classifier>();
        assert_send_sync::<BeautyVerdict>();
    }

    #[test]
    fn test_config_deserialize() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{"order":"most_specific_first"}"#).expect("valid config");
        assert_eq!(config.order, RuleOrder::MostSpecificFirst);

        let config: ClassifierConfig = serde_json::from_str("{}").expect("empty config uses defaults");
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.order, RuleOrder::Legacy);

        assert!(serde_json::from_str::<ClassifierConfig>(r#"{"order":"random"}"#).is_err());
    }

    #[test]
    fn test_verdict_serde() {
        let verdict = classify(&date(2020, 2, 2));
        let json = serde_json::to_string(&verdict).expect("failed to serialize verdict");
        assert_eq!(json, r#"{"is_beautiful":true,"reason":"Palindrome"}"#);

        let json = serde_json::to_string(&BeautyVerdict::NOT_BEAUTIFUL).expect("failed to serialize verdict");
        assert_eq!(json, r#"{"is_beautiful":false,"reason":null}"#);

        let parsed: BeautyVerdict =
            serde_json::from_str(r#"{"is_beautiful":true,"reason":"Custom Date"}"#).expect("valid verdict");
        assert_eq!(parsed, BeautyVerdict::custom());
        assert_eq!(parsed.label(), "Custom Date");

        let parsed: BeautyVerdict =
            serde_json::from_str(r#"{"is_beautiful":false,"reason":null}"#).expect("valid verdict");
        assert_eq!(parsed, BeautyVerdict::NOT_BEAUTIFUL);
    }

    #[test]
    fn test_verdict_deserialize_rejects_contradictions() {
        for json in [
            r#"{"is_beautiful":false,"reason":"Palindrome"}"#,
            r#"{"is_beautiful":true,"reason":null}"#,
        ] {
            let err = serde_json::from_str::<BeautyVerdict>(json).expect_err("contradictory verdict");
            assert!(err.to_string().contains("contradicts"), "{json}: {err}");
        }
    }
}
