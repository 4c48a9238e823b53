/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Longest possible month, used for context-free day validation
pub const MAX_DAY: u8 = 31;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Number of digits in the DDMMYYYY encoding
pub const DIGIT_COUNT: usize = 8;
/// Modulus applied to the year before it is written as four digits
pub const YEAR_DIGITS_MODULUS: i32 = 10_000;
/// Modulus yielding the last two digits of a year
pub const LAST_TWO_DIGITS_MODULUS: i32 = 100;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Day-first separator (DD.MM.YYYY)
pub const DAY_FIRST_SEPARATOR: char = '.';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
