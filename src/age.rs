//! Calendar-aware age calculation.
//!
//! An age is reported two ways:
//!   • a mixed-radix breakdown (years, months, days, hours, minutes, seconds)
//!     obtained by subtracting calendar fields with explicit borrow rules
//!   • cumulative totals (days, hours, minutes, seconds) floored from the
//!     exact elapsed duration
//!
//! The two only agree approximately, since years and months have variable
//! length while the totals use fixed-length units.
//!
//! Borrow rules for the calendar part, in order:
//!   1. day underflow borrows the length of the month preceding "now"'s month
//!   2. month underflow borrows 12 months from the years
//!
//! The clock fields are subtracted independently with wraparound and never
//! borrow from the day count.

use crate::clock::Clock;
use crate::i18n::{interpolate, Locale, LocaleStrings, NumberFormat};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::Serialize;
use tracing::debug;

const AVERAGE_DAYS_PER_YEAR: f64 = 365.2425;
const AVERAGE_DAYS_PER_MONTH: f64 = AVERAGE_DAYS_PER_YEAR / 12.0;

/// Elapsed time between a birth instant and an evaluation instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBreakdown {
    pub years: u32,
    /// 0..=11
    pub months: u32,
    /// 0..=30
    pub days: u32,
    /// 0..=23
    pub hours: u32,
    /// 0..=59
    pub minutes: u32,
    /// 0..=59
    pub seconds: u32,

    pub total_days: u64,
    pub total_hours: u64,
    pub total_minutes: u64,
    pub total_seconds: u64,
}

impl AgeBreakdown {
    /// Elapsed days implied by the mixed-radix fields, using average
    /// Gregorian year and month lengths.
    pub fn approximate_days(&self) -> f64 {
        f64::from(self.years) * AVERAGE_DAYS_PER_YEAR
            + f64::from(self.months) * AVERAGE_DAYS_PER_MONTH
            + f64::from(self.days)
            + f64::from(self.hours) / 24.0
            + f64::from(self.minutes) / 1_440.0
            + f64::from(self.seconds) / 86_400.0
    }

    /// Format the totals through a locale's grouping convention.
    pub fn localize(&self, locale: Locale) -> FormattedAgeBreakdown {
        format_breakdown(self, locale.number_format())
    }
}

/// [`AgeBreakdown`] with the totals rendered as grouped strings.
///
/// The mixed-radix fields stay plain integers for interpolation into
/// localized sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,

    pub total_days: String,
    pub total_hours: String,
    pub total_minutes: String,
    pub total_seconds: String,
}

/// Compute the age of `birth` as of `now`.
///
/// Calendar fields are read in `now`'s time zone. A `birth` after `now`
/// yields an all-zero breakdown.
///
/// # Arguments
/// * `birth` - The birth instant, in any time zone
/// * `now` - The evaluation instant; its zone decides the calendar fields
///
/// # Returns
/// The mixed-radix breakdown plus the elapsed totals floored per unit.
///
/// # Example
/// ```
/// use ageinfo::age::compute_age;
/// use chrono::{TimeZone, Utc};
///
/// let birth = Utc.with_ymd_and_hms(2000, 1, 31, 0, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2000, 3, 1, 0, 0, 0).unwrap();
/// let age = compute_age(&birth, &now);
/// assert_eq!((age.years, age.months, age.days), (0, 1, 1));
/// assert_eq!(age.total_days, 30);
/// ```
pub fn compute_age<Tz1: TimeZone, Tz2: TimeZone>(
    birth: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> AgeBreakdown {
    let elapsed_ms = now.timestamp_millis() - birth.timestamp_millis();
    if elapsed_ms < 0 {
        debug!(
            "Birth instant is {}ms after evaluation instant, clamping age to zero",
            -elapsed_ms
        );
        return AgeBreakdown::default();
    }

    // Each total is floored from the previous one
    let total_seconds = (elapsed_ms / 1000) as u64;
    let total_minutes = total_seconds / 60;
    let total_hours = total_minutes / 60;
    let total_days = total_hours / 24;

    let birth = birth.with_timezone(&now.timezone());
    let (years, months, days) = calendar_difference(birth.date_naive(), now.date_naive());

    AgeBreakdown {
        years,
        months,
        days,
        hours: wrap_difference(now.hour(), birth.hour(), 24),
        minutes: wrap_difference(now.minute(), birth.minute(), 60),
        seconds: wrap_difference(now.second(), birth.second(), 60),
        total_days,
        total_hours,
        total_minutes,
        total_seconds,
    }
}

/// Compute the age of `birth` as of the clock's current instant, read in
/// `birth`'s time zone.
pub fn compute_age_now<Tz: TimeZone>(birth: &DateTime<Tz>, clock: &dyn Clock) -> AgeBreakdown {
    let now = clock.now().with_timezone(&birth.timezone());
    compute_age(birth, &now)
}

/// Map the totals of `breakdown` through a grouping convention.
///
/// # Arguments
/// * `breakdown` - A computed age
/// * `format` - The locale's digit grouping (see [`Locale::number_format`])
///
/// # Returns
/// The same breakdown with the totals rendered as grouped strings. The
/// mixed-radix fields are passed through unchanged.
///
/// # Example
/// ```
/// use ageinfo::age::{format_breakdown, AgeBreakdown};
/// use ageinfo::i18n::Locale;
///
/// let age = AgeBreakdown {
///     total_days: 8766,
///     ..AgeBreakdown::default()
/// };
/// let formatted = format_breakdown(&age, Locale::INDONESIAN.number_format());
/// assert_eq!(formatted.total_days, "8.766");
/// ```
pub fn format_breakdown(breakdown: &AgeBreakdown, format: &NumberFormat) -> FormattedAgeBreakdown {
    FormattedAgeBreakdown {
        years: breakdown.years,
        months: breakdown.months,
        days: breakdown.days,
        hours: breakdown.hours,
        minutes: breakdown.minutes,
        seconds: breakdown.seconds,
        total_days: format.format_integer(breakdown.total_days),
        total_hours: format.format_integer(breakdown.total_hours),
        total_minutes: format.format_integer(breakdown.total_minutes),
        total_seconds: format.format_integer(breakdown.total_seconds),
    }
}

/// Localized one-sentence summary, e.g. "You are 24 years, 1 month, 1 day old."
pub fn render_age_summary(
    formatted: &FormattedAgeBreakdown,
    locale: Locale,
    name: Option<&str>,
) -> String {
    let strings = LocaleStrings::for_locale(locale);

    let years = formatted.years.to_string();
    let months = formatted.months.to_string();
    let days = formatted.days.to_string();
    let age = interpolate(
        strings.age_phrase,
        &[
            ("years", years.as_str()),
            ("year", strings.year.pick(i64::from(formatted.years))),
            ("months", months.as_str()),
            ("month", strings.month.pick(i64::from(formatted.months))),
            ("days", days.as_str()),
            ("day", strings.day.pick(i64::from(formatted.days))),
        ],
    );

    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            interpolate(strings.age_summary_named, &[("name", name), ("age", age.as_str())])
        }
        None => interpolate(strings.age_summary, &[("age", age.as_str())]),
    }
}

/// Years, months and days between two calendar dates, `birth <= now`.
fn calendar_difference(birth: NaiveDate, now: NaiveDate) -> (u32, u32, u32) {
    let mut years = now.year() - birth.year();
    let mut months = now.month() as i32 - birth.month() as i32;
    let mut days = now.day() as i32 - birth.day() as i32;

    // Fix day underflow
    if days < 0 {
        months -= 1;

        let (prev_year, prev_month) = previous_month(now.year(), now.month());
        let prev_len = days_in_month(prev_year, prev_month) as i32;

        // A birth day missing from the short month falls on its last day
        let anchor = (birth.day() as i32).min(prev_len);
        days = now.day() as i32 - anchor + prev_len;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    (
        u32::try_from(years).unwrap_or(0),
        months as u32,
        days as u32,
    )
}

fn wrap_difference(now: u32, birth: u32, modulus: i32) -> u32 {
    let diff = now as i32 - birth as i32;
    if diff >= 0 {
        diff as u32
    } else {
        (diff + modulus) as u32
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // keeps the function total
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
