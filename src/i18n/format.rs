//! Locale-aware formatting for numbers, currency amounts, dates and
//! relative times.
//!
//! Only the conventions of the registered locales are modelled: a single
//! group separator inserted every `group_size` digits, a decimal separator,
//! and a currency symbol placed before the amount.

use crate::i18n::strings::{interpolate, LocaleStrings};
use crate::i18n::Locale;
use chrono::{DateTime, Datelike, TimeZone};

/// Digit grouping and decimal separator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    group_separator: char,
    decimal_separator: char,
    group_size: usize,
}

impl NumberFormat {
    pub const fn new(group_separator: char, decimal_separator: char, group_size: usize) -> Self {
        Self {
            group_separator,
            decimal_separator,
            group_size,
        }
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Format an integer with group separators.
    pub fn format_integer<N: Into<i128>>(&self, value: N) -> String {
        let value: i128 = value.into();
        let grouped = self.group_digits(&value.unsigned_abs().to_string());

        if value < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format a float with exactly `decimals` fraction digits.
    ///
    /// Rounding follows `format!`'s fixed-precision rendering. A value that
    /// rounds to zero is printed without a minus sign.
    pub fn format_decimal(&self, value: f64, decimals: usize) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let rendered = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (rendered.as_str(), None),
        };

        let mut out = String::with_capacity(rendered.len() + 4);
        if value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        if let Some(frac_part) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    fn group_digits(&self, digits: &str) -> String {
        if self.group_size == 0 {
            return digits.to_string();
        }

        let len = digits.len();
        let mut out = String::with_capacity(len + len / self.group_size);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % self.group_size == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out
    }
}

/// Field order of a long-form date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "August 17th, 1945"
    MonthOrdinalDayYear,
    /// "17 Agustus 1945"
    DayMonthYear,
}

/// ISO 4217 currency and how its amounts are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub fraction_digits: usize,
}

const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo {
        code: "USD",
        symbol: "$",
        fraction_digits: 2,
    },
    CurrencyInfo {
        code: "IDR",
        symbol: "Rp",
        fraction_digits: 0,
    },
    CurrencyInfo {
        code: "EUR",
        symbol: "€",
        fraction_digits: 2,
    },
];

/// Look up a known currency by code (case-insensitive).
pub fn currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES
        .iter()
        .find(|info| info.code.eq_ignore_ascii_case(code))
}

/// Format an integer with the locale's thousands separator.
///
/// ```
/// use ageinfo::i18n::{format_locale_number, Locale};
///
/// assert_eq!(format_locale_number(1234567, Locale::INDONESIAN), "1.234.567");
/// assert_eq!(format_locale_number(1234567, Locale::ENGLISH), "1,234,567");
/// ```
pub fn format_locale_number<N: Into<i128>>(value: N, locale: Locale) -> String {
    locale.number_format().format_integer(value)
}

/// Format a number with a fixed count of fraction digits.
pub fn format_locale_decimal(value: f64, locale: Locale, decimals: usize) -> String {
    locale.number_format().format_decimal(value, decimals)
}

/// Format a currency amount.
///
/// # Arguments
/// * `value` - The amount
/// * `locale` - Locale whose separators are used
/// * `currency` - ISO 4217 code; `None` uses the locale's own currency
///
/// # Returns
/// The amount with the currency symbol prefixed. Codes outside the known
/// table are printed as a `CODE ` prefix with two fraction digits.
///
/// # Example
/// ```
/// use ageinfo::i18n::{format_locale_currency, Locale};
///
/// assert_eq!(format_locale_currency(1000000.0, Locale::INDONESIAN, None), "Rp1.000.000");
/// assert_eq!(format_locale_currency(1000.0, Locale::ENGLISH, None), "$1,000.00");
/// assert_eq!(format_locale_currency(5.5, Locale::ENGLISH, Some("EUR")), "€5.50");
/// ```
pub fn format_locale_currency(value: f64, locale: Locale, currency: Option<&str>) -> String {
    let code = currency.unwrap_or(locale.config().currency);

    let (prefix, digits) = match currency_info(code) {
        Some(info) => (info.symbol.to_string(), info.fraction_digits),
        None => (format!("{} ", code.trim().to_uppercase()), 2),
    };

    let amount = format_locale_decimal(value.abs(), locale, digits);
    let is_zero = !amount.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    if value < 0.0 && !is_zero {
        format!("-{}{}", prefix, amount)
    } else {
        format!("{}{}", prefix, amount)
    }
}

/// Format a calendar date in the locale's long form.
///
/// `en` → "August 17th, 1945", `id` → "17 Agustus 1945".
pub fn format_locale_date<D: Datelike>(date: &D, locale: Locale) -> String {
    let config = locale.config();
    let month = config.month_names[date.month0() as usize];

    match config.date_style {
        DateStyle::MonthOrdinalDayYear => format!(
            "{} {}{}, {}",
            month,
            date.day(),
            ordinal_suffix(date.day()),
            date.year()
        ),
        DateStyle::DayMonthYear => format!("{} {} {}", date.day(), month, date.year()),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Describe `target` relative to `now` ("3 days ago", "in 2 hours").
///
/// The largest unit with a non-zero count is used, counts truncated toward
/// zero. Exactly one day either way reads "yesterday"/"tomorrow" and a
/// sub-second gap reads "now".
pub fn format_relative_time<Tz1: TimeZone, Tz2: TimeZone>(
    target: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
    locale: Locale,
) -> String {
    let strings = LocaleStrings::for_locale(locale);

    let diff_seconds = (target.timestamp_millis() - now.timestamp_millis()) / 1000;
    let diff_minutes = diff_seconds / 60;
    let diff_hours = diff_minutes / 60;
    let diff_days = diff_hours / 24;

    let (count, unit) = match (diff_days, diff_hours, diff_minutes) {
        (-1, _, _) => return strings.yesterday.to_string(),
        (1, _, _) => return strings.tomorrow.to_string(),
        (d, _, _) if d != 0 => (d, strings.day),
        (_, h, _) if h != 0 => (h, strings.hour),
        (_, _, m) if m != 0 => (m, strings.minute),
        _ if diff_seconds == 0 => return strings.now.to_string(),
        _ => (diff_seconds, strings.second),
    };

    let count_text = format_locale_number(count.unsigned_abs(), locale);
    let template = if count < 0 {
        strings.relative_past
    } else {
        strings.relative_future
    };

    interpolate(
        template,
        &[("count", count_text.as_str()), ("unit", unit.pick(count.abs()))],
    )
}
