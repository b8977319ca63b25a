//! Input validation for age requests.
//!
//! Raw form/query input is checked here before any calculation runs. Every
//! violated rule is reported, not just the first one.

use crate::i18n::{Locale, LocaleStrings};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Minimum length of an optional name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

static TIME_REGEX: OnceLock<Regex> = OnceLock::new();

fn time_regex() -> &'static Regex {
    TIME_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?$").expect("Invalid time regex")
    })
}

/// Raw age calculator input as submitted by a form or query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeInput {
    /// "YYYY-MM-DD" or an RFC 3339 timestamp
    #[serde(default)]
    pub birth_date: String,

    /// "HH:MM" or "HH:MM:SS", applied to a date-only `birth_date`
    #[serde(default)]
    pub birth_time: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A single violated input rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeInputError {
    #[error("Invalid birth date: '{0}'")]
    InvalidDate(String),

    #[error("Invalid birth time: '{0}'")]
    InvalidTime(String),

    #[error("Birth date {0} is in the future")]
    FutureBirthDate(String),

    #[error("Name must be at least {} characters", MIN_NAME_CHARS)]
    NameTooShort,
}

impl AgeInputError {
    /// User-facing message for this violation.
    pub fn message(&self, locale: Locale) -> &'static str {
        let strings = LocaleStrings::for_locale(locale);
        match self {
            AgeInputError::InvalidDate(_) => strings.invalid_date,
            AgeInputError::InvalidTime(_) => strings.invalid_time,
            AgeInputError::FutureBirthDate(_) => strings.future_birth_date,
            AgeInputError::NameTooShort => strings.name_too_short,
        }
    }
}

/// All rules violated by one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(pub Vec<AgeInputError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[AgeInputError] {
        &self.0
    }

    /// Localized messages, one per violated rule.
    pub fn messages(&self, locale: Locale) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message(locale)).collect()
    }
}

/// Input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBirth {
    pub birth: DateTime<FixedOffset>,
    pub name: Option<String>,
}

/// Parse a birth date, interpreting a date-only value in `offset`.
///
/// A date-only value yields midnight; `time` (if given) sets the time of day.
/// RFC 3339 timestamps carry their own time and ignore `time`.
pub fn parse_birth(
    date: &str,
    time: Option<&str>,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, AgeInputError> {
    let date = date.trim();
    let time = time.map(str::trim).filter(|t| !t.is_empty());

    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        if time.is_some() {
            debug!("Ignoring birth time for full timestamp '{}'", date);
        }
        return Ok(instant.with_timezone(&offset));
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AgeInputError::InvalidDate(date.to_string()))?;

    let time_of_day = match time {
        Some(time) => parse_time(time)?,
        None => NaiveTime::MIN,
    };

    offset
        .from_local_datetime(&NaiveDateTime::new(day, time_of_day))
        .single()
        .ok_or_else(|| AgeInputError::InvalidDate(date.to_string()))
}

fn parse_time(time: &str) -> Result<NaiveTime, AgeInputError> {
    let invalid = || AgeInputError::InvalidTime(time.to_string());

    let caps = time_regex().captures(time).ok_or_else(invalid)?;
    let field = |m: regex::Match<'_>| m.as_str().parse::<u32>().map_err(|_| invalid());

    let hour = caps.get(1).ok_or_else(invalid).and_then(field)?;
    let minute = caps.get(2).ok_or_else(invalid).and_then(field)?;
    // Seconds are optional; only an absent group means zero
    let second = caps.get(3).map(field).transpose()?.unwrap_or(0);

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Validate raw input against `now`, collecting every violated rule.
pub fn validate(
    input: &AgeInput,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<ValidatedBirth, ValidationErrors> {
    let mut errors = Vec::new();

    let birth = match parse_birth(&input.birth_date, input.birth_time.as_deref(), offset) {
        Ok(birth) if birth.with_timezone(&Utc) > now => {
            errors.push(AgeInputError::FutureBirthDate(birth.to_rfc3339()));
            None
        }
        Ok(birth) => Some(birth),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    // A blank name counts as no name
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(name) = name {
        if name.chars().count() < MIN_NAME_CHARS {
            errors.push(AgeInputError::NameTooShort);
        }
    }

    match birth {
        Some(birth) if errors.is_empty() => Ok(ValidatedBirth {
            birth,
            name: name.map(str::to_string),
        }),
        _ => Err(ValidationErrors(errors)),
    }
}
