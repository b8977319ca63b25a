use crate::i18n::Locale;

/// Singular and plural form of a unit word.
#[derive(Debug, Clone, Copy)]
pub struct UnitNames {
    pub one: &'static str,
    pub other: &'static str,
}

impl UnitNames {
    /// Pick the form matching `count`.
    pub fn pick(&self, count: i64) -> &'static str {
        if count == 1 {
            self.one
        } else {
            self.other
        }
    }
}

/// All localized user-facing strings for a locale
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Units ====================
    pub year: UnitNames,
    pub month: UnitNames,
    pub day: UnitNames,
    pub hour: UnitNames,
    pub minute: UnitNames,
    pub second: UnitNames,

    // ==================== Age Summary ====================
    /// Age phrase built from the calendar fields
    /// Placeholders: {years}, {year}, {months}, {month}, {days}, {day}
    pub age_phrase: &'static str,

    /// Sentence shown when no name was given
    /// Placeholders: {age}
    pub age_summary: &'static str,

    /// Sentence shown when a name was given
    /// Placeholders: {name}, {age}
    pub age_summary_named: &'static str,

    // ==================== Relative Time ====================
    /// Placeholders: {count}, {unit}
    pub relative_past: &'static str,

    /// Placeholders: {count}, {unit}
    pub relative_future: &'static str,

    pub yesterday: &'static str,
    pub tomorrow: &'static str,
    pub now: &'static str,

    // ==================== Validation Messages ====================
    pub invalid_date: &'static str,
    pub invalid_time: &'static str,
    pub future_birth_date: &'static str,
    pub name_too_short: &'static str,
}

impl LocaleStrings {
    /// Strings table for a locale.
    pub fn for_locale(locale: Locale) -> &'static LocaleStrings {
        match locale.code() {
            "id" => &INDONESIAN_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    year: UnitNames { one: "year", other: "years" },
    month: UnitNames { one: "month", other: "months" },
    day: UnitNames { one: "day", other: "days" },
    hour: UnitNames { one: "hour", other: "hours" },
    minute: UnitNames { one: "minute", other: "minutes" },
    second: UnitNames { one: "second", other: "seconds" },

    age_phrase: "{years} {year}, {months} {month}, {days} {day}",
    age_summary: "You are {age} old.",
    age_summary_named: "{name}, you are {age} old.",

    relative_past: "{count} {unit} ago",
    relative_future: "in {count} {unit}",
    yesterday: "yesterday",
    tomorrow: "tomorrow",
    now: "now",

    invalid_date: "Please enter a valid date.",
    invalid_time: "Please enter a valid time (HH:MM).",
    future_birth_date: "Birth date cannot be in the future.",
    name_too_short: "Name must be at least 2 characters.",
};

// ==================== Indonesian Strings ====================

pub const INDONESIAN_STRINGS: LocaleStrings = LocaleStrings {
    year: UnitNames { one: "tahun", other: "tahun" },
    month: UnitNames { one: "bulan", other: "bulan" },
    day: UnitNames { one: "hari", other: "hari" },
    hour: UnitNames { one: "jam", other: "jam" },
    minute: UnitNames { one: "menit", other: "menit" },
    second: UnitNames { one: "detik", other: "detik" },

    age_phrase: "{years} {year}, {months} {month}, {days} {day}",
    age_summary: "Usia Anda {age}.",
    age_summary_named: "{name}, usia Anda {age}.",

    relative_past: "{count} {unit} yang lalu",
    relative_future: "dalam {count} {unit}",
    yesterday: "kemarin",
    tomorrow: "besok",
    now: "sekarang",

    invalid_date: "Silakan masukkan tanggal yang valid.",
    invalid_time: "Silakan masukkan waktu yang valid (JJ:MM).",
    future_birth_date: "Tanggal lahir tidak boleh di masa depan.",
    name_too_short: "Nama minimal 2 karakter.",
};

/// Single-pass `{name}` interpolation. Unknown tokens are left as-is.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            token.push(c);
        }

        match args.iter().find(|(name, _)| *name == token) {
            Some((_, value)) if closed => result.push_str(value),
            _ => {
                result.push('{');
                result.push_str(&token);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
