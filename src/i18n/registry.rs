//! Locale registry: single source of truth for all supported locales.
//!
//! The registry is built once behind a `OnceLock` and stays immutable, so every
//! formatting call reads the same per-locale conventions.

use crate::i18n::format::{DateStyle, NumberFormat};
use std::sync::OnceLock;

/// Configuration for a supported locale.
///
/// Holds the locale's identity plus the conventions used to format numbers,
/// dates and currency amounts for it.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 language code used in URLs and API payloads (e.g., "en", "id")
    pub code: &'static str,

    /// Full BCP 47 tag of the regional variant whose conventions are used (e.g., "id-ID")
    pub tag: &'static str,

    /// Native name of the locale (e.g., "Bahasa Indonesia")
    pub native_name: &'static str,

    /// Whether this is the fallback locale (only one should be true)
    pub is_default: bool,

    /// Digit grouping and decimal separator convention
    pub number: NumberFormat,

    /// ISO 4217 code of the currency shown when none is requested
    pub currency: &'static str,

    /// Field order used for long-form dates
    pub date_style: DateStyle,

    /// Month names, January first
    pub month_names: [&'static str; 12],
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Matching is case-insensitive, so "ID" and "id" resolve to the same entry.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.code.eq_ignore_ascii_case(code))
    }

    /// Get all supported locales, in table order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the table does not contain exactly one default locale. This
    /// indicates a broken registry table, not bad user input.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

/// Supported locales: English (default) and Indonesian.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            tag: "en-US",
            native_name: "English",
            is_default: true,
            number: NumberFormat::new(',', '.', 3),
            currency: "USD",
            date_style: DateStyle::MonthOrdinalDayYear,
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
        },
        LocaleConfig {
            code: "id",
            tag: "id-ID",
            native_name: "Bahasa Indonesia",
            is_default: false,
            number: NumberFormat::new('.', ',', 3),
            currency: "IDR",
            date_style: DateStyle::DayMonthYear,
            month_names: [
                "Januari",
                "Februari",
                "Maret",
                "April",
                "Mei",
                "Juni",
                "Juli",
                "Agustus",
                "September",
                "Oktober",
                "November",
                "Desember",
            ],
        },
    ]
}
