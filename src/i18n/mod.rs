//! Internationalization (i18n) module for locale-aware output.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their conventions
//! - `locale`: Type-safe `Locale` validated against the registry
//! - `format`: Number, decimal, currency, date and relative-time formatting
//! - `negotiate`: Accept-Language and URL path locale detection
//! - `strings`: Localized user-facing strings
//!
//! # Example
//!
//! ```rust
//! use ageinfo::i18n::{format_locale_number, parse_accept_language, Locale};
//!
//! let locale = parse_accept_language(Some("id-ID,id;q=0.9"), Locale::fallback());
//! assert_eq!(format_locale_number(8766, locale), "8.766");
//! ```

pub mod format;
mod locale;
mod negotiate;
mod registry;
mod strings;

pub use format::{
    format_locale_currency, format_locale_date, format_locale_decimal, format_locale_number,
    format_relative_time, NumberFormat,
};
pub use locale::{Locale, LocaleError};
pub use negotiate::{
    is_indonesian_user, locale_from_pathname, match_accept_language, parse_accept_language,
    parse_language_preferences, LanguagePreference,
};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{interpolate, LocaleStrings, UnitNames};
