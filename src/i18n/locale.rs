//! Locale type: a locale code validated against the registry.

use crate::i18n::format::NumberFormat;
use crate::i18n::{LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a locale code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),
}

/// A validated locale.
///
/// Only codes that exist in the registry can be turned into a
/// `Locale`, so the registry lookup in [`Locale::config`] cannot miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639-1 code (e.g., "en", "id")
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };

    pub const INDONESIAN: Locale = Locale { code: "id" };

    /// Create a Locale from a code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is in the registry
    /// * `Err(LocaleError)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        LocaleRegistry::get()
            .get_by_code(code.trim())
            .map(|config| Locale { code: config.code })
            .ok_or_else(|| LocaleError::Unknown(code.to_string()))
    }

    /// The registry's fallback locale.
    pub fn fallback() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Locale` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// BCP 47 tag of the conventions used (e.g., "id-ID").
    pub fn tag(&self) -> &'static str {
        self.config().tag
    }

    /// Name of the locale in its own language (e.g., "Bahasa Indonesia").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Digit grouping convention for this locale.
    pub fn number_format(&self) -> &'static NumberFormat {
        &self.config().number
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
