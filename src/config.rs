use crate::i18n::{Locale, LocaleRegistry};
use anyhow::{bail, Context, Result};
use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Locale used when neither the request nor Accept-Language picks one
    pub default_locale: Locale,

    // Zone used to read birth dates and the current date, minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            default_locale: Locale::fallback(),
            utc_offset_minutes: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = match std::env::var("DEFAULT_LOCALE") {
            Ok(code) => Locale::from_code(&code).with_context(|| {
                let supported: Vec<_> = LocaleRegistry::get().list().iter().map(|l| l.code).collect();
                format!("DEFAULT_LOCALE must be one of: {}", supported.join(", "))
            })?,
            Err(_) => Locale::fallback(),
        };

        let utc_offset_minutes = match std::env::var("UTC_OFFSET_MINUTES") {
            Ok(value) => value
                .trim()
                .parse::<i32>()
                .with_context(|| format!("UTC_OFFSET_MINUTES is not an integer: '{}'", value))?,
            Err(_) => 0,
        };
        if utc_offset_minutes.abs() >= 24 * 60 {
            bail!(
                "UTC_OFFSET_MINUTES must be within ±1439, got {}",
                utc_offset_minutes
            );
        }

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            default_locale,
            utc_offset_minutes,
        })
    }

    /// Fixed offset matching `utc_offset_minutes`.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("UTC offset is valid"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
