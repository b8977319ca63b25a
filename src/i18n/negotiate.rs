//! Locale detection from request signals.
//!
//! Parses `Accept-Language` preferences and leading URL path segments into a
//! supported [`Locale`].

use crate::i18n::Locale;
use std::cmp::Ordering;
use tracing::debug;

/// One `tag;q=weight` entry of an Accept-Language header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Lowercased language tag (e.g., "id-id")
    pub tag: String,
    pub quality: f32,
}

impl LanguagePreference {
    /// Primary language subtag ("id-id" → "id").
    pub fn primary_subtag(&self) -> &str {
        self.tag.split('-').next().unwrap_or_default()
    }
}

/// Parse an Accept-Language header into entries sorted by descending weight.
///
/// A missing or unparseable `q` weighs 1.0. Equal weights keep header order.
pub fn parse_language_preferences(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim().to_lowercase();
            if tag.is_empty() {
                return None;
            }

            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .next()
                .and_then(|value| value.trim().parse::<f32>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(1.0);

            Some(LanguagePreference { tag, quality })
        })
        .collect();

    // sort_by is stable: the first-listed entry wins among equal weights
    preferences.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    preferences
}

/// First supported locale in an Accept-Language header, by preference.
///
/// Entries weighted `q=0` are not acceptable and are skipped.
pub fn match_accept_language(header: Option<&str>) -> Option<Locale> {
    let header = header.filter(|h| !h.trim().is_empty())?;

    let matched = parse_language_preferences(header)
        .iter()
        .filter(|pref| pref.quality > 0.0)
        .find_map(|pref| Locale::from_code(pref.primary_subtag()).ok());

    if let Some(locale) = matched {
        debug!("Negotiated locale '{}' from Accept-Language '{}'", locale, header);
    }
    matched
}

/// Pick the preferred supported locale from an Accept-Language header,
/// falling back to `default` when the header is absent or nothing matches.
///
/// Entries weighted `q=0` mean "not acceptable" and never match, so
/// `"id;q=0,fr"` resolves to `default` rather than `id`.
///
/// ```
/// use ageinfo::i18n::{parse_accept_language, Locale};
///
/// let locale = parse_accept_language(Some("id-ID,id;q=0.9,en-US;q=0.8"), Locale::ENGLISH);
/// assert_eq!(locale, Locale::INDONESIAN);
/// assert_eq!(parse_accept_language(None, Locale::ENGLISH), Locale::ENGLISH);
/// assert_eq!(parse_accept_language(Some("id;q=0,fr"), Locale::ENGLISH), Locale::ENGLISH);
/// ```
pub fn parse_accept_language(header: Option<&str>, default: Locale) -> Locale {
    match_accept_language(header).unwrap_or(default)
}

/// Whether the Accept-Language header signals an Indonesian-speaking user.
pub fn is_indonesian_user(header: Option<&str>) -> bool {
    match header {
        Some(header) => {
            let lower = header.to_lowercase();
            lower.contains("id-id") || lower.contains("id;")
        }
        None => false,
    }
}

/// Locale named by the first segment of a URL path, if any.
///
/// `/en/about` → `en`, `/id` → `id`, `/about` → `None`.
pub fn locale_from_pathname(pathname: &str) -> Option<Locale> {
    let first = pathname.split('/').find(|segment| !segment.is_empty())?;
    // Segments must match the canonical lowercase code exactly
    Locale::from_code(first)
        .ok()
        .filter(|locale| locale.code() == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Preference Parsing Tests ====================

    #[test]
    fn test_parse_preferences_default_weight() {
        let prefs = parse_language_preferences("en-US, id;q=0.5");
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs[0].tag, "en-us");
        assert_eq!(prefs[0].quality, 1.0);
        assert_eq!(prefs[1].tag, "id");
        assert_eq!(prefs[1].quality, 0.5);
    }

    #[test]
    fn test_parse_preferences_sorted_by_weight() {
        let prefs = parse_language_preferences("en;q=0.3,id;q=0.9,fr");
        let tags: Vec<_> = prefs.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, vec!["fr", "id", "en"]);
    }

    #[test]
    fn test_parse_preferences_stable_on_ties() {
        let prefs = parse_language_preferences("en;q=0.8,id;q=0.8");
        assert_eq!(prefs[0].tag, "en");
        assert_eq!(prefs[1].tag, "id");
    }

    #[test]
    fn test_parse_preferences_invalid_weight_is_one() {
        let prefs = parse_language_preferences("id;q=abc");
        assert_eq!(prefs[0].quality, 1.0);
    }

    #[test]
    fn test_parse_preferences_skips_empty_entries() {
        let prefs = parse_language_preferences("en,, ,id");
        assert_eq!(prefs.len(), 2);
    }

    #[test]
    fn test_primary_subtag() {
        let pref = LanguagePreference {
            tag: "id-id".to_string(),
            quality: 1.0,
        };
        assert_eq!(pref.primary_subtag(), "id");
    }

    // ==================== Negotiation Tests ====================

    #[test]
    fn test_accept_language_indonesian_browser() {
        let locale = parse_accept_language(Some("id-ID,id;q=0.9,en-US;q=0.8"), Locale::ENGLISH);
        assert_eq!(locale, Locale::INDONESIAN);
    }

    #[test]
    fn test_accept_language_english_browser() {
        let locale = parse_accept_language(Some("en-US,en;q=0.9"), Locale::INDONESIAN);
        assert_eq!(locale, Locale::ENGLISH);
    }

    #[test]
    fn test_accept_language_missing_header_uses_default() {
        assert_eq!(parse_accept_language(None, Locale::ENGLISH), Locale::ENGLISH);
        assert_eq!(parse_accept_language(Some("  "), Locale::INDONESIAN), Locale::INDONESIAN);
    }

    #[test]
    fn test_accept_language_unsupported_uses_default() {
        assert_eq!(
            parse_accept_language(Some("fr-FR,de;q=0.5"), Locale::INDONESIAN),
            Locale::INDONESIAN
        );
    }

    #[test]
    fn test_accept_language_skips_unsupported_until_match() {
        let locale = parse_accept_language(Some("fr-FR,de;q=0.9,id;q=0.2"), Locale::ENGLISH);
        assert_eq!(locale, Locale::INDONESIAN);
    }

    #[test]
    fn test_accept_language_weight_beats_order() {
        let locale = parse_accept_language(Some("en;q=0.4,id;q=0.7"), Locale::ENGLISH);
        assert_eq!(locale, Locale::INDONESIAN);
    }

    #[test]
    fn test_accept_language_zero_weight_is_not_acceptable() {
        let locale = parse_accept_language(Some("id;q=0,fr"), Locale::ENGLISH);
        assert_eq!(locale, Locale::ENGLISH);
    }

    #[test]
    fn test_accept_language_case_insensitive() {
        let locale = parse_accept_language(Some("ID-id"), Locale::ENGLISH);
        assert_eq!(locale, Locale::INDONESIAN);
    }

    #[test]
    fn test_match_accept_language() {
        assert_eq!(match_accept_language(Some("en-GB")), Some(Locale::ENGLISH));
        assert_eq!(match_accept_language(Some("fr")), None);
        assert_eq!(match_accept_language(None), None);
    }

    // ==================== Indonesian User Tests ====================

    #[test]
    fn test_is_indonesian_user() {
        assert!(is_indonesian_user(Some("id-ID,id;q=0.9")));
        assert!(is_indonesian_user(Some("en;q=0.5,id;q=0.9")));
        assert!(!is_indonesian_user(Some("en-US,en;q=0.9")));
        assert!(!is_indonesian_user(None));
    }

    // ==================== Pathname Tests ====================

    #[test]
    fn test_locale_from_pathname() {
        assert_eq!(locale_from_pathname("/en/about"), Some(Locale::ENGLISH));
        assert_eq!(locale_from_pathname("/id"), Some(Locale::INDONESIAN));
        assert_eq!(locale_from_pathname("/about"), None);
        assert_eq!(locale_from_pathname("/"), None);
        assert_eq!(locale_from_pathname(""), None);
    }

    #[test]
    fn test_locale_from_pathname_requires_exact_code() {
        assert_eq!(locale_from_pathname("/EN/about"), None);
        assert_eq!(locale_from_pathname("/english"), None);
    }
}
