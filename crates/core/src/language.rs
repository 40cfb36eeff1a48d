//! Display-language resolution
//!
//! The directory is built per display language. Resolution order: explicit
//! configured language, else the active UI locale; a fixed remap table folds
//! regional variants; anything outside the allowed list falls back to the
//! configured default. Callers resolve once per request context and keep the
//! result.

/// Fixed remap applied before the allowed-list check
const LOCALE_REMAP: [(&str, &str); 1] = [("en-gb", "en")];

/// Normalize a raw locale tag (`en_GB.UTF-8` -> `en-gb`)
///
/// Strips an encoding suffix, folds `_` to `-`, and lowercases.
pub fn normalize_locale_tag(raw: &str) -> String {
    let tag = raw.split('.').next().unwrap_or(raw);
    tag.replace('_', "-").to_lowercase()
}

/// Apply the fixed locale remap table
pub fn remap_locale(locale: &str) -> &str {
    for (from, to) in LOCALE_REMAP {
        if locale == from {
            return to;
        }
    }
    locale
}

/// Resolve the display language for a request context
///
/// `explicit` wins over `ui_locale`; the winner is normalized and remapped,
/// then checked against `allowed`. Unknown languages resolve to `fallback`.
pub fn resolve_language(
    explicit: Option<&str>,
    ui_locale: &str,
    allowed: &[String],
    fallback: &str,
) -> String {
    let requested = normalize_locale_tag(explicit.unwrap_or(ui_locale));
    let mapped = remap_locale(&requested);

    if allowed.iter().any(|language| language == mapped) {
        mapped.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["fi".to_string(), "sv".to_string(), "en".to_string()]
    }

    #[test]
    fn test_normalize_locale_tag() {
        assert_eq!(normalize_locale_tag("en_GB.UTF-8"), "en-gb");
        assert_eq!(normalize_locale_tag("fi_FI"), "fi-fi");
        assert_eq!(normalize_locale_tag("sv"), "sv");
    }

    #[test]
    fn test_remap_folds_regional_english() {
        assert_eq!(remap_locale("en-gb"), "en");
        assert_eq!(remap_locale("en"), "en");
        assert_eq!(remap_locale("fi"), "fi");
    }

    #[test]
    fn test_resolve_remapped_variant() {
        assert_eq!(resolve_language(None, "en-gb", &allowed(), "fi"), "en");
    }

    #[test]
    fn test_resolve_disallowed_falls_back() {
        assert_eq!(resolve_language(None, "de", &allowed(), "fi"), "fi");
    }

    #[test]
    fn test_resolve_explicit_wins_over_ui_locale() {
        assert_eq!(resolve_language(Some("sv"), "en", &allowed(), "fi"), "sv");
    }

    #[test]
    fn test_resolve_explicit_still_checked_against_allowed() {
        assert_eq!(resolve_language(Some("de"), "en", &allowed(), "fi"), "fi");
    }

    #[test]
    fn test_resolve_normalizes_posix_locale() {
        assert_eq!(resolve_language(None, "fi_FI.UTF-8", &allowed(), "fi"), "fi");
        assert_eq!(resolve_language(None, "en_GB.UTF-8", &allowed(), "fi"), "en");
    }
}
