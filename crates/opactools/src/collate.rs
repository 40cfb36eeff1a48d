//! Locale-aware collation of directory entries

use icu::collator::{Collator, CollatorOptions, Strength};
use icu::locid::Locale;

use opactools_core::organisations::OrganisationListEntry;

/// Build a collator for a resolved display language
///
/// Returns `None` when the language does not parse as a locale or has no
/// collation data; callers fall back to case-insensitive ordering.
pub fn collator_for(language: &str) -> Option<Collator> {
    let locale: Locale = language.parse().ok()?;
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&locale.into(), options).ok()
}

/// Sort entries by display name
pub fn sort_entries(entries: &mut [OrganisationListEntry], collator: Option<&Collator>) {
    match collator {
        Some(collator) => entries.sort_by(|a, b| collator.compare(&a.name, &b.name)),
        None => entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> OrganisationListEntry {
        OrganisationListEntry {
            name: name.to_string(),
            link: String::new(),
            organisation: None,
            sector: "lib".to_string(),
        }
    }

    fn names(entries: &[OrganisationListEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_finnish_collation_orders_a_umlaut_last() {
        let mut entries = vec![entry("Ähtäri"), entry("Espoo"), entry("Vaasa")];
        let collator = collator_for("fi");
        assert!(collator.is_some());

        sort_entries(&mut entries, collator.as_ref());
        assert_eq!(names(&entries), vec!["Espoo", "Vaasa", "Ähtäri"]);
    }

    #[test]
    fn test_collation_ignores_case() {
        let mut entries = vec![entry("oodi"), entry("Helka"), entry("PIKI")];
        sort_entries(&mut entries, collator_for("fi").as_ref());
        assert_eq!(names(&entries), vec!["Helka", "oodi", "PIKI"]);
    }

    #[test]
    fn test_fallback_sort_without_collator() {
        let mut entries = vec![entry("beta"), entry("Alpha")];
        sort_entries(&mut entries, None);
        assert_eq!(names(&entries), vec!["Alpha", "beta"]);
    }

    #[test]
    fn test_invalid_locale_yields_no_collator() {
        assert!(collator_for("not a locale").is_none());
    }
}
