//! Translation of applied search-backend filters for display
//!
//! The search backend stores applied filters as raw expression strings in
//! Lucene range syntax (`[x TO y]`), optionally prefixed with a range
//! operator (`Intersects|[x TO y]`). This module parses those strings into
//! structured descriptors and rewrites filter-list entries with a
//! human-readable display text. Translation is one-directional: filter
//! string in, display entry out.
//!
//! A string that does not match the grammar is not an error; it is an
//! ordinary free-text filter and is passed through untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Range type assumed when a filter carries no operator prefix
pub const DEFAULT_RANGE_TYPE: &str = "overlap";

/// Structured date-range filter parsed from a backend filter expression
///
/// `from` and `to` are either the wildcard `"*"` or a digit/hyphen date
/// token. `range_type` is the captured operator word, or
/// [`DEFAULT_RANGE_TYPE`] when the expression had none. The operator is kept
/// verbatim rather than validated against a closed set, so hand-written
/// filters with unknown operators still round-trip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub range_type: String,
}

/// A partially formatted applied-filter list entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub field: String,
    pub value: String,
    pub display_text: String,
}

impl FilterEntry {
    /// Entry whose display text starts out as the raw value
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            field: field.into(),
            display_text: value.clone(),
            value,
        }
    }
}

/// Parse a backend filter expression into a date-range descriptor
///
/// The grammar has exactly three branches, tried in order:
///
/// 1. `<word>|[<from> TO <to>]` - explicit range operator
/// 2. `[<from> TO <to>]` - no operator, type defaults to `overlap`
/// 3. anything else - not a range filter, `None`
///
/// Branch order and the exact patterns are load-bearing: malformed or
/// ambiguous expressions (reversed operator position, unbracketed ranges)
/// must fall through to `None` so free-text filters coexist with
/// structured ones.
pub fn parse_date_range_filter(filter: &str) -> Option<DateRangeFilter> {
    let typed = Regex::new(r"^(\w+)\|\[([\d-]+|\*)\s+TO\s+([\d-]+|\*)\]$").unwrap();
    if let Some(caps) = typed.captures(filter) {
        return Some(DateRangeFilter {
            from: caps[2].to_string(),
            to: caps[3].to_string(),
            range_type: caps[1].to_string(),
        });
    }

    let bare = Regex::new(r"^\[([\d-]+|\*)\s+TO\s+([\d-]+|\*)\]$").unwrap();
    if let Some(caps) = bare.captures(filter) {
        return Some(DateRangeFilter {
            from: caps[1].to_string(),
            to: caps[2].to_string(),
            range_type: DEFAULT_RANGE_TYPE.to_string(),
        });
    }

    None
}

/// Render the display text for a parsed range
///
/// Bounds equal to the wildcard `"*"` are omitted; the separator is the
/// en dash (U+2013).
pub fn format_date_range(from: &str, to: &str) -> String {
    let from = if from == "*" { "" } else { from };
    let to = if to == "*" { "" } else { to };
    format!("{from}\u{2013}{to}")
}

/// Replace a filter-list entry's display text with the formatted range
///
/// When the entry value does not parse as a range the entry is returned
/// unmodified.
pub fn format_date_range_filter_entry(entry: FilterEntry) -> FilterEntry {
    match parse_date_range_filter(&entry.value) {
        Some(range) => FilterEntry {
            display_text: format_date_range(&range.from, &range.to),
            ..entry
        },
        None => entry,
    }
}

/// Whether `field` is the configured date-range filter field
///
/// There is a single configured field, no wildcard or multi-field support.
/// A missing configuration disables detection entirely.
pub fn is_date_range_filter(field: &str, configured_field: Option<&str>) -> bool {
    matches!(configured_field, Some(configured) if configured == field)
}

/// Format a geographic filter-list entry
///
/// Currently a pass-through. This is an extension point for rewriting
/// geographic filter expressions (polygons, bounding boxes) into a
/// human-readable form; keep it a no-op unless such rewriting is needed.
pub fn format_geographic_filter_entry(entry: FilterEntry) -> FilterEntry {
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_range() {
        let parsed = parse_date_range_filter("Intersects|[1900 TO 2000]").unwrap();
        assert_eq!(
            parsed,
            DateRangeFilter {
                from: "1900".to_string(),
                to: "2000".to_string(),
                range_type: "Intersects".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_within_range() {
        let parsed = parse_date_range_filter("Within|[1945 TO 1965]").unwrap();
        assert_eq!(parsed.range_type, "Within");
        assert_eq!(parsed.from, "1945");
        assert_eq!(parsed.to, "1965");
    }

    #[test]
    fn test_parse_bare_range_defaults_to_overlap() {
        let parsed = parse_date_range_filter("[1900 TO 2000]").unwrap();
        assert_eq!(
            parsed,
            DateRangeFilter {
                from: "1900".to_string(),
                to: "2000".to_string(),
                range_type: "overlap".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_wildcard_bounds() {
        let parsed = parse_date_range_filter("[* TO 2000]").unwrap();
        assert_eq!(parsed.from, "*");
        assert_eq!(parsed.to, "2000");

        let parsed = parse_date_range_filter("Intersects|[1900 TO *]").unwrap();
        assert_eq!(parsed.from, "1900");
        assert_eq!(parsed.to, "*");
    }

    #[test]
    fn test_parse_negative_year_tokens() {
        let parsed = parse_date_range_filter("[-500 TO 500]").unwrap();
        assert_eq!(parsed.from, "-500");
        assert_eq!(parsed.to, "500");
    }

    #[test]
    fn test_parse_unknown_operator_kept_verbatim() {
        let parsed = parse_date_range_filter("Contains|[1900 TO 2000]").unwrap();
        assert_eq!(parsed.range_type, "Contains");
    }

    #[test]
    fn test_parse_non_range_returns_none() {
        assert_eq!(parse_date_range_filter("random:not-a-range"), None);
        assert_eq!(parse_date_range_filter(""), None);
        assert_eq!(parse_date_range_filter("building:\"0/ABC/\""), None);
    }

    #[test]
    fn test_parse_malformed_ranges_return_none() {
        // Deliberately permissive: anything off-grammar is "not a range",
        // never an error.
        assert_eq!(parse_date_range_filter("Intersects|[1900 TO 2000"), None);
        assert_eq!(parse_date_range_filter("[1900 TO 2000]|Intersects"), None);
        assert_eq!(parse_date_range_filter("1900 TO 2000"), None);
        assert_eq!(parse_date_range_filter("[1900 UNTIL 2000]"), None);
        assert_eq!(parse_date_range_filter("[19a0 TO 2000]"), None);
    }

    #[test]
    fn test_format_date_range_full() {
        assert_eq!(format_date_range("1900", "2000"), "1900\u{2013}2000");
    }

    #[test]
    fn test_format_date_range_omits_wildcards() {
        assert_eq!(format_date_range("*", "2000"), "\u{2013}2000");
        assert_eq!(format_date_range("1900", "*"), "1900\u{2013}");
        assert_eq!(format_date_range("*", "*"), "\u{2013}");
    }

    #[test]
    fn test_format_entry_open_start() {
        let entry = FilterEntry::new("search_daterange_mv", "[* TO 2000]");
        let formatted = format_date_range_filter_entry(entry);
        assert_eq!(formatted.display_text, "\u{2013}2000");
        assert_eq!(formatted.value, "[* TO 2000]");
    }

    #[test]
    fn test_format_entry_typed_range() {
        let entry = FilterEntry::new("search_daterange_mv", "Intersects|[1900 TO 2000]");
        let formatted = format_date_range_filter_entry(entry);
        assert_eq!(formatted.display_text, "1900\u{2013}2000");
    }

    #[test]
    fn test_format_entry_non_range_unmodified() {
        let entry = FilterEntry::new("genre_facet", "dissertations");
        let formatted = format_date_range_filter_entry(entry.clone());
        assert_eq!(formatted, entry);
    }

    #[test]
    fn test_is_date_range_filter() {
        assert!(is_date_range_filter(
            "search_daterange_mv",
            Some("search_daterange_mv")
        ));
        assert!(!is_date_range_filter("building", Some("search_daterange_mv")));
        // Missing configuration silently disables detection.
        assert!(!is_date_range_filter("search_daterange_mv", None));
    }

    #[test]
    fn test_geographic_entry_is_identity() {
        let entry = FilterEntry::new("location_geo", "Intersects(POLYGON((1 2, 3 4)))");
        assert_eq!(format_geographic_filter_entry(entry.clone()), entry);
    }
}
