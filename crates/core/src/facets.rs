//! Facet count decoding for the search backend's response format
//!
//! The backend returns facet counts in the classic alternating-array form:
//!
//! ```json
//! {"facet_counts": {"facet_fields": {"sector_str_mv": ["/lib/", 120, "/mus/", 30]}}}
//! ```
//!
//! Decoding yields ordered `{value, display_text, count}` entries. The
//! backend carries no separate display text in this format, so
//! `display_text` starts out equal to `value`; consumers substitute a
//! hierarchical-facet rendering when the two are still equal verbatim.

use serde::{Deserialize, Serialize};

/// Decoding failure for a facet response
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FacetError {
    #[error("facet field missing from response: {0}")]
    MissingField(String),

    #[error("malformed facet counts for field: {0}")]
    Malformed(String),
}

/// One facet value with its document count
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FacetValue {
    pub value: String,
    pub display_text: String,
    pub count: u64,
}

/// Decode the facet counts for `field` from a select response body
pub fn parse_facet_counts(
    body: &serde_json::Value,
    field: &str,
) -> Result<Vec<FacetValue>, FacetError> {
    let counts = body
        .get("facet_counts")
        .and_then(|counts| counts.get("facet_fields"))
        .and_then(|fields| fields.get(field))
        .and_then(|entries| entries.as_array())
        .ok_or_else(|| FacetError::MissingField(field.to_string()))?;

    let mut values = Vec::with_capacity(counts.len() / 2);
    for pair in counts.chunks(2) {
        if pair.len() != 2 {
            return Err(FacetError::Malformed(field.to_string()));
        }
        let value = pair[0]
            .as_str()
            .ok_or_else(|| FacetError::Malformed(field.to_string()))?;
        let count = pair[1]
            .as_u64()
            .ok_or_else(|| FacetError::Malformed(field.to_string()))?;
        values.push(FacetValue {
            value: value.to_string(),
            display_text: value.to_string(),
            count,
        });
    }

    Ok(values)
}

/// Human-readable text for a hierarchical facet value
///
/// Drops empty segments and a leading numeric level marker, then keeps the
/// last segment: `0/Helka/` becomes `Helka`, `1/lib/helmet/` becomes
/// `helmet`. A value with no usable segments is returned as-is.
pub fn format_hierarchical_facet(value: &str) -> String {
    let segments: Vec<&str> = value.split('/').filter(|segment| !segment.is_empty()).collect();

    let mut usable = segments.as_slice();
    if let Some((first, rest)) = usable.split_first() {
        if !rest.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
            usable = rest;
        }
    }

    usable
        .last()
        .map(|segment| segment.to_string())
        .unwrap_or_else(|| value.to_string())
}
