//! Organisation list entries, sector extraction, and provider routing
//!
//! The organisation directory is a mapping from sector key (`lib`, `mus`,
//! `arc`, ...) to a sorted list of locations, derived from two facet fields:
//! `sector_str_mv` values of the form `/sector/.../` and `building` values of
//! the form `0/<code>/`.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sector assumed when an organisation is not present in any facet
pub const DEFAULT_SECTOR: &str = "lib";

/// A single location in the organisation directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrganisationListEntry {
    /// Collated display name
    pub name: String,
    /// URL query parameters that apply this building as a facet filter
    pub link: String,
    /// Organisation code extracted from the building facet value
    pub organisation: Option<String>,
    /// Sector key the entry was enumerated under
    pub sector: String,
}

/// Sector key to ordered location entries
///
/// A `BTreeMap` keeps the serialized form deterministic, so rebuilding the
/// list from unchanged backend state yields byte-identical cache files.
pub type OrganisationList = BTreeMap<String, Vec<OrganisationListEntry>>;

/// Extract the organisation code from a building facet value
///
/// Building facet values wrap the code in a fixed `0/.../` hierarchy marker.
/// Values not matching the pattern yield `None`.
pub fn organisation_info_id(value: &str) -> Option<String> {
    let re = Regex::new(r"^0/([^/]*)/$").unwrap();
    re.captures(value).map(|caps| caps[1].to_string())
}

/// Extract the sector key from a `sector_str_mv` facet value
///
/// Values have the form `/sector/.../`: the first and last segments
/// (typically empty) are stripped and the middle segments joined by `/`.
pub fn sector_key(facet_value: &str) -> Option<String> {
    let segments: Vec<&str> = facet_value.split('/').collect();
    if segments.len() < 3 {
        return None;
    }
    let middle = &segments[1..segments.len() - 1];
    if middle.iter().all(|segment| segment.is_empty()) {
        return None;
    }
    Some(middle.join("/"))
}

/// Filter expression that restricts a query to one building facet value
pub fn building_facet_filter(value: &str) -> String {
    format!("building:\"{value}\"")
}

/// Filter expression that restricts a query to one sector facet value
pub fn sector_facet_filter(value: &str) -> String {
    format!("sector_str_mv:\"{value}\"")
}

/// Collect every sector an organisation appears under
///
/// Building codes are compared case-insensitively. An organisation absent
/// from every sector defaults to `["lib"]`.
pub fn sectors_for_organisation(list: &OrganisationList, id: &str) -> Vec<String> {
    let needle = id.to_lowercase();
    let mut sectors: Vec<String> = Vec::new();

    for (sector, entries) in list {
        let found = entries.iter().any(|entry| {
            entry
                .organisation
                .as_deref()
                .is_some_and(|organisation| organisation.to_lowercase() == needle)
        });
        if found {
            sectors.push(sector.clone());
        }
    }

    if sectors.is_empty() {
        sectors.push(DEFAULT_SECTOR.to_string());
    }
    sectors
}

/// The two external organisation info providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Museum,
    LibraryDirectory,
}

/// Route a sector set to an info provider
///
/// Membership of `mus` selects the museum provider; every other sector set,
/// including the `["lib"]` fallback, routes to the library directory.
pub fn provider_for_sectors(sectors: &[String]) -> ProviderKind {
    if sectors.iter().any(|sector| sector == "mus") {
        ProviderKind::Museum
    } else {
        ProviderKind::LibraryDirectory
    }
}
