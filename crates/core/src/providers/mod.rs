//! Organisation info provider response transforms
//!
//! Two external providers serve organisation details, routed by sector: a
//! museum API and a library-directory API. This module holds the shared
//! output model; the per-provider submodules hold the response types and the
//! pure transformation functions from API data to that model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod library;
pub mod museum;

/// Street address of a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
}

/// Opening times for one calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub closed: bool,
    pub opens: Option<String>,
    pub closes: Option<String>,
}

/// Details for one organisation location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrganisationDetails {
    pub id: String,
    pub name: String,
    pub homepage: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub schedules: Vec<DaySchedule>,
}

/// One location inside a consortium
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub address: Option<Address>,
}

/// Consortium-level information
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConsortiumInfo {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub locations: Vec<LocationSummary>,
}

/// Keep schedules inside the optional date window
pub fn filter_schedules(
    schedules: Vec<DaySchedule>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<DaySchedule> {
    schedules
        .into_iter()
        .filter(|day| {
            start.is_none_or(|start| day.date >= start) && end.is_none_or(|end| day.date <= end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str) -> DaySchedule {
        DaySchedule {
            date: date.parse().unwrap(),
            closed: false,
            opens: Some("10:00".to_string()),
            closes: Some("18:00".to_string()),
        }
    }

    #[test]
    fn test_filter_schedules_window() {
        let schedules = vec![day("2026-08-01"), day("2026-08-05"), day("2026-08-10")];
        let filtered = filter_schedules(
            schedules,
            Some("2026-08-02".parse().unwrap()),
            Some("2026-08-09".parse().unwrap()),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date.to_string(), "2026-08-05");
    }

    #[test]
    fn test_filter_schedules_open_bounds() {
        let schedules = vec![day("2026-08-01"), day("2026-08-05")];

        let from_start = filter_schedules(schedules.clone(), Some("2026-08-05".parse().unwrap()), None);
        assert_eq!(from_start.len(), 1);

        let unbounded = filter_schedules(schedules, None, None);
        assert_eq!(unbounded.len(), 2);
    }
}
