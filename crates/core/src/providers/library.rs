//! Transformation functions for library-directory API responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{filter_schedules, Address, ConsortiumInfo, DaySchedule, LocationSummary, OrganisationDetails};

/// Library address from the API
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LibraryAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// One opening period within a day
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleTime {
    pub from: String,
    pub to: String,
}

/// Schedule for one day from the directory API
///
/// A day may carry several opening periods (self-service and staffed hours);
/// the transform keeps the overall span from first opening to last closing.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LibrarySchedule {
    pub date: NaiveDate,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub times: Vec<ScheduleTime>,
}

/// One library record from the directory API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LibraryRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<LibraryAddress>,
    #[serde(default)]
    pub schedules: Vec<LibrarySchedule>,
}

/// Library-directory search response
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<LibraryRecord>,
}

/// One consortium record from the directory API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConsortiumRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Consortium search response
#[derive(Debug, Deserialize, Clone)]
pub struct ConsortiumResponse {
    #[serde(default)]
    pub items: Vec<ConsortiumRecord>,
}

fn transform_address(address: Option<LibraryAddress>) -> Option<Address> {
    address.map(|address| Address {
        street: address.street,
        zipcode: address.zipcode,
        city: address.city,
    })
}

fn transform_schedules(schedules: Vec<LibrarySchedule>) -> Vec<DaySchedule> {
    schedules
        .into_iter()
        .map(|schedule| DaySchedule {
            date: schedule.date,
            closed: schedule.closed,
            opens: schedule.times.first().map(|time| time.from.clone()),
            closes: schedule.times.last().map(|time| time.to.clone()),
        })
        .collect()
}

/// Transform one library record into organisation details
pub fn transform_library_record(record: LibraryRecord) -> OrganisationDetails {
    OrganisationDetails {
        id: record.id.to_string(),
        name: record.name,
        homepage: record.homepage,
        email: record.email,
        phone: record.phone,
        address: transform_address(record.address),
        schedules: transform_schedules(record.schedules),
    }
}

/// Transform a lookup response into organisation details per library
pub fn transform_library_lookup(response: LibraryResponse) -> Vec<OrganisationDetails> {
    response.items.into_iter().map(transform_library_record).collect()
}

/// Transform a library record into details with schedules limited to a window
pub fn transform_library_details(
    record: LibraryRecord,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> OrganisationDetails {
    let mut details = transform_library_record(record);
    details.schedules = filter_schedules(details.schedules, start_date, end_date);
    details
}

/// Combine a consortium record with its member libraries
///
/// `location_filter` keeps only the named location ids; an empty filter
/// keeps every location.
pub fn transform_consortium(
    consortium: ConsortiumRecord,
    libraries: Vec<LibraryRecord>,
    location_filter: &[String],
) -> ConsortiumInfo {
    let locations = libraries
        .into_iter()
        .filter(|library| {
            location_filter.is_empty() || location_filter.contains(&library.id.to_string())
        })
        .map(|library| LocationSummary {
            id: library.id.to_string(),
            name: library.name,
            address: transform_address(library.address),
        })
        .collect();

    ConsortiumInfo {
        name: consortium.name,
        description: consortium.description,
        homepage: consortium.homepage,
        locations,
    }
}
