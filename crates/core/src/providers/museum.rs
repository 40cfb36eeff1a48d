//! Transformation functions for museum API responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{filter_schedules, Address, ConsortiumInfo, DaySchedule, LocationSummary, OrganisationDetails};

/// Text localized per portal language
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LocalizedText {
    #[serde(default)]
    pub fi: Option<String>,
    #[serde(default)]
    pub sv: Option<String>,
    #[serde(default)]
    pub en: Option<String>,
}

impl LocalizedText {
    /// Text for a display language, falling back to Finnish
    pub fn for_language(&self, language: &str) -> Option<&str> {
        let preferred = match language {
            "sv" => self.sv.as_deref(),
            "en" => self.en.as_deref(),
            _ => self.fi.as_deref(),
        };
        preferred.or(self.fi.as_deref())
    }
}

/// Museum address from the API
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MuseumAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default, rename = "zip_code")]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Opening hours for one day from the museum API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MuseumOpeningDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// One museum record from the API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MuseumRecord {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub address: Option<MuseumAddress>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Vec<MuseumOpeningDay>,
}

/// Museum API lookup/search response
#[derive(Debug, Deserialize, Clone)]
pub struct MuseumResponse {
    #[serde(default)]
    pub museums: Vec<MuseumRecord>,
}

fn transform_address(address: Option<MuseumAddress>) -> Option<Address> {
    address.map(|address| Address {
        street: address.street,
        zipcode: address.zip_code,
        city: address.city,
    })
}

fn transform_schedules(opening_hours: Vec<MuseumOpeningDay>) -> Vec<DaySchedule> {
    opening_hours
        .into_iter()
        .map(|day| DaySchedule {
            date: day.date,
            closed: day.closed,
            opens: day.from,
            closes: day.to,
        })
        .collect()
}

/// Transform one museum record into organisation details
pub fn transform_museum_record(record: MuseumRecord, language: &str) -> OrganisationDetails {
    let name = record
        .name
        .for_language(language)
        .unwrap_or(record.id.as_str())
        .to_string();

    OrganisationDetails {
        name,
        id: record.id,
        homepage: record.website,
        email: record.email,
        phone: record.phone,
        address: transform_address(record.address),
        schedules: transform_schedules(record.opening_hours),
    }
}

/// Transform a lookup response into organisation details per museum
pub fn transform_museum_lookup(response: MuseumResponse, language: &str) -> Vec<OrganisationDetails> {
    response
        .museums
        .into_iter()
        .map(|record| transform_museum_record(record, language))
        .collect()
}

/// Transform a museum record into details with schedules limited to a window
pub fn transform_museum_details(
    record: MuseumRecord,
    language: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> OrganisationDetails {
    let mut details = transform_museum_record(record, language);
    details.schedules = filter_schedules(details.schedules, start_date, end_date);
    details
}

/// Consortium view of a museum record
///
/// The museum API has no consortium grouping; a museum stands for itself as
/// a single-location consortium.
pub fn transform_museum_consortium(record: MuseumRecord, language: &str) -> ConsortiumInfo {
    let description = record
        .description
        .as_ref()
        .and_then(|text| text.for_language(language))
        .map(str::to_string);
    let details = transform_museum_record(record, language);

    ConsortiumInfo {
        name: details.name.clone(),
        description,
        homepage: details.homepage.clone(),
        locations: vec![LocationSummary {
            id: details.id,
            name: details.name,
            address: details.address,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "museums": [
            {
                "id": "ateneum",
                "name": {"fi": "Ateneumin taidemuseo", "sv": "Konstmuseet Ateneum", "en": "Ateneum Art Museum"},
                "description": {"fi": "Taidemuseo Helsingin keskustassa"},
                "address": {"street": "Kaivokatu 2", "zip_code": "00100", "city": "Helsinki"},
                "email": "ateneum@example.fi",
                "phone": "+358 294 500 401",
                "website": "https://ateneum.fi",
                "opening_hours": [
                    {"date": "2026-08-05", "from": "10:00", "to": "18:00"},
                    {"date": "2026-08-06", "from": "10:00", "to": "20:00"},
                    {"date": "2026-08-07", "closed": true}
                ]
            },
            {
                "id": "kiasma",
                "name": {"fi": "Kiasma"}
            }
        ]
    }"#;

    fn fixture() -> MuseumResponse {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_lookup_transforms_all_records() {
        let museums = transform_museum_lookup(fixture(), "fi");
        assert_eq!(museums.len(), 2);
        assert_eq!(museums[0].name, "Ateneumin taidemuseo");
        assert_eq!(museums[1].name, "Kiasma");
        assert_eq!(museums[1].address, None);
    }

    #[test]
    fn test_lookup_localized_name() {
        let museums = transform_museum_lookup(fixture(), "en");
        assert_eq!(museums[0].name, "Ateneum Art Museum");
        // Missing translation falls back to Finnish.
        assert_eq!(museums[1].name, "Kiasma");
    }

    #[test]
    fn test_record_transform_maps_contact_fields() {
        let record = fixture().museums.remove(0);
        let details = transform_museum_record(record, "sv");

        assert_eq!(details.id, "ateneum");
        assert_eq!(details.name, "Konstmuseet Ateneum");
        assert_eq!(details.homepage, Some("https://ateneum.fi".to_string()));
        assert_eq!(details.email, Some("ateneum@example.fi".to_string()));
        let address = details.address.unwrap();
        assert_eq!(address.street, Some("Kaivokatu 2".to_string()));
        assert_eq!(address.zipcode, Some("00100".to_string()));
        assert_eq!(details.schedules.len(), 3);
        assert!(details.schedules[2].closed);
    }

    #[test]
    fn test_details_limits_schedules_to_window() {
        let record = fixture().museums.remove(0);
        let details = transform_museum_details(
            record,
            "fi",
            Some("2026-08-06".parse().unwrap()),
            Some("2026-08-06".parse().unwrap()),
        );

        assert_eq!(details.schedules.len(), 1);
        assert_eq!(details.schedules[0].closes, Some("20:00".to_string()));
    }

    #[test]
    fn test_consortium_is_single_location() {
        let record = fixture().museums.remove(0);
        let consortium = transform_museum_consortium(record, "fi");

        assert_eq!(consortium.name, "Ateneumin taidemuseo");
        assert_eq!(
            consortium.description,
            Some("Taidemuseo Helsingin keskustassa".to_string())
        );
        assert_eq!(consortium.locations.len(), 1);
        assert_eq!(consortium.locations[0].id, "ateneum");
    }
}
