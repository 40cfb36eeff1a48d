//! Sector-routed organisation info providers
//!
//! Two external APIs serve organisation information: a museum API for the
//! `mus` sector and a library-directory API for everything else. The
//! strategy is a plain enum selected by `provider_for_sectors`; response
//! decoding and shaping live in `opactools_core::providers`.

use chrono::NaiveDate;

use crate::prelude::*;
use opactools_core::organisations::ProviderKind;
use opactools_core::providers::library::{
    transform_consortium, transform_library_details, transform_library_lookup, ConsortiumResponse,
    LibraryResponse,
};
use opactools_core::providers::museum::{
    transform_museum_consortium, transform_museum_details, transform_museum_lookup, MuseumResponse,
};
use opactools_core::providers::{ConsortiumInfo, OrganisationDetails};

/// Museum API configuration from environment variables
#[derive(Debug, Clone)]
pub struct MuseumConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl MuseumConfig {
    /// Default museum API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://museot.fi/api/v1";

    /// Load configuration, falling back to the public API
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("MUSEUM_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("MUSEUM_API_KEY").ok(),
        }
    }
}

/// Library-directory API configuration from environment variables
#[derive(Debug, Clone)]
pub struct LibraryDirectoryConfig {
    pub base_url: String,
}

impl LibraryDirectoryConfig {
    /// Default library-directory API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://api.kirjastot.fi/v4";

    /// Load configuration, falling back to the public API
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("LIBRARY_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// The info provider selected for an organisation's sector set
pub enum Provider {
    Museum(MuseumProvider),
    LibraryDirectory(LibraryDirectoryProvider),
}

impl Provider {
    /// Construct the provider selected by sector routing
    pub fn for_kind(kind: ProviderKind, language: &str) -> Result<Self> {
        Ok(match kind {
            ProviderKind::Museum => Provider::Museum(MuseumProvider::new(language)?),
            ProviderKind::LibraryDirectory => {
                Provider::LibraryDirectory(LibraryDirectoryProvider::new(language)?)
            }
        })
    }

    /// Look up every location matching an organisation id
    pub async fn lookup(&self, id: &str) -> Result<Vec<OrganisationDetails>> {
        match self {
            Provider::Museum(provider) => provider.lookup(id).await,
            Provider::LibraryDirectory(provider) => provider.lookup(id).await,
        }
    }

    /// Consortium information for an organisation
    pub async fn consortium_info(&self, id: &str, locations: &[String]) -> Result<ConsortiumInfo> {
        match self {
            Provider::Museum(provider) => provider.consortium_info(id, locations).await,
            Provider::LibraryDirectory(provider) => provider.consortium_info(id, locations).await,
        }
    }

    /// Details for one location, schedules limited to an optional window
    pub async fn details(
        &self,
        id: &str,
        location: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<OrganisationDetails> {
        match self {
            Provider::Museum(provider) => provider.details(id, location, start_date, end_date).await,
            Provider::LibraryDirectory(provider) => {
                provider.details(id, location, start_date, end_date).await
            }
        }
    }
}

fn new_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Client for the museum API
pub struct MuseumProvider {
    client: reqwest::Client,
    config: MuseumConfig,
    language: String,
}

impl MuseumProvider {
    pub fn new(language: &str) -> Result<Self> {
        Ok(Self {
            client: new_http_client()?,
            config: MuseumConfig::from_env(),
            language: language.to_string(),
        })
    }

    async fn fetch(&self, id: &str) -> Result<MuseumResponse> {
        let url = format!("{}/museums", self.config.base_url.trim_end_matches('/'));

        let mut params = vec![("finna_org_id".to_string(), id.to_string())];
        if let Some(api_key) = &self.config.api_key {
            params.push(("apikey".to_string(), api_key.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch museum {id}: {e}")))?;

        if !response.status().is_success() {
            return Err(eyre!(
                "Museum API error [{}] for {}",
                response.status(),
                id
            ));
        }

        response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse museum response: {}", e))
    }

    pub async fn lookup(&self, id: &str) -> Result<Vec<OrganisationDetails>> {
        Ok(transform_museum_lookup(self.fetch(id).await?, &self.language))
    }

    pub async fn consortium_info(&self, id: &str, _locations: &[String]) -> Result<ConsortiumInfo> {
        let mut response = self.fetch(id).await?;
        if response.museums.is_empty() {
            return Err(eyre!("No museum found for id {}", id));
        }
        Ok(transform_museum_consortium(
            response.museums.remove(0),
            &self.language,
        ))
    }

    pub async fn details(
        &self,
        id: &str,
        location: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<OrganisationDetails> {
        let lookup_id = location.unwrap_or(id);
        let mut response = self.fetch(lookup_id).await?;
        if response.museums.is_empty() {
            return Err(eyre!("No museum found for id {}", lookup_id));
        }
        Ok(transform_museum_details(
            response.museums.remove(0),
            &self.language,
            start_date,
            end_date,
        ))
    }
}

/// Client for the library-directory API
pub struct LibraryDirectoryProvider {
    client: reqwest::Client,
    config: LibraryDirectoryConfig,
    language: String,
}

impl LibraryDirectoryProvider {
    pub fn new(language: &str) -> Result<Self> {
        Ok(Self {
            client: new_http_client()?,
            config: LibraryDirectoryConfig::from_env(),
            language: language.to_string(),
        })
    }

    async fn fetch_libraries(&self, mut params: Vec<(String, String)>) -> Result<LibraryResponse> {
        let url = format!("{}/library", self.config.base_url.trim_end_matches('/'));
        params.push(("lang".to_string(), self.language.clone()));
        params.push(("with".to_string(), "schedules".to_string()));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch libraries: {e}")))?;

        if !response.status().is_success() {
            return Err(eyre!("Library directory error [{}]", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse library response: {}", e))
    }

    async fn fetch_consortium(&self, id: &str) -> Result<ConsortiumResponse> {
        let url = format!("{}/consortium", self.config.base_url.trim_end_matches('/'));
        let params = vec![
            ("finna_org_id".to_string(), id.to_string()),
            ("lang".to_string(), self.language.clone()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch consortium {id}: {e}")))?;

        if !response.status().is_success() {
            return Err(eyre!(
                "Library directory error [{}] for {}",
                response.status(),
                id
            ));
        }

        response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse consortium response: {}", e))
    }

    pub async fn lookup(&self, id: &str) -> Result<Vec<OrganisationDetails>> {
        let params = vec![("finna_org_id".to_string(), id.to_string())];
        Ok(transform_library_lookup(self.fetch_libraries(params).await?))
    }

    pub async fn consortium_info(&self, id: &str, locations: &[String]) -> Result<ConsortiumInfo> {
        let mut consortium = self.fetch_consortium(id).await?;
        if consortium.items.is_empty() {
            return Err(eyre!("No consortium found for id {}", id));
        }
        let record = consortium.items.remove(0);

        let params = vec![("consortium".to_string(), record.id.to_string())];
        let libraries = self.fetch_libraries(params).await?;

        Ok(transform_consortium(record, libraries.items, locations))
    }

    pub async fn details(
        &self,
        id: &str,
        location: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<OrganisationDetails> {
        let lookup_id = location.unwrap_or(id);

        let mut params = vec![("finna_org_id".to_string(), lookup_id.to_string())];
        if let Some(start) = start_date {
            params.push(("period.start".to_string(), start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("period.end".to_string(), end.to_string()));
        }

        let mut response = self.fetch_libraries(params).await?;
        if response.items.is_empty() {
            return Err(eyre!("No library found for id {}", lookup_id));
        }

        Ok(transform_library_details(
            response.items.remove(0),
            start_date,
            end_date,
        ))
    }
}
