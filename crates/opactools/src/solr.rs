//! Facet query client for the Solr search backend
//!
//! The directory only consumes facet counts, never result rows: every query
//! runs with `rows=0`, an unlimited facet value count, and highlighting,
//! spellcheck and index deduplication disabled. Backend failures are logged
//! and propagated unchanged; the caller decides how to degrade.

use crate::prelude::*;
use opactools_core::facets::{parse_facet_counts, FacetValue};

/// Solr backend configuration from environment variables
#[derive(Debug, Clone)]
pub struct SolrConfig {
    pub base_url: String,
    pub core: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SolrConfig {
    /// Default Solr core for bibliographic records
    pub const DEFAULT_CORE: &'static str = "biblio";

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("SOLR_BASE_URL")
                .map_err(|_| eyre!("SOLR_BASE_URL environment variable not set"))?,
            core: std::env::var("SOLR_CORE").unwrap_or_else(|_| Self::DEFAULT_CORE.to_string()),
            username: std::env::var("SOLR_USERNAME").ok(),
            password: std::env::var("SOLR_PASSWORD").ok(),
        })
    }

    /// Select handler URL, tolerating a trailing slash on the base URL
    pub fn select_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{}/select", self.core)
    }
}

/// Create an HTTP client for Solr, with Basic Auth when credentials are set
pub fn create_solr_client(config: &SolrConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        use base64::Engine;
        let auth_string = format!("{username}:{password}");
        let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {auth_encoded}"))
                .map_err(|e| eyre!("Invalid header value: {}", e))?,
        );
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// One facet enumeration request
#[derive(Debug, Clone, Default)]
pub struct FacetQuery {
    pub field: String,
    pub prefix: Option<String>,
    pub filter: Option<String>,
    pub hidden_filters: Vec<String>,
}

/// Query parameters for a facet enumeration
fn build_facet_params(query: &FacetQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("q".to_string(), "*:*".to_string()),
        ("wt".to_string(), "json".to_string()),
        ("rows".to_string(), "0".to_string()),
        ("facet".to_string(), "true".to_string()),
        ("facet.field".to_string(), query.field.clone()),
        ("facet.limit".to_string(), "-1".to_string()),
        ("facet.sort".to_string(), "index".to_string()),
        ("facet.mincount".to_string(), "1".to_string()),
        ("hl".to_string(), "false".to_string()),
        ("spellcheck".to_string(), "false".to_string()),
        ("finna.deduplication".to_string(), "0".to_string()),
    ];

    if let Some(prefix) = &query.prefix {
        params.push(("facet.prefix".to_string(), prefix.clone()));
    }
    if let Some(filter) = &query.filter {
        params.push(("fq".to_string(), filter.clone()));
    }
    for hidden in &query.hidden_filters {
        params.push(("fq".to_string(), hidden.clone()));
    }

    params
}

/// Fetch the facet counts for a field
pub async fn facet_values(
    client: &reqwest::Client,
    config: &SolrConfig,
    query: &FacetQuery,
) -> Result<Vec<FacetValue>> {
    let url = config.select_url();
    let params = build_facet_params(query);

    log::debug!("facet query {} field={}", url, query.field);

    let response = client
        .get(&url)
        .query(&params)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Failed to send request to Solr: {e}")))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        log::error!("Solr facet query failed [{}]: {}", status, body);
        return Err(Error::Backend { status, body }.into());
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse Solr response: {}", e))?;

    parse_facet_counts(&body, &query.field).map_err(|e| eyre!("{}", e))
}
