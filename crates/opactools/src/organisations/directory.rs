//! Request-scoped directory context
//!
//! One `Directory` instance corresponds to one request scope: the display
//! language is resolved once at construction and reused for cache keying,
//! collation, and provider routing. The organisation list itself is cached
//! per language in a file with an mtime TTL; concurrent rebuilds are
//! tolerated (last writer wins).

use std::path::PathBuf;

use colored::Colorize;
use futures::future::join_all;
use indicatif::ProgressBar;

use opactools_core::cache;
use opactools_core::config::PortalConfig;
use opactools_core::facets::{format_hierarchical_facet, FacetValue};
use opactools_core::language::resolve_language;
use opactools_core::organisations::{
    building_facet_filter, organisation_info_id, provider_for_sectors, sector_facet_filter,
    sector_key, sectors_for_organisation, OrganisationList, OrganisationListEntry, ProviderKind,
};

use crate::collate::{collator_for, sort_entries};
use crate::prelude::{eprintln, *};
use crate::solr::{create_solr_client, facet_values, FacetQuery, SolrConfig};

/// Facet field enumerating sectors, values of the form `/sector/.../`
pub const SECTOR_FACET_FIELD: &str = "sector_str_mv";

/// Facet field enumerating buildings, values of the form `0/<code>/`
pub const BUILDING_FACET_FIELD: &str = "building";

/// Top-level building facet prefix
pub const BUILDING_PREFIX: &str = "0/";

pub struct Directory {
    config: PortalConfig,
    solr: SolrConfig,
    client: reqwest::Client,
    language: String,
}

impl Directory {
    /// Build a directory context, resolving the display language once
    pub fn new(config: PortalConfig, language_override: Option<String>) -> Result<Self> {
        let solr = SolrConfig::from_env()?;
        let client = create_solr_client(&solr)?;

        let explicit = language_override.or_else(|| config.language.clone());
        let language = resolve_language(
            explicit.as_deref(),
            &ui_locale(&config.default_language),
            &config.languages,
            &config.default_language,
        );

        Ok(Self {
            config,
            solr,
            client,
            language,
        })
    }

    /// Display language resolved at construction
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Cache file for the resolved language
    pub fn cache_path(&self) -> Result<PathBuf> {
        let dir = match &self.config.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs_next::cache_dir()
                .ok_or_else(|| eyre!("Unable to determine cache directory"))?
                .join("opactools"),
        };
        Ok(dir.join(format!("organisations_list_{}.json", self.language)))
    }

    /// The sector-keyed organisation list, served from cache when fresh
    ///
    /// A cache-write failure is reported as a warning; the freshly built
    /// list is still returned.
    pub async fn organisations_list(&self, refresh: bool, progress: bool) -> Result<OrganisationList> {
        let path = self.cache_path()?;

        if !refresh {
            if let Some(raw) = cache::read_fresh(&path, self.config.cache_max_age()) {
                if let Ok(list) = serde_json::from_str::<OrganisationList>(&raw) {
                    log::debug!("organisations list served from {}", path.display());
                    return Ok(list);
                }
            }
        }

        let list = self.rebuild(progress).await?;

        let raw = serde_json::to_string(&list)?;
        if let Err(e) = cache::write(&path, &raw) {
            eprintln!(
                "{}",
                format!("Warning: Failed to write organisations list cache: {e}").yellow()
            );
        }

        Ok(list)
    }

    /// Rebuild the list from backend facets
    async fn rebuild(&self, progress: bool) -> Result<OrganisationList> {
        let sector_facets = facet_values(
            &self.client,
            &self.solr,
            &FacetQuery {
                field: SECTOR_FACET_FIELD.to_string(),
                prefix: None,
                filter: None,
                hidden_filters: self.config.hidden_filters.clone(),
            },
        )
        .await?;

        let sectors: Vec<(String, String)> = sector_facets
            .iter()
            .filter_map(|facet| sector_key(&facet.value).map(|key| (key, facet.value.clone())))
            .collect();

        let pb = if progress {
            ProgressBar::new(sectors.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let building_queries = sectors.iter().map(|(key, facet_value)| {
            let query = FacetQuery {
                field: BUILDING_FACET_FIELD.to_string(),
                prefix: Some(BUILDING_PREFIX.to_string()),
                filter: Some(sector_facet_filter(facet_value)),
                hidden_filters: self.config.hidden_filters.clone(),
            };
            let pb = pb.clone();
            async move {
                let values = facet_values(&self.client, &self.solr, &query).await;
                pb.inc(1);
                values.map(|values| (key.clone(), values))
            }
        });
        let results = join_all(building_queries).await;
        pb.finish_and_clear();

        let collator = collator_for(&self.language);
        let mut list = OrganisationList::new();
        for result in results {
            let (sector, values) = result?;
            let mut entries = entries_for_sector(&sector, values);
            sort_entries(&mut entries, collator.as_ref());
            list.insert(sector, entries);
        }

        Ok(list)
    }

    /// Every sector an organisation appears under, `["lib"]` when absent
    pub async fn sectors_for(&self, id: &str) -> Result<Vec<String>> {
        let list = self.organisations_list(false, false).await?;
        Ok(sectors_for_organisation(&list, id))
    }

    /// Resolve the info provider for an organisation
    ///
    /// An empty sector set is computed from the directory first; the
    /// resolved set is returned alongside the routing decision.
    pub async fn provider_for(
        &self,
        sectors: Vec<String>,
        id: &str,
    ) -> Result<(Vec<String>, ProviderKind)> {
        let sectors = if sectors.is_empty() {
            self.sectors_for(id).await?
        } else {
            sectors
        };
        let kind = provider_for_sectors(&sectors);
        Ok((sectors, kind))
    }
}

/// Build directory entries from building facet values for one sector
///
/// The backend display text wins when it differs from the raw value;
/// otherwise the hierarchical rendering of the value is used.
fn entries_for_sector(sector: &str, values: Vec<FacetValue>) -> Vec<OrganisationListEntry> {
    values
        .into_iter()
        .map(|facet| {
            let name = if facet.display_text == facet.value {
                format_hierarchical_facet(&facet.value)
            } else {
                facet.display_text
            };
            let link = format!(
                "{}={}",
                urlencoding::encode("filter[]"),
                urlencoding::encode(&building_facet_filter(&facet.value))
            );
            OrganisationListEntry {
                name,
                link,
                organisation: organisation_info_id(&facet.value),
                sector: sector.to_string(),
            }
        })
        .collect()
}

/// Active UI locale from the environment
fn ui_locale(default: &str) -> String {
    std::env::var("OPACTOOLS_LOCALE")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_for_sector() {
        let values = vec![
            FacetValue {
                value: "0/Helka/".to_string(),
                display_text: "0/Helka/".to_string(),
                count: 90,
            },
            FacetValue {
                value: "0/Piki/".to_string(),
                display_text: "PIKI-kirjastot".to_string(),
                count: 5,
            },
        ];

        let entries = entries_for_sector("lib", values);

        assert_eq!(entries.len(), 2);
        // Raw value equal to display text falls back to the hierarchical
        // rendering; a differing display text wins verbatim.
        assert_eq!(entries[0].name, "Helka");
        assert_eq!(entries[1].name, "PIKI-kirjastot");
        assert_eq!(entries[0].organisation, Some("Helka".to_string()));
        assert_eq!(entries[0].sector, "lib");
        assert_eq!(
            entries[0].link,
            "filter%5B%5D=building%3A%220%2FHelka%2F%22"
        );
    }

    #[test]
    fn test_entries_for_sector_unmatched_building_code() {
        let values = vec![FacetValue {
            value: "1/Helka/branch/".to_string(),
            display_text: "1/Helka/branch/".to_string(),
            count: 1,
        }];

        let entries = entries_for_sector("lib", values);
        assert_eq!(entries[0].organisation, None);
        assert_eq!(entries[0].name, "branch");
    }

    #[test]
    fn test_cache_path_is_keyed_by_language() {
        let directory = Directory {
            config: PortalConfig {
                cache_dir: Some(PathBuf::from("/var/cache/opactools")),
                ..PortalConfig::default()
            },
            solr: SolrConfig {
                base_url: "http://localhost:8983/solr".to_string(),
                core: "biblio".to_string(),
                username: None,
                password: None,
            },
            client: reqwest::Client::new(),
            language: "sv".to_string(),
        };

        assert_eq!(
            directory.cache_path().unwrap(),
            PathBuf::from("/var/cache/opactools/organisations_list_sv.json")
        );
    }
}
