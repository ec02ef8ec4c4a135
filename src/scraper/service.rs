//! Service facade over the scraping operations

use crate::config::Config;
use crate::extract::{normalize_screenshot_set, version_matches};
use crate::fetch::{FetchClient, RetryPolicy};
use crate::model::{ModDependency, ModFileRecord, ModSummary};
use crate::parsers::{depends, details, embedded, listing as listing_parser};
use crate::scraper::{listing, resolver};
use crate::Result;
use url::Url;

/// Owns the retry-aware fetch client and the scrape configuration.
///
/// Every operation creates its records per call; nothing persists on the
/// service between calls.
pub struct ScraperService {
    config: Config,
    client: FetchClient,
}

impl ScraperService {
    /// Creates a service from a validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = FetchClient::with_retry(
            &config.site,
            &config.fetch,
            RetryPolicy::from_config(&config.retry),
        )?;
        Ok(Self { config, client })
    }

    /// Builds the listing URL for a page, optionally with a search query.
    ///
    /// Spaces in the search term encode as `+`.
    pub fn listing_url(&self, page: u32, search: Option<&str>) -> String {
        let url = format!(
            "{}/{}/page/{}/",
            self.config.site.base_url.trim_end_matches('/'),
            self.config.site.category,
            page
        );
        match search {
            Some(term) if !term.is_empty() => {
                format!("{}?q={}", url, term.replace(' ', "+"))
            }
            _ => url,
        }
    }

    /// Scrapes one listing page and fans out per-mod detail fetches.
    ///
    /// A listing fetch failure is the one hard error of this call; detail
    /// failures degrade to summaries without details.
    pub async fn list_mods(&self, page: u32, search: Option<&str>) -> Result<Vec<ModSummary>> {
        let url = self.listing_url(page, search);
        tracing::info!("Scraping mod listing: {}", url);

        let body = self.client.fetch_page(&url).await?;
        let base = Url::parse(&url)?;
        let mut mods = listing_parser::parse_listing(&body, &base);
        tracing::info!("Found {} mods on page {}", mods.len(), page);

        listing::fan_out_details(&self.client, &self.config.scrape, &mut mods).await;
        Ok(mods)
    }

    /// Fully populates one mod from its own page.
    ///
    /// Download rows are filtered to the target versions; screenshots are
    /// normalized; dependency stubs come from the requirements list.
    pub async fn get_mod_details(
        &self,
        page_url: &str,
        target_versions: &[String],
    ) -> Result<ModSummary> {
        let body = self.client.fetch_page(page_url).await?;
        let base = Url::parse(page_url)?;

        let (name, versions) = details::parse_heading(&body).unwrap_or_default();
        let downloads = details::parse_download_rows(&body, &base)
            .into_iter()
            .filter(|row| version_matches(&row.version, target_versions))
            .collect();

        Ok(ModSummary {
            name,
            versions,
            page_link: page_url.to_string(),
            downloads,
            screenshots: normalize_screenshot_set(&details::parse_screenshots(&body, &base)),
            dependencies: depends::parse_sub_dependencies(&body, &base),
            ..ModSummary::default()
        })
    }

    /// Projects the raw embedded file records of one mod page.
    pub async fn mod_file_records(&self, page_url: &str) -> Result<Vec<ModFileRecord>> {
        let body = self.client.fetch_page(page_url).await?;
        let base = Url::parse(page_url)?;
        Ok(embedded::parse_file_records(&body, &base))
    }

    /// Resolves dependency stubs against the target version set.
    ///
    /// Returns the stubs in their original order, populated in place with
    /// filtered downloads and recursively discovered sub-dependencies.
    pub async fn resolve_dependencies(
        &self,
        stubs: Vec<ModDependency>,
        target_versions: &[String],
    ) -> Result<Vec<ModDependency>> {
        tracing::info!("Resolving {} dependency stubs", stubs.len());
        Ok(resolver::resolve(&self.client, &self.config.scrape, stubs, target_versions).await)
    }
}

/// Keeps the mods supporting a game version, sorting each match's version
/// list lexically.
pub fn filter_by_version(mods: &[ModSummary], version: &str) -> Vec<ModSummary> {
    mods.iter()
        .filter(|summary| summary.versions.iter().any(|v| v == version))
        .map(|summary| {
            let mut summary = summary.clone();
            summary.versions.sort();
            summary
        })
        .collect()
}

/// Keeps the mods available for a loader.
pub fn filter_by_loader(mods: &[ModSummary], loader: &str) -> Vec<ModSummary> {
    mods.iter()
        .filter(|summary| summary.loaders.iter().any(|l| l == loader))
        .cloned()
        .collect()
}
