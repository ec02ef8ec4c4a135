//! Detail fan-out for listing scrapes
//!
//! After a listing page yields its summaries, every mod's own page is
//! fetched by a bounded worker pool. Workers pace themselves with a fixed
//! delay before each fetch, return extracted records, and the caller merges
//! them into the summary they were paired with by index. One worker failing
//! never cancels its siblings; the affected summary simply keeps empty
//! details.

use crate::config::ScrapeConfig;
use crate::extract::normalize_screenshot_set;
use crate::fetch::FetchClient;
use crate::model::{DownloadOption, ModSummary};
use crate::parsers::details;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Records one worker brings back for the summary at `index`
type WorkerYield = Option<(usize, Vec<DownloadOption>, Vec<String>)>;

/// Populates download rows and screenshots for every summary in place.
pub(crate) async fn fan_out_details(
    client: &FetchClient,
    config: &ScrapeConfig,
    mods: &mut [ModSummary],
) {
    let semaphore = Arc::new(Semaphore::new(config.worker_pool_size as usize));
    let pacing = config.detail_delay();
    let mut workers: JoinSet<WorkerYield> = JoinSet::new();

    for (index, summary) in mods.iter().enumerate() {
        if summary.page_link.is_empty() {
            tracing::warn!("Mod '{}' has no page link, skipping details", summary.name);
            continue;
        }

        let semaphore = Arc::clone(&semaphore);
        let client = client.clone();
        let link = summary.page_link.clone();
        let name = summary.name.clone();

        workers.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            tokio::time::sleep(pacing).await;

            let page_url = match Url::parse(&link) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Bad page link for '{}': {}", name, e);
                    return None;
                }
            };

            let body = match client.fetch_page(&link).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Detail fetch failed for '{}': {}", name, e);
                    return None;
                }
            };

            let downloads = details::parse_download_rows(&body, &page_url);
            let screenshots = normalize_screenshot_set(&details::parse_screenshots(&body, &page_url));
            tracing::debug!("Scraped details for '{}': {} files", name, downloads.len());
            Some((index, downloads, screenshots))
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Some((index, downloads, screenshots))) => {
                if let Some(summary) = mods.get_mut(index) {
                    summary.downloads = downloads;
                    summary.screenshots = screenshots;
                }
            }
            Ok(None) => {} // failure already logged by the worker
            Err(e) => tracing::warn!("Detail worker panicked: {}", e),
        }
    }
}
