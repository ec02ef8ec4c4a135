//! Transitive dependency resolution
//!
//! Resolution works over an arena of records keyed by canonical page URL,
//! shared behind a single lock. Every top-level stub is registered before
//! any fetch is dispatched, so a concurrent page handler always finds a
//! live target entry. Pages are visited in waves: each wave dispatches one
//! fully concurrent visit per link discovered by the previous wave, and a
//! whole-call visited set guarantees no link is entered twice, making the
//! discovery graph a DAG even when the site's dependency lists loop.

use crate::config::ScrapeConfig;
use crate::fetch::FetchClient;
use crate::model::{DownloadOption, ModDependency};
use crate::parsers::{depends, embedded};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use url::Url;

/// Shared state of one resolution call
struct ResolutionState {
    /// Every record discovered this call, keyed by page link
    entries: HashMap<String, ModDependency>,

    /// Links ever dispatched or registered; never re-entered
    visited: HashSet<String>,
}

/// What one page visit extracted
struct PageVisit {
    downloads: Vec<DownloadOption>,
    sub_stubs: Vec<ModDependency>,
}

/// Resolves a stub sequence against the target version set.
///
/// Returns the stubs in their original order, each populated with
/// version-filtered downloads and recursively discovered sub-dependencies
/// up to `max_dependency_depth` waves. Per-page failures leave the
/// affected entry unpopulated; the batch always completes.
pub(crate) async fn resolve(
    client: &FetchClient,
    config: &ScrapeConfig,
    stubs: Vec<ModDependency>,
    targets: &[String],
) -> Vec<ModDependency> {
    let order: Vec<String> = stubs.iter().map(|stub| stub.page_link.clone()).collect();

    // Stub registration precedes any dispatch
    let mut entries = HashMap::new();
    let mut visited = HashSet::new();
    let mut wave: Vec<String> = Vec::new();
    for stub in stubs {
        if visited.insert(stub.page_link.clone()) {
            if !stub.page_link.is_empty() {
                wave.push(stub.page_link.clone());
            }
            entries.insert(stub.page_link.clone(), stub);
        }
    }

    let state = Arc::new(Mutex::new(ResolutionState { entries, visited }));

    let mut depth = 0;
    while !wave.is_empty() && depth < config.max_dependency_depth {
        tracing::debug!("Resolving dependency wave {} ({} pages)", depth, wave.len());

        let mut visits: JoinSet<Vec<String>> = JoinSet::new();
        for link in wave.drain(..) {
            let client = client.clone();
            let targets = targets.to_vec();
            let state = Arc::clone(&state);
            visits.spawn(async move {
                let visit = match visit_page(&client, &link, &targets).await {
                    Some(visit) => visit,
                    None => return Vec::new(),
                };
                merge_visit(&state, &link, visit)
            });
        }

        let mut next_wave = Vec::new();
        while let Some(joined) = visits.join_next().await {
            match joined {
                Ok(fresh_links) => next_wave.extend(fresh_links),
                Err(e) => tracing::warn!("Dependency visit panicked: {}", e),
            }
        }

        wave = next_wave;
        depth += 1;
    }

    if !wave.is_empty() {
        tracing::info!(
            "Dependency depth limit {} reached with {} pages unvisited",
            config.max_dependency_depth,
            wave.len()
        );
    }

    let guard = state.lock().unwrap();
    order
        .iter()
        .map(|link| materialize(&guard.entries, link, &mut HashSet::new()))
        .collect()
}

/// Fetches one dependency page and runs its parsers.
async fn visit_page(client: &FetchClient, link: &str, targets: &[String]) -> Option<PageVisit> {
    let page_url = match Url::parse(link) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Bad dependency link {}: {}", link, e);
            return None;
        }
    };

    let body = match client.fetch_page(link).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Dependency page {} failed: {}", link, e);
            return None;
        }
    };

    Some(PageVisit {
        downloads: embedded::parse_embedded_downloads(&body, &page_url, targets),
        sub_stubs: depends::parse_sub_dependencies(&body, &page_url),
    })
}

/// Merges one visit's records into the shared state.
///
/// Returns the links that were never seen before and so belong to the next
/// wave. Only the resolver grows the key set; the entry targeted by a visit
/// was registered before the visit was dispatched.
fn merge_visit(state: &Mutex<ResolutionState>, link: &str, visit: PageVisit) -> Vec<String> {
    let mut guard = state.lock().unwrap();
    let mut fresh = Vec::new();

    for sub in visit.sub_stubs {
        if let Some(parent) = guard.entries.get_mut(link) {
            parent.sub_dependencies.push(sub.clone());
        }
        if guard.visited.insert(sub.page_link.clone()) {
            fresh.push(sub.page_link.clone());
            guard.entries.insert(sub.page_link.clone(), sub);
        }
    }

    if let Some(entry) = guard.entries.get_mut(link) {
        entry.downloads = visit.downloads;
    }

    fresh
}

/// Expands one arena entry into a nested record.
///
/// Sub-dependency stubs are replaced by their arena entries; a link already
/// on the expansion path is attached as a bare stub so back-edges cannot
/// loop the walk.
fn materialize(
    entries: &HashMap<String, ModDependency>,
    link: &str,
    path: &mut HashSet<String>,
) -> ModDependency {
    let entry = match entries.get(link) {
        Some(entry) => entry,
        None => return ModDependency::stub(link, ""),
    };

    if !path.insert(link.to_string()) {
        return ModDependency::stub(entry.page_link.clone(), entry.name.clone());
    }

    let mut node = entry.clone();
    node.sub_dependencies = entry
        .sub_dependencies
        .iter()
        .map(|sub| materialize(entries, &sub.page_link, path))
        .collect();

    path.remove(link);
    node
}
