//! Sub-dependency parser
//!
//! A mod page lists its requirements as an ordered list in the content
//! region. Entries for the base game and the default loaders are implicit
//! (every mod has them) and are not dependencies to resolve.

use crate::model::ModDependency;
use crate::parsers::absolutize;
use scraper::{Html, Selector};
use url::Url;

/// Visible texts that name the base game or a loader, not a real dependency
const IMPLICIT_ENTRIES: &[&str] = &[".minecraft", "Minecraft Forge", "Fabric"];

/// Site path that real mod pages live under
const MODS_PATH_PREFIX: &str = "/mods";

/// Extracts dependency stubs from a mod page's requirements list.
///
/// Takes the first anchor of each item in the first ordered list under the
/// content region, skips implicit entries, and keeps only links that
/// resolve to the site's mods path.
pub fn parse_sub_dependencies(html: &str, base: &Url) -> Vec<ModDependency> {
    let document = Html::parse_document(html);
    let mut stubs = Vec::new();

    let list_selector = match Selector::parse("div.box__body ol") {
        Ok(s) => s,
        Err(_) => return stubs,
    };
    let item_selector = match Selector::parse("li") {
        Ok(s) => s,
        Err(_) => return stubs,
    };
    let anchor_selector = match Selector::parse("a") {
        Ok(s) => s,
        Err(_) => return stubs,
    };

    let list = match document.select(&list_selector).next() {
        Some(list) => list,
        None => return stubs,
    };

    for item in list.select(&item_selector) {
        let anchor = match item.select(&anchor_selector).next() {
            Some(a) => a,
            None => continue,
        };

        let text = anchor.text().collect::<String>().trim().to_string();
        if text.is_empty() || IMPLICIT_ENTRIES.contains(&text.as_str()) {
            continue;
        }

        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        let link = match absolutize(href, base) {
            Some(link) => link,
            None => continue,
        };

        if !on_mods_path(&link, base) {
            continue;
        }

        stubs.push(ModDependency::stub(link, text));
    }

    stubs
}

/// Whether a resolved link is a mod page on the scraped site.
fn on_mods_path(link: &str, base: &Url) -> bool {
    match Url::parse(link) {
        Ok(url) => {
            url.host_str() == base.host_str() && url.path().starts_with(MODS_PATH_PREFIX)
        }
        Err(_) => false,
    }
}
