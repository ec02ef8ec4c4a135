//! Mod-summary parser for listing pages
//!
//! A listing page carries one entry block per mod. The entry title encodes
//! both the mod name and its bracketed game versions ("Iron Chests [1.19]
//! [1.20]"), loaders appear as icon title attributes, and the description
//! leads with a site boilerplate phrase that gets stripped.

use crate::extract::{
    clean_description, dedup_preserving_order, extract_bracketed_versions,
    split_name_and_version_tags,
};
use crate::model::ModSummary;
use crate::parsers::absolutize;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One listing entry block per mod
const ENTRY_SELECTOR: &str = "div.box.box_grass.post";

/// Parses a listing page into mod summaries, in document order.
///
/// Entries that fail to yield a name are discarded.
pub fn parse_listing(html: &str, base: &Url) -> Vec<ModSummary> {
    let document = Html::parse_document(html);
    let mut mods = Vec::new();

    if let Ok(entry_selector) = Selector::parse(ENTRY_SELECTOR) {
        for entry in document.select(&entry_selector) {
            if let Some(summary) = parse_entry(entry, base) {
                mods.push(summary);
            }
        }
    }

    mods
}

/// Parses one listing entry block.
fn parse_entry(entry: ElementRef, base: &Url) -> Option<ModSummary> {
    let title_selector = Selector::parse("h2.box__title a").ok()?;
    let title_anchor = entry.select(&title_selector).next()?;

    let full_title = title_anchor.text().collect::<String>().trim().to_string();
    let (name, version_tags) = split_name_and_version_tags(&full_title, '[');
    if name.is_empty() {
        return None;
    }

    let page_link = title_anchor
        .value()
        .attr("href")
        .and_then(|href| absolutize(href, base))
        .unwrap_or_default();

    let icon = Selector::parse("a.post__cover img")
        .ok()
        .and_then(|selector| {
            entry
                .select(&selector)
                .next()
                .and_then(|img| img.value().attr("src"))
                .and_then(|src| absolutize(src, base))
        })
        .unwrap_or_default();

    let loaders = Selector::parse("i.icon")
        .ok()
        .map(|selector| {
            entry
                .select(&selector)
                .filter_map(|icon| icon.value().attr("title"))
                .map(|title| title.to_string())
                .collect()
        })
        .unwrap_or_default();

    let description = Selector::parse("div.box__body > div:first-child")
        .ok()
        .and_then(|selector| entry.select(&selector).next())
        .map(|div| clean_description(&div.text().collect::<String>(), &name))
        .unwrap_or_default();

    Some(ModSummary {
        name,
        icon,
        page_link,
        description,
        versions: dedup_preserving_order(&extract_bracketed_versions(&version_tags)),
        loaders,
        ..ModSummary::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://minecraft-inside.ru/mods/page/1/").unwrap()
    }

    fn entry_html(title: &str) -> String {
        format!(
            r#"<html><body>
            <div class="box box_grass post">
                <h2 class="box__title"><a href="/mods/1-iron.html">{title}</a></h2>
                <a class="post__cover" href="/mods/1-iron.html"><img src="/uploads/icons/iron.png"></a>
                <i class="icon" title="Forge"></i>
                <i class="icon" title="Fabric"></i>
                <div class="box__body">
                    <div>Iron Chests добавляет новые сундуки.</div>
                </div>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_entry_fields() {
        let html = entry_html("Iron Chests [1.19.2] [1.20.1]");
        let mods = parse_listing(&html, &base());

        assert_eq!(mods.len(), 1);
        let summary = &mods[0];
        assert_eq!(summary.name, "Iron Chests");
        assert_eq!(summary.versions, vec!["1.19.2", "1.20.1"]);
        assert_eq!(summary.loaders, vec!["Forge", "Fabric"]);
        assert_eq!(
            summary.page_link,
            "https://minecraft-inside.ru/mods/1-iron.html"
        );
        assert_eq!(
            summary.icon,
            "https://minecraft-inside.ru/uploads/icons/iron.png"
        );
        assert_eq!(summary.description, "новые сундуки.");
    }

    #[test]
    fn test_title_without_brackets() {
        let mods = parse_listing(&entry_html("Iron Chests"), &base());
        assert_eq!(mods[0].name, "Iron Chests");
        assert!(mods[0].versions.is_empty());
    }

    #[test]
    fn test_duplicate_versions_collapse() {
        let mods = parse_listing(&entry_html("Iron Chests [1.20.1] [1.20.1]"), &base());
        assert_eq!(mods[0].versions, vec!["1.20.1"]);
    }

    #[test]
    fn test_nameless_entry_discarded() {
        let mods = parse_listing(&entry_html("[1.20.1]"), &base());
        assert!(mods.is_empty());
    }

    #[test]
    fn test_entries_in_document_order() {
        let html = r#"<html><body>
            <div class="box box_grass post">
                <h2 class="box__title"><a href="/mods/1-a.html">Alpha [1.20]</a></h2>
            </div>
            <div class="box box_grass post">
                <h2 class="box__title"><a href="/mods/2-b.html">Beta [1.20]</a></h2>
            </div>
        </body></html>"#;

        let mods = parse_listing(html, &base());
        assert_eq!(mods.len(), 2);
        assert_eq!(mods[0].name, "Alpha");
        assert_eq!(mods[1].name, "Beta");
    }

    #[test]
    fn test_page_without_entries() {
        assert!(parse_listing("<html><body></body></html>", &base()).is_empty());
    }
}
