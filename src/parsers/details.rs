//! Detail-page parsers: download rows and screenshots
//!
//! A mod's own page lists downloadable files as table rows and screenshots
//! as gallery images under the content region.

use crate::extract::{
    dedup_preserving_order, extract_bracketed_versions, parse_download_count, parse_version,
    split_name_and_version_tags,
};
use crate::model::DownloadOption;
use crate::parsers::absolutize;
use scraper::{Html, Selector};
use url::Url;

/// One download-row cell per file
const ROW_SELECTOR: &str = "td.dl__info";

/// Gallery images live under either content-region wrapper
const SCREENSHOT_SELECTOR: &str =
    "div.box__body img[src*='/uploads/files/'], div.entry-content img[src*='/uploads/files/']";

/// Thumbnail variants are skipped; the normalizer derives preview URLs
const THUMBNAIL_MARKER: &str = "/mini/";

/// Extracts the mod name and bracketed versions from a detail page heading.
///
/// Detail headings carry the same "Name [1.19] [1.20]" layout as listing
/// titles. Returns None when the page has no usable heading.
pub fn parse_heading(html: &str) -> Option<(String, Vec<String>)> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;

    let full_title = heading.text().collect::<String>().trim().to_string();
    let (name, version_tags) = split_name_and_version_tags(&full_title, '[');
    if name.is_empty() {
        return None;
    }

    Some((name, dedup_preserving_order(&extract_bracketed_versions(&version_tags))))
}

/// Parses every download row on a mod page, in document order.
///
/// A row yields a [`DownloadOption`] only when it carries a non-empty link.
/// Several loader tags on one row are joined with ", ".
pub fn parse_download_rows(html: &str, base: &Url) -> Vec<DownloadOption> {
    let document = Html::parse_document(html);
    let mut downloads = Vec::new();

    let row_selector = match Selector::parse(ROW_SELECTOR) {
        Ok(s) => s,
        Err(_) => return downloads,
    };

    for row in document.select(&row_selector) {
        let url = Selector::parse("a")
            .ok()
            .and_then(|selector| {
                row.select(&selector)
                    .next()
                    .and_then(|anchor| anchor.value().attr("href"))
                    .and_then(|href| absolutize(href, base))
            })
            .unwrap_or_default();

        if url.is_empty() {
            continue;
        }

        let version = Selector::parse("span.dl__name")
            .ok()
            .and_then(|selector| row.select(&selector).next())
            .map(|span| parse_version(&span.text().collect::<String>()))
            .unwrap_or_default();

        let download_count = Selector::parse("span.dl__link")
            .ok()
            .and_then(|selector| {
                row.select(&selector)
                    .next()
                    .and_then(|span| span.value().attr("title"))
            })
            .map(parse_download_count)
            .unwrap_or_default();

        let loader = Selector::parse("span.dl__loader")
            .ok()
            .map(|selector| {
                row.select(&selector)
                    .map(|span| span.text().collect::<String>().trim().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        downloads.push(DownloadOption {
            url,
            version,
            loader,
            download_count,
        });
    }

    downloads
}

/// Collects screenshot URLs from a mod page's content region.
///
/// Keeps images whose source path carries the uploads marker but not the
/// thumbnail marker, absolutized, first occurrence only.
pub fn parse_screenshots(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut screenshots: Vec<String> = Vec::new();

    if let Ok(selector) = Selector::parse(SCREENSHOT_SELECTOR) {
        for img in document.select(&selector) {
            let src = match img.value().attr("src") {
                Some(src) => src,
                None => continue,
            };
            if src.contains(THUMBNAIL_MARKER) {
                continue;
            }
            if let Some(absolute) = absolutize(src, base) {
                if !screenshots.contains(&absolute) {
                    screenshots.push(absolute);
                }
            }
        }
    }

    screenshots
}
