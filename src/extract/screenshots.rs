//! Screenshot URL normalization
//!
//! Screenshot links on mod pages point at gallery thumbnails. The site
//! serves larger previews from a sibling "thumb" path for raster images,
//! while animated previews live at the path without the "mini" segment.

use std::collections::HashSet;

/// How many screenshots a record keeps; older entries beyond this are
/// dropped from the front (the site lists newest last).
const MAX_SCREENSHOTS: usize = 5;

/// Removes duplicate URLs, keeping the first occurrence of each.
pub fn dedup_preserving_order(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for url in urls {
        if seen.insert(url.as_str()) {
            result.push(url.clone());
        }
    }
    result
}

/// Normalizes a collected screenshot set.
///
/// Deduplicates, rewrites each entry's thumbnail path segment (once per
/// entry: "mini" becomes "thumb" for png/jpg, "/mini" is dropped for gif),
/// and keeps only the last [`MAX_SCREENSHOTS`] entries.
pub fn normalize_screenshot_set(urls: &[String]) -> Vec<String> {
    let rewritten: Vec<String> = dedup_preserving_order(urls)
        .into_iter()
        .map(|url| match url.rsplit('.').next() {
            Some("png") | Some("jpg") => url.replacen("mini", "thumb", 1),
            Some("gif") => url.replacen("/mini", "", 1),
            _ => url,
        })
        .collect();

    // Rewrites can collapse two source URLs into one target
    let mut unique = dedup_preserving_order(&rewritten);
    if unique.len() > MAX_SCREENSHOTS {
        unique.drain(..unique.len() - MAX_SCREENSHOTS);
    }
    unique
}
