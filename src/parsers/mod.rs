//! HTML-structure-aware page parsers
//!
//! Each parser is a pure mapping from one fetched page (plus the request
//! URL, for absolutizing relative links) to zero or more typed records:
//!
//! - [`listing::parse_listing`] - mod summaries from a listing page
//! - [`details::parse_download_rows`] / [`details::parse_screenshots`] -
//!   per-mod detail extraction
//! - [`embedded::parse_embedded_downloads`] /
//!   [`embedded::parse_file_records`] - the script-embedded file table
//! - [`depends::parse_sub_dependencies`] - dependency stubs
//!
//! Parsers never perform I/O and never mutate shared state; callers own
//! the returned records. A page missing the expected structure yields an
//! empty result, not an error.

pub mod depends;
pub mod details;
pub mod embedded;
pub mod listing;

use url::Url;

/// Resolves an href against the page URL and validates it.
///
/// Returns None for empty hrefs, non-link schemes (javascript:, mailto:,
/// tel:, data:), fragment-only anchors, and anything that does not resolve
/// to an http(s) URL.
pub(crate) fn absolutize(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://minecraft-inside.ru/mods/page/1/").unwrap()
    }

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize("/mods/123-thing.html", &base()),
            Some("https://minecraft-inside.ru/mods/123-thing.html".to_string())
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute() {
        assert_eq!(
            absolutize("https://minecraft-inside.ru/download/abc/", &base()),
            Some("https://minecraft-inside.ru/download/abc/".to_string())
        );
    }

    #[test]
    fn test_absolutize_rejects_scripts_and_fragments() {
        assert_eq!(absolutize("javascript:void(0)", &base()), None);
        assert_eq!(absolutize("#gallery", &base()), None);
        assert_eq!(absolutize("", &base()), None);
    }
}
