//! Text normalization for titles, version labels and tooltips
//!
//! The listing site renders version labels in a handful of layouts:
//! a localized "Для 1.20.1" prefix form, raw file names like
//! "1.20.1 1.2.3 Forge", and titles carrying bracketed version tags.
//! These helpers reduce all of them to the normalized forms the data
//! model stores.

/// Localized "For " prefix on download-row version labels
const VERSION_PREFIX: &str = "Для ";

/// Localized "Downloads:" marker inside row tooltips
const DOWNLOADS_MARKER: &str = "Скачиваний:";

/// Normalizes a version label from a download row or embedded file name.
///
/// Steps:
/// 1. Trim, and truncate at an embedded `<span` boundary if one leaked in.
/// 2. Strip the localized prefix.
/// 3. Pair the game version with its qualifier: labels with more than two
///    whitespace tokens reduce to `"first, third"` (the middle token is a
///    mod-version noise token). The prefix counts toward that token test,
///    so a prefixed `"Для 1.20.1 Forge"` still pairs up as
///    `"1.20.1, Forge"`, while a bare `"1.20 Forge"` keeps only `"1.20"`.
///
/// Single-token input passes through unchanged.
///
/// # Examples
///
/// ```
/// use modscout::extract::parse_version;
///
/// assert_eq!(parse_version("Для 1.20.1 Forge"), "1.20.1, Forge");
/// assert_eq!(parse_version("1.20.1"), "1.20.1");
/// ```
pub fn parse_version(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(idx) = text.find("<span") {
        text = text[..idx].trim_end();
    }

    let had_prefix = text.starts_with(VERSION_PREFIX);
    if had_prefix {
        text = &text[VERSION_PREFIX.len()..];
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.len() {
        0 => String::new(),
        1 => tokens[0].to_string(),
        2 if had_prefix => format!("{}, {}", tokens[0], tokens[1]),
        2 => tokens[0].to_string(),
        _ => format!("{}, {}", tokens[0], tokens[2]),
    }
}

/// Extracts the counter from a "Скачиваний: N" tooltip.
///
/// Returns an empty string when the tooltip lacks the marker; otherwise the
/// trimmed text after the first colon.
pub fn parse_download_count(tooltip: &str) -> String {
    if !tooltip.contains(DOWNLOADS_MARKER) {
        return String::new();
    }
    match tooltip.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => String::new(),
    }
}

/// Splits a listing title into the mod name and the trailing version tags.
///
/// The name is the trimmed prefix before the first `open` character; the
/// remainder starts at that character. Titles without the character yield
/// the whole (trimmed) title and an empty remainder.
pub fn split_name_and_version_tags(full_title: &str, open: char) -> (String, String) {
    match full_title.find(open) {
        Some(idx) => (
            full_title[..idx].trim().to_string(),
            full_title[idx..].to_string(),
        ),
        None => (full_title.trim().to_string(), String::new()),
    }
}

/// Collects the contents of every `[...]` pair, in encounter order.
///
/// Contents are trimmed; empty brackets are dropped. An unterminated
/// bracket ends the scan.
pub fn extract_bracketed_versions(remainder: &str) -> Vec<String> {
    let mut versions = Vec::new();
    let mut rest = remainder;

    while let Some(start) = rest.find('[') {
        let end = match rest[start..].find(']') {
            Some(offset) => start + offset,
            None => break,
        };
        let version = rest[start + 1..end].trim();
        if !version.is_empty() {
            versions.push(version.to_string());
        }
        rest = &rest[end + 1..];
    }

    versions
}

/// Whether a normalized version label matches any target version.
///
/// Combined labels ("1.20.1, Forge") match on any comma-separated part.
/// An empty target set matches nothing.
pub fn version_matches(version: &str, targets: &[String]) -> bool {
    version
        .split(',')
        .map(str::trim)
        .any(|part| targets.iter().any(|target| target == part))
}

/// Strips the site's "<name> добавляет" lead-in from a description, once,
/// and trims surrounding whitespace.
pub fn clean_description(text: &str, mod_name: &str) -> String {
    let text = text.trim();
    if mod_name.is_empty() {
        return text.to_string();
    }

    let boilerplate = format!("{mod_name} добавляет");
    if text.contains(&boilerplate) {
        text.replacen(&boilerplate, "", 1).trim().to_string()
    } else {
        text.to_string()
    }
}
