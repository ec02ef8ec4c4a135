//! Embedded script-data parser
//!
//! Mod pages inline a `dbox_data` script object whose `files` array is the
//! authoritative download table. The array is close to JSON but arrives
//! with `<span>` markup and backslash escapes baked into the markup, so
//! extraction is: locate the script by marker, capture the array with a
//! tolerant pattern, strip markup and escapes, then decode each element
//! into a typed record. Elements that fail to decode are skipped, never
//! fatal.

use crate::extract::{parse_version, version_matches};
use crate::model::{DownloadOption, ModFileRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

/// Marker identifying the data-bearing script block
const DATA_MARKER: &str = "var dbox_data =";

/// Captures the `files: [...]` array body
static FILES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"files\s*:\s*(\[\s*\{[\s\S]*?\}\s*\])").expect("valid regex"));

/// Strips `<span>` markup embedded in file names
static SPAN_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?span[^>]*>").expect("valid regex"));

/// One decoded element of the embedded files array.
///
/// `name` and `id` are required; an element missing either (or carrying a
/// wrong type) is dropped during decode. The remaining fields are tolerant
/// because the site emits them inconsistently as strings or numbers.
#[derive(Debug, Deserialize)]
struct EmbeddedFile {
    name: String,
    id: String,
    #[serde(default)]
    downloads: Option<serde_json::Value>,
    #[serde(default)]
    loaders: Vec<String>,
    #[serde(default)]
    size: Option<serde_json::Value>,
    #[serde(default)]
    created: Option<serde_json::Value>,
}

/// Extracts download options for the caller's target versions.
///
/// A file whose parsed version (any comma-separated part) matches a target
/// yields one option with a synthesized `/download/{id}/` URL; other files
/// are silently skipped.
pub fn parse_embedded_downloads(
    html: &str,
    base: &Url,
    targets: &[String],
) -> Vec<DownloadOption> {
    embedded_files(html)
        .into_iter()
        .filter_map(|file| {
            let version = parse_version(&file.name);
            if !version_matches(&version, targets) {
                return None;
            }
            Some(DownloadOption {
                url: download_url(base, &file.id),
                version,
                loader: file.loaders.first().cloned().unwrap_or_default(),
                download_count: scalar_to_string(&file.downloads),
            })
        })
        .collect()
}

/// Projects every embedded file record, without version filtering.
pub fn parse_file_records(html: &str, base: &Url) -> Vec<ModFileRecord> {
    embedded_files(html)
        .into_iter()
        .map(|file| ModFileRecord {
            download_url: download_url(base, &file.id),
            version: parse_version(&file.name),
            loader: file.loaders.first().cloned().unwrap_or_default(),
            date: scalar_to_string(&file.created),
            size: scalar_to_string(&file.size),
            downloads: scalar_to_string(&file.downloads),
            file_id: file.id,
        })
        .collect()
}

/// Locates the data script and decodes its files array.
fn embedded_files(html: &str) -> Vec<EmbeddedFile> {
    let document = Html::parse_document(html);
    let script_selector = match Selector::parse("script") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    for script in document.select(&script_selector) {
        let text: String = script.text().collect();
        if !text.contains(DATA_MARKER) {
            continue;
        }

        let raw = match FILES_RE.captures(&text) {
            Some(captures) => captures[1].to_string(),
            None => continue,
        };

        let cleaned = SPAN_TAG_RE
            .replace_all(&raw, "")
            .replace("\\\"", "\"")
            .replace('\\', "");

        let elements: Vec<serde_json::Value> = match serde_json::from_str(&cleaned) {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!("Embedded files array did not decode: {}", e);
                continue;
            }
        };

        return elements
            .into_iter()
            .filter_map(|value| serde_json::from_value::<EmbeddedFile>(value).ok())
            .collect();
    }

    Vec::new()
}

/// Synthesizes the site's download URL for a file identifier.
fn download_url(base: &Url, file_id: &str) -> String {
    base.join(&format!("/download/{}/", file_id))
        .map(|url| url.to_string())
        .unwrap_or_default()
}

/// Renders a tolerant scalar field as the string the site meant.
fn scalar_to_string(value: &Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
