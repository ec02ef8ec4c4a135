//! Data model for scraped mod records
//!
//! All records are created per call, populated by the parsers, and returned
//! to the caller; nothing here persists between calls. The serde derives
//! exist for the favourites-store collaborator interface, which exchanges
//! these records as serialized documents.

use serde::{Deserialize, Serialize};

/// One mod as it appears on a listing page, enriched with per-mod details
/// when the detail fan-out succeeds for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModSummary {
    /// Mod name, always non-empty (nameless listing entries are discarded)
    pub name: String,

    /// Absolute URL of the mod's icon image
    #[serde(default)]
    pub icon: String,

    /// Canonical absolute URL of the mod's page; the identity key
    #[serde(default)]
    pub page_link: String,

    /// Free-text description with site boilerplate stripped
    #[serde(default)]
    pub description: String,

    /// Game versions from the listing title brackets, in encounter order
    #[serde(default)]
    pub versions: Vec<String>,

    /// Loader names ("Forge", "Fabric", ...)
    #[serde(default)]
    pub loaders: Vec<String>,

    /// Normalized screenshot URLs, capped at the most recent five
    #[serde(default)]
    pub screenshots: Vec<String>,

    /// Download options extracted from the mod's own page
    #[serde(default)]
    pub downloads: Vec<DownloadOption>,

    /// Dependency stubs discovered on the mod's own page
    #[serde(default)]
    pub dependencies: Vec<ModDependency>,
}

/// One downloadable file belonging to a mod or dependency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadOption {
    pub url: String,

    /// Normalized version string; may encode a combined
    /// "game-version, extra-tag" form
    pub version: String,

    /// Loader tags for this file, joined with ", " when several apply
    #[serde(default)]
    pub loader: String,

    /// Download counter from the row tooltip, empty when absent
    #[serde(default)]
    pub download_count: String,
}

/// A dependency reference, minimally a page link and a name, enriched by
/// the resolver with version-filtered downloads and sub-dependencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModDependency {
    /// Canonical page URL; the identity key during resolution
    pub page_link: String,

    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub loader: Option<String>,

    /// Download options filtered to the caller's target versions
    #[serde(default)]
    pub downloads: Vec<DownloadOption>,

    #[serde(default)]
    pub sub_dependencies: Vec<ModDependency>,
}

impl ModDependency {
    /// Creates an unenriched stub from a page link and display name.
    pub fn stub(page_link: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            page_link: page_link.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One embedded file record from a mod page's script data, projected
/// without version filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModFileRecord {
    pub file_id: String,
    pub version: String,
    pub loader: String,
    pub date: String,
    pub size: String,
    pub downloads: String,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_has_no_enrichment() {
        let dep = ModDependency::stub("https://example.com/mods/1-thing.html", "Thing");
        assert_eq!(dep.name, "Thing");
        assert!(dep.downloads.is_empty());
        assert!(dep.sub_dependencies.is_empty());
        assert!(dep.version.is_none());
    }

    #[test]
    fn test_summary_roundtrips_through_serde() {
        let summary = ModSummary {
            name: "Iron Chests".to_string(),
            page_link: "https://example.com/mods/iron-chests.html".to_string(),
            versions: vec!["1.20.1".to_string()],
            ..ModSummary::default()
        };

        let text = serde_json::to_string(&summary).unwrap();
        let back: ModSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(summary, back);
    }
}
