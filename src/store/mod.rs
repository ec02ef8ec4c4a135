//! Collaborator interfaces
//!
//! The surrounding application supplies these services; the scraping core
//! only consumes them. They are defined here so the core's records can flow
//! through them with no adapter layer: the favourites store exchanges
//! [`ModSummary`] documents keyed by collection name, and the jar
//! downloader takes a resolved download URL plus a destination path.

use crate::model::ModSummary;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in collaborator implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read collection '{key}': {message}")]
    Load { key: String, message: String },

    #[error("Failed to write collection '{key}': {message}")]
    Save { key: String, message: String },

    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for collaborator operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent favourites collections, keyed by collection name.
///
/// Implementations own the serialization format and the on-disk location;
/// a missing collection loads as empty, not as an error.
pub trait FavouritesStore {
    /// Loads a collection, empty when it does not exist yet.
    fn load(&self, key: &str) -> StoreResult<Vec<ModSummary>>;

    /// Replaces a collection with the given records.
    fn save(&mut self, key: &str, mods: &[ModSummary]) -> StoreResult<()>;

    /// Removes every record whose name matches from a collection.
    fn remove(&mut self, key: &str, name: &str) -> StoreResult<()>;
}

/// Jar-file download service.
#[async_trait]
pub trait JarDownloader {
    /// Downloads a file to the destination path, overwriting it.
    async fn download(&self, url: &str, destination: &Path) -> StoreResult<()>;
}
