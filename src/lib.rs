//! Modscout: a mod metadata scraper and dependency resolver
//!
//! This crate extracts structured mod metadata (name, versions, loaders,
//! download links, screenshots, dependency graph) from the minecraft-inside
//! mod listing site, and resolves transitive mod dependencies filtered by a
//! target game-version set.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod parsers;
pub mod scraper;
pub mod store;

use thiserror::Error;

/// Main error type for modscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Rate limited on {url}, gave up after {attempts} attempts")]
    RateLimited { url: String, attempts: u32 },

    #[error("Host not allowed: {url}")]
    DomainNotAllowed { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for modscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::model::{DownloadOption, ModDependency, ModFileRecord, ModSummary};
pub use crate::scraper::ScraperService;
