//! Scraping orchestration
//!
//! [`ScraperService`] owns the retry-aware fetch client and exposes the
//! crate's operations: listing scrapes with bounded detail fan-out,
//! single-mod detail extraction, the raw file-record projection, and
//! transitive dependency resolution.

mod listing;
mod resolver;
mod service;

pub use service::{filter_by_loader, filter_by_version, ScraperService};
