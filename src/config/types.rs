use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for modscout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// Target site layout
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL; its host is the only host the fetch client will talk to
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Listing category segment, e.g. "mods"
    #[serde(default = "default_category")]
    pub category: String,
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Rate-limit recovery policy
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables recovery
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff sleep (milliseconds)
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Added per further attempt (milliseconds)
    #[serde(rename = "step-delay-ms", default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

/// Fan-out and resolution behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Concurrent detail-page workers during listing fan-out
    #[serde(rename = "worker-pool-size", default = "default_worker_pool_size")]
    pub worker_pool_size: u32,

    /// Pacing sleep before each detail fetch (milliseconds)
    #[serde(rename = "detail-delay-ms", default = "default_detail_delay_ms")]
    pub detail_delay_ms: u64,

    /// Dependency resolution wave limit
    #[serde(
        rename = "max-dependency-depth",
        default = "default_max_dependency_depth"
    )]
    pub max_dependency_depth: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            category: default_category(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: default_worker_pool_size(),
            detail_delay_ms: default_detail_delay_ms(),
            max_dependency_depth: default_max_dependency_depth(),
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl ScrapeConfig {
    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }
}

fn default_base_url() -> String {
    "https://minecraft-inside.ru".to_string()
}

fn default_category() -> String {
    "mods".to_string()
}

fn default_user_agent() -> String {
    // The site serves a challenge page to clients without a browser UA
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    5_000
}

fn default_step_delay_ms() -> u64 {
    3_000
}

fn default_worker_pool_size() -> u32 {
    5
}

fn default_detail_delay_ms() -> u64 {
    300
}

fn default_max_dependency_depth() -> u32 {
    3
}
