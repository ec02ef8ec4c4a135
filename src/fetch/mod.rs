//! HTTP fetch client
//!
//! All outbound traffic goes through [`FetchClient`], which:
//! - refuses URLs outside the configured site's host (allow-list)
//! - applies the whole-request timeout and browser-like headers
//! - optionally recovers from HTTP 429 with a linear backoff
//!
//! Two profiles exist: a plain client ([`FetchClient::new`]) and a
//! retry-aware client ([`FetchClient::with_retry`]). Concurrency is not
//! limited here; callers gate their own fan-out.

use crate::config::{FetchConfig, RetryConfig, SiteConfig};
use crate::{ConfigError, Result, ScoutError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Rate-limit recovery policy
///
/// After a 429 response the client sleeps `base_delay + attempt * step_delay`
/// and re-issues the same request, up to `max_retries` times. The attempt
/// counter is request-scoped and starts at zero on first dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub step_delay: Duration,
}

impl RetryPolicy {
    /// Policy that never retries (the plain client profile)
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            step_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_delay(),
            step_delay: config.step_delay(),
        }
    }

    /// Sleep before retry number `attempt + 1`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay + self.step_delay * attempt
    }
}

/// Async HTTP client restricted to the target site's host
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    allowed_host: String,
    retry: RetryPolicy,
}

impl FetchClient {
    /// Creates the general-purpose profile (no rate-limit recovery).
    pub fn new(site: &SiteConfig, fetch: &FetchConfig) -> Result<Self> {
        Self::build(site, fetch, RetryPolicy::disabled())
    }

    /// Creates the retry-aware profile.
    pub fn with_retry(site: &SiteConfig, fetch: &FetchConfig, retry: RetryPolicy) -> Result<Self> {
        Self::build(site, fetch, retry)
    }

    fn build(site: &SiteConfig, fetch: &FetchConfig, retry: RetryPolicy) -> Result<Self> {
        let base = Url::parse(&site.base_url)?;
        let allowed_host = base
            .host_str()
            .ok_or_else(|| {
                ScoutError::Config(ConfigError::InvalidUrl(format!(
                    "base-url has no host: {}",
                    site.base_url
                )))
            })?
            .to_string();

        let client = Client::builder()
            .user_agent(fetch.user_agent.clone())
            .timeout(Duration::from_secs(fetch.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            allowed_host,
            retry,
        })
    }

    /// Whether a URL's host is on the allow-list.
    pub fn is_allowed(&self, url: &Url) -> bool {
        url.host_str() == Some(self.allowed_host.as_str())
    }

    /// Fetches a page body as text.
    ///
    /// 429 responses are retried per the client's [`RetryPolicy`]; exhaustion
    /// yields [`ScoutError::RateLimited`]. Any other non-success status maps
    /// to [`ScoutError::Status`], transport failures to [`ScoutError::Http`].
    /// Callers are expected to contain per-page failures: only the operation
    /// that has no data at all without this page escalates them.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        if !self.is_allowed(&parsed) {
            return Err(ScoutError::DomainNotAllowed {
                url: url.to_string(),
            });
        }

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!("Fetching {}", url);
            let response = match self.client.get(parsed.clone()).send().await {
                Ok(r) => r,
                Err(source) => {
                    return Err(ScoutError::Http {
                        url: url.to_string(),
                        source,
                    })
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.retry.max_retries {
                    let delay = self.retry.backoff_delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        "429 from {}, retry {}/{} after {:?}",
                        url,
                        attempt,
                        self.retry.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                tracing::error!(
                    "429 from {}, giving up after {} attempts",
                    url,
                    attempt + 1
                );
                return Err(ScoutError::RateLimited {
                    url: url.to_string(),
                    attempts: attempt + 1,
                });
            }

            if !status.is_success() {
                return Err(ScoutError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            return match response.text().await {
                Ok(body) => Ok(body),
                Err(source) => Err(ScoutError::Http {
                    url: url.to_string(),
                    source,
                }),
            };
        }
    }
}
