use crate::config::types::{Config, FetchConfig, RetryConfig, ScrapeConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site(&config.site)?;
    validate_fetch(&config.fetch)?;
    validate_retry(&config.retry)?;
    validate_scrape(&config.scrape)?;
    Ok(())
}

/// Validates the site section
fn validate_site(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url has no host: {}",
            config.base_url
        )));
    }

    if config.category.is_empty() {
        return Err(ConfigError::Validation("category cannot be empty".to_string()));
    }

    if !config
        .category
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "category must contain only alphanumeric characters and hyphens, got '{}'",
            config.category
        )));
    }

    Ok(())
}

/// Validates the fetch section
fn validate_fetch(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout-seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the retry section
fn validate_retry(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates the scrape section
fn validate_scrape(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.worker_pool_size < 1 || config.worker_pool_size > 50 {
        return Err(ConfigError::Validation(format!(
            "worker-pool-size must be between 1 and 50, got {}",
            config.worker_pool_size
        )));
    }

    if config.max_dependency_depth < 1 {
        return Err(ConfigError::Validation(
            "max-dependency-depth must be >= 1".to_string(),
        ));
    }

    Ok(())
}
