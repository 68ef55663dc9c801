use crate::config::types::{BoardEntry, Config, CrawlerConfig, SiteConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_boards(&config.boards)?;
    Ok(())
}

/// Validates the site root
fn validate_site_config(config: &SiteConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.domain)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain '{}': {}", config.domain, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' must use http or https",
            config.domain
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Domain '{}' has no host",
            config.domain
        )));
    }

    // Board paths are appended by string concatenation
    if config.domain.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' must not end with '/'",
            config.domain
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.board.trim().is_empty() {
        return Err(ConfigError::Validation("board cannot be empty".to_string()));
    }

    if config.max_articles < 1 {
        return Err(ConfigError::Validation(format!(
            "max_articles must be >= 1, got {}",
            config.max_articles
        )));
    }

    if !(-12..=14).contains(&config.utc_offset_hours) {
        return Err(ConfigError::Validation(format!(
            "utc_offset_hours must be between -12 and 14, got {}",
            config.utc_offset_hours
        )));
    }

    Ok(())
}

/// Validates extra board entries
fn validate_boards(boards: &[BoardEntry]) -> ConfigResult<()> {
    for entry in boards {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "board name cannot be empty".to_string(),
            ));
        }

        validate_board_path(&entry.path)?;
    }

    Ok(())
}

/// Board paths are plain URL segments like "Gossiping" or "C_Chat"
fn validate_board_path(path: &str) -> ConfigResult<()> {
    if path.is_empty() {
        return Err(ConfigError::Validation(
            "board path cannot be empty".to_string(),
        ));
    }

    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "board path '{}' may only contain ASCII letters, digits, '_' and '-'",
            path
        )));
    }

    Ok(())
}
