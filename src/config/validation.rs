use crate::config::types::{Config, HttpConfig, OutputConfig, SourceConfig, TraversalConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

const MAX_INDENT: usize = 16;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_source_config(&config.source)?;
    validate_http_config(&config.http)?;
    validate_traversal_config(&config.traversal)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the listing source
fn validate_source_config(config: &SourceConfig) -> ConfigResult<()> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("origin", &config.origin)?;

    if config.page_param.trim().is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    for (key, _) in &config.query {
        if key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query parameter names cannot be empty".to_string(),
            ));
        }
        if key == &config.page_param {
            return Err(ConfigError::Validation(format!(
                "query parameter '{}' clashes with page-param",
                key
            )));
        }
    }

    Ok(())
}

/// Validates the request headers
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user-agent must not contain control characters".to_string(),
        ));
    }

    if config.accept_language.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "accept-language must not contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates traversal limits
fn validate_traversal_config(config: &TraversalConfig) -> ConfigResult<()> {
    if config.target_count < 1 {
        return Err(ConfigError::Validation(format!(
            "target-count must be >= 1, got {}",
            config.target_count
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    if config.indent > MAX_INDENT {
        return Err(ConfigError::Validation(format!(
            "indent must be <= {}, got {}",
            MAX_INDENT, config.indent
        )));
    }

    Ok(())
}

/// Requires an absolute http(s) URL with a host
fn validate_http_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
