use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog timeout is not 0
/// - Catalog URL parses and uses http or https
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    let url = Url::parse(&config.catalog.url).map_err(|e| {
        ConfigError::ValidationError(format!("catalog.url is not a valid URL: {}", e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "catalog.url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}
