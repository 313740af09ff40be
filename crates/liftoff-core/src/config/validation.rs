//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Maximum page size accepted by the pull request listing endpoint
const MAX_SCAN_DEPTH: u8 = 100;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_github(config)?;
    validate_notes(config)?;
    validate_release(config)?;
    validate_issue(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    let urls = [
        ("github.api_url", &config.github.api_url),
        ("github.server_url", &config.github.server_url),
        ("github.upload_url", &config.github.upload_url),
    ];

    for (field, url) in urls {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "must be an http(s) URL".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_notes(config: &Config) -> Result<()> {
    let depth = config.notes.pull_request_scan_depth;
    if depth == 0 || depth > MAX_SCAN_DEPTH {
        return Err(ConfigError::InvalidValue {
            field: "notes.pull_request_scan_depth".to_string(),
            message: format!("must be between 1 and {}", MAX_SCAN_DEPTH),
        }
        .into());
    }

    let sha = &config.notes.empty_tree_sha;
    if sha.len() != 40 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidValue {
            field: "notes.empty_tree_sha".to_string(),
            message: "must be a 40 character hex object id".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if config.release.artifacts_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "release.artifacts_dir".to_string(),
            message: "artifacts directory cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_issue(config: &Config) -> Result<()> {
    if config.issue.labels.iter().any(|l| l.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "issue.labels".to_string(),
            message: "labels cannot be blank".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_api_url() {
        let mut config = Config::default();
        config.github.api_url = "api.github.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_scan_depth_bounds() {
        let mut config = Config::default();
        config.notes.pull_request_scan_depth = 0;
        assert!(validate_config(&config).is_err());

        config.notes.pull_request_scan_depth = 101;
        assert!(validate_config(&config).is_err());

        config.notes.pull_request_scan_depth = 100;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_tree_sha() {
        let mut config = Config::default();
        config.notes.empty_tree_sha = "not-a-sha".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_label() {
        let mut config = Config::default();
        config.issue.labels.push("  ".to_string());
        assert!(validate_config(&config).is_err());
    }
}
