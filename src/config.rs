use crate::constants::BASE_URL;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Resolved client configuration with all values filled in (no Options).
///
/// This struct holds the client defaults and can be deserialized by the TOML
/// loader. All fields have concrete values, making it safe to access directly
/// without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Upstream API base URL (overridable for testing against a local server)
    pub base_url: String,
    /// Minimum delay between consecutive upstream requests, in milliseconds
    pub rate_limit_delay_ms: u64,
    /// Timeout applied to every individual request attempt, in seconds
    pub request_timeout_secs: u64,
    /// Maximum number of retry attempts for transient upstream failures
    pub max_retries: u32,
    /// Initial delay in milliseconds before the first retry
    pub retry_initial_delay_ms: u64,
    /// Maximum delay in milliseconds between retries
    pub retry_max_delay_ms: u64,
    /// Default client-side page size for search results
    pub page_size: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            rate_limit_delay_ms: 1000,
            request_timeout_secs: 30,
            max_retries: 3,
            retry_initial_delay_ms: 1000,
            retry_max_delay_ms: 10000,
            page_size: 100,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Every key is optional; missing keys fall back to the defaults above.
    /// Rejects unknown keys to prevent typos from being silently ignored,
    /// and validates that page_size and request_timeout_secs are positive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are
    /// present, or a validated field is out of range.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.page_size == 0 {
            return Err(AppError::InvalidInput(
                "Page size must be greater than 0".into(),
            ));
        }
        if config.request_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "Request timeout must be greater than 0".into(),
            ));
        }
        if config.base_url.trim().is_empty() {
            return Err(AppError::InvalidInput("Base URL must not be empty".into()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.rate_limit_delay_ms, 1000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn partial_toml_is_parsed_and_defaults_apply() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            rate_limit_delay_ms = 250
            max_retries = 5
            "#,
        )
        .unwrap();

        let config = ResolvedConfig::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.rate_limit_delay_ms, 250);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            rate_limit_delay_ms = 250
            extra_flag = true
            "#,
        )
        .unwrap();

        assert!(ResolvedConfig::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn zero_page_size_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "page_size = 0").unwrap();

        assert!(ResolvedConfig::from_toml_file(tmp.path()).is_err());
    }
}
