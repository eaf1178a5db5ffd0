//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PushConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PushConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<PushConfig, ConfigError> {
    let config: PushConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [[resources]]
            target = "/static/app.css"

            [[resources]]
            method = "HEAD"
            target = "/static/app.js"

            [headers.set]
            X-Push-Origin = "{http.request.host}"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.resources[0].method, "GET");
        assert_eq!(config.resources[1].method, "HEAD");
        assert_eq!(config.resources[1].target, "/static/app.js");
        assert!(config.headers.is_some());
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = parse_config("").unwrap();
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            parse_config("resources = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let err = parse_config(
            r#"
            [[resources]]
            method = "POST"
            target = ""
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }
}
