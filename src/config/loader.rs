//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration could not be accepted.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The TOML is malformed or a field has the wrong type.
    Parse(toml::de::Error),
    /// Every semantic problem found, in field order.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read gateway config: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed gateway config: {}", e),
            ConfigError::Validation(errors) => {
                let problems: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "invalid gateway config ({} problem(s)): {}",
                    errors.len(),
                    problems.join("; ")
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"

            [rate_limit]
            max_requests = 10
            window_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.rate_limit.max_requests, 10);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_config("[rate_limit\nmax_requests = 1"),
            Err(ConfigError::Parse(_))
        ));

        let err = parse_config("[rate_limit]\nmax_requests = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert_eq!(
            err.to_string(),
            "invalid gateway config (1 problem(s)): rate_limit.max_requests: must be greater than 0"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
