//! Configuration management for data-extract
//!
//! Settings have built-in defaults and can be loaded from environment variables
//! with [`ExtractConfig::from_env`].
//!
//! # Environment Variables
//!
//! - `DATA_EXTRACT_XML_ALLOW_DTD`: Accept documents with a DOCTYPE (true|false) - default: "true"
//! - `DATA_EXTRACT_XML_NODES_LIMIT`: Maximum number of XML nodes - default: "4294967295"
//! - `DATA_EXTRACT_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use data_extract::{extract_with, ExtractConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::from_env()?;
//! config.validate()?;
//!
//! let extractor = extract_with("data/person.xml", &config)?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_XML_ALLOW_DTD: bool = true;
const DEFAULT_XML_NODES_LIMIT: u32 = u32::MAX;
const DEFAULT_LOG_LEVEL: &str = "info";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Accept XML documents containing a DOCTYPE declaration
    pub xml_allow_dtd: bool,

    /// Upper bound on the number of nodes in one XML document
    pub xml_nodes_limit: u32,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            xml_allow_dtd: DEFAULT_XML_ALLOW_DTD,
            xml_nodes_limit: DEFAULT_XML_NODES_LIMIT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Loads configuration from `DATA_EXTRACT_*` variables, falling back to defaults
    ///
    /// Values that are present but unparseable are reported rather than ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let xml_allow_dtd =
            parse_env("DATA_EXTRACT_XML_ALLOW_DTD")?.unwrap_or(DEFAULT_XML_ALLOW_DTD);

        let xml_nodes_limit =
            parse_env("DATA_EXTRACT_XML_NODES_LIMIT")?.unwrap_or(DEFAULT_XML_NODES_LIMIT);

        let log_level = env::var("DATA_EXTRACT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Ok(Self {
            xml_allow_dtd,
            xml_nodes_limit,
            log_level,
        })
    }

    /// Validates the configuration
    ///
    /// Checks that:
    /// - The XML node limit is positive
    /// - Log level is valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.xml_nodes_limit == 0 {
            return Err(ConfigError::ValidationFailed(
                "XML nodes limit must be greater than 0".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level '{}'. Valid options: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl fmt::Display for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data-extract configuration:")?;
        writeln!(f, "  XML allow DTD: {}", self.xml_allow_dtd)?;
        writeln!(f, "  XML nodes limit: {}", self.xml_nodes_limit)?;
        write!(f, "  Log level: {}", self.log_level)
    }
}

fn parse_env<T>(field: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(field) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: field.to_string(),
                error: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("DATA_EXTRACT_XML_ALLOW_DTD");
        env::remove_var("DATA_EXTRACT_XML_NODES_LIMIT");
        env::remove_var("DATA_EXTRACT_LOG_LEVEL");
    }

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert!(config.xml_allow_dtd);
        assert_eq!(config.xml_nodes_limit, u32::MAX);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ExtractConfig::from_env().unwrap(), ExtractConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("DATA_EXTRACT_XML_ALLOW_DTD", "false");
        env::set_var("DATA_EXTRACT_XML_NODES_LIMIT", "1000");
        env::set_var("DATA_EXTRACT_LOG_LEVEL", "DEBUG");

        let config = ExtractConfig::from_env().unwrap();
        clear_env();

        assert!(!config.xml_allow_dtd);
        assert_eq!(config.xml_nodes_limit, 1000);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_value() {
        clear_env();
        env::set_var("DATA_EXTRACT_XML_NODES_LIMIT", "lots");

        let result = ExtractConfig::from_env();
        clear_env();

        match result {
            Err(ConfigError::ParseError { field, .. }) => {
                assert_eq!(field, "DATA_EXTRACT_XML_NODES_LIMIT");
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_nodes_limit() {
        let config = ExtractConfig {
            xml_nodes_limit: 0,
            ..ExtractConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let config = ExtractConfig {
            log_level: "loud".to_string(),
            ..ExtractConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_display() {
        let display = ExtractConfig::default().to_string();
        assert!(display.contains("XML allow DTD: true"));
        assert!(display.contains("Log level: info"));
    }
}
