//! Error types for extractor selection, construction and element queries

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while selecting or constructing an extractor
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The path suffix matches none of the supported formats
    #[error("Cannot extract data from {path}")]
    UnsupportedFormat { path: String },

    /// The file could not be opened or read as UTF-8 text
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON
    #[error("Failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file content is not well-formed XML
    #[error("Failed to parse XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

impl ExtractError {
    /// True for the one error kind the entry point absorbs
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ExtractError::UnsupportedFormat { .. })
    }

    /// True for I/O failures
    pub fn is_io(&self) -> bool {
        matches!(self, ExtractError::Io { .. })
    }

    /// True for malformed JSON or XML content
    pub fn is_parse(&self) -> bool {
        matches!(self, ExtractError::Json { .. } | ExtractError::Xml { .. })
    }

    /// The path the failure refers to
    pub fn path(&self) -> PathBuf {
        match self {
            ExtractError::UnsupportedFormat { path } => PathBuf::from(path),
            ExtractError::Io { path, .. }
            | ExtractError::Json { path, .. }
            | ExtractError::Xml { path, .. } => path.clone(),
        }
    }
}

/// Errors raised when an element path cannot be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Empty element path")]
    Empty,

    #[error("Cannot use absolute path on element: {0}")]
    AbsolutePath(String),

    #[error("Unsupported element path '{path}': {reason}")]
    Unsupported { path: String, reason: String },
}

impl QueryError {
    pub(crate) fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        QueryError::Unsupported {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message_carries_path() {
        let err = ExtractError::UnsupportedFormat {
            path: "./data/person.sqlite".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot extract data from ./data/person.sqlite");
        assert!(err.is_unsupported_format());
        assert!(!err.is_io());
        assert!(!err.is_parse());
        assert_eq!(err.path(), PathBuf::from("./data/person.sqlite"));
    }

    #[test]
    fn test_io_error_kind() {
        let err = ExtractError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_io());
        assert!(!err.is_unsupported_format());
        assert!(err.to_string().contains("missing.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_is_parse() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ExtractError::Json {
            path: PathBuf::from("broken.json"),
            source,
        };
        assert!(err.is_parse());
        assert!(err.to_string().starts_with("Failed to parse JSON in broken.json"));
    }

    #[test]
    fn test_query_error_display() {
        assert_eq!(QueryError::Empty.to_string(), "Empty element path");
        assert_eq!(
            QueryError::AbsolutePath("/a".to_string()).to_string(),
            "Cannot use absolute path on element: /a"
        );
        let err = QueryError::unsupported("a/..", "parent steps are not supported");
        assert!(err.to_string().contains("a/.."));
    }
}
