//! JSON extractor
//!
//! Reads a whole file as UTF-8 and deserializes it into a generic
//! [`serde_json::Value`]. Object key order follows the source document.

use super::error::ExtractError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extractor holding a fully parsed JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct JsonExtractor {
    data: Value,
}

impl JsonExtractor {
    /// Reads and parses the file at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extractor = Self::from_content(&content, path)?;
        debug!(path = %path.display(), kind = value_kind(&extractor.data), "Parsed JSON document");
        Ok(extractor)
    }

    /// Parses already loaded text, attributing failures to `origin`
    pub fn from_content(content: &str, origin: impl Into<PathBuf>) -> Result<Self, ExtractError> {
        let data = serde_json::from_str(content).map_err(|source| ExtractError::Json {
            path: origin.into(),
            source,
        })?;
        Ok(Self { data })
    }

    /// The parsed document
    pub fn parsed_data(&self) -> &Value {
        &self.data
    }

    pub fn into_parsed_data(self) -> Value {
        self.data
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_movies() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("movies.json");
        fs::write(
            &path,
            r#"[{"title":"Dune","year":2021,"director":"Villeneuve","genre":"Sci-Fi"}]"#,
        )
        .unwrap();

        let extractor = JsonExtractor::from_path(&path).unwrap();
        let movies = extractor.parsed_data().as_array().unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0]["title"], "Dune");
        assert_eq!(movies[0]["year"], 2021);
    }

    #[test]
    fn test_matches_direct_parse() {
        let content = r#"{"b": [1, 2.5, null], "a": {"nested": true}, "s": "ünïcode"}"#;
        let extractor = JsonExtractor::from_content(content, "inline.json").unwrap();
        let direct: Value = serde_json::from_str(content).unwrap();
        assert_eq!(extractor.parsed_data(), &direct);
    }

    #[test]
    fn test_preserves_key_order() {
        let extractor = JsonExtractor::from_content(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#, "x.json").unwrap();
        let keys: Vec<&String> = extractor.parsed_data().as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalar_document() {
        let extractor = JsonExtractor::from_content("42", "answer.json").unwrap();
        assert_eq!(extractor.into_parsed_data(), json!(42));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = JsonExtractor::from_path(&path).unwrap_err();
        match err {
            ExtractError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = JsonExtractor::from_content("{\"title\": ", "broken.json").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.path(), PathBuf::from("broken.json"));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.json");
        fs::write(&path, [b'"', 0xE9, b'"']).unwrap();

        let err = JsonExtractor::from_path(&path).unwrap_err();
        assert!(err.is_io());
    }
}
