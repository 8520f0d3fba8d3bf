//! Extractor selection by path suffix
//!
//! The suffix test runs on the raw path string, so `report.json` and
//! `reportjson` both select the JSON extractor. Only the two literal suffixes
//! `json` and `xml` are recognised, case-sensitively.

use super::error::ExtractError;
use super::json::JsonExtractor;
use super::xml::XmlExtractor;
use super::Extractor;
use crate::config::ExtractConfig;
use std::fmt;
use tracing::{debug, warn};

/// Formats selectable from a path suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Json,
    Xml,
}

impl DataFormat {
    pub const ALL: [DataFormat; 2] = [DataFormat::Json, DataFormat::Xml];

    /// The literal suffix matched against paths
    pub fn suffix(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Xml => "xml",
        }
    }

    /// Format whose suffix ends `filepath`, if any
    pub fn from_path(filepath: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| filepath.ends_with(format.suffix()))
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Constructs the extractor matching `filepath`'s suffix
///
/// Fails with [`ExtractError::UnsupportedFormat`] before touching the file
/// when no suffix matches. I/O and parse failures of the chosen extractor are
/// returned as-is.
pub fn select_extractor(filepath: &str) -> Result<Extractor, ExtractError> {
    select_extractor_with(filepath, &ExtractConfig::default())
}

pub fn select_extractor_with(
    filepath: &str,
    config: &ExtractConfig,
) -> Result<Extractor, ExtractError> {
    let format = DataFormat::from_path(filepath).ok_or_else(|| ExtractError::UnsupportedFormat {
        path: filepath.to_string(),
    })?;

    debug!(path = filepath, format = %format, "Selected extractor");

    match format {
        DataFormat::Json => JsonExtractor::from_path(filepath).map(Extractor::Json),
        DataFormat::Xml => XmlExtractor::from_path_with(filepath, config).map(Extractor::Xml),
    }
}

/// Extracts `filepath`, treating an unsupported suffix as absent data
///
/// An unsupported suffix is logged once and yields `Ok(None)`. Every other
/// failure is returned to the caller.
pub fn extract(filepath: &str) -> Result<Option<Extractor>, ExtractError> {
    extract_with(filepath, &ExtractConfig::default())
}

pub fn extract_with(
    filepath: &str,
    config: &ExtractConfig,
) -> Result<Option<Extractor>, ExtractError> {
    match select_extractor_with(filepath, config) {
        Ok(extractor) => Ok(Some(extractor)),
        Err(e) if e.is_unsupported_format() => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
