//! Data extraction from JSON and XML files
//!
//! [`extract()`] picks an extractor from the path suffix and parses the whole
//! file eagerly. The result is an [`Extractor`] holding the parsed document,
//! or `None` when the suffix is not supported.
//!
//! # Example
//!
//! ```no_run
//! use data_extract::extract::{extract, Extractor};
//!
//! # fn main() -> Result<(), data_extract::ExtractError> {
//! if let Some(Extractor::Json(movies)) = extract("data/movies.json")? {
//!     for movie in movies.parsed_data().as_array().into_iter().flatten() {
//!         println!("Title: {}", movie["title"]);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod factory;
pub mod json;
pub mod query;
pub mod xml;

pub use error::{ExtractError, QueryError};
pub use factory::{extract, extract_with, select_extractor, select_extractor_with, DataFormat};
pub use json::JsonExtractor;
pub use query::ElementPath;
pub use xml::{XmlElement, XmlExtractor};

/// Parsed view over a JSON document
pub type JsonValue = serde_json::Value;

/// An extractor selected by path suffix
#[derive(Debug, Clone, PartialEq)]
pub enum Extractor {
    Json(JsonExtractor),
    Xml(XmlExtractor),
}

/// Borrowed parsed payload of an [`Extractor`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedData<'a> {
    Json(&'a JsonValue),
    Xml(&'a XmlElement),
}

impl Extractor {
    pub fn format(&self) -> DataFormat {
        match self {
            Extractor::Json(_) => DataFormat::Json,
            Extractor::Xml(_) => DataFormat::Xml,
        }
    }

    pub fn parsed_data(&self) -> ParsedData<'_> {
        match self {
            Extractor::Json(json) => ParsedData::Json(json.parsed_data()),
            Extractor::Xml(xml) => ParsedData::Xml(xml.parsed_data()),
        }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Extractor::Json(json) => Some(json.parsed_data()),
            Extractor::Xml(_) => None,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            Extractor::Xml(xml) => Some(xml.parsed_data()),
            Extractor::Json(_) => None,
        }
    }
}

impl From<JsonExtractor> for Extractor {
    fn from(extractor: JsonExtractor) -> Self {
        Extractor::Json(extractor)
    }
}

impl From<XmlExtractor> for Extractor {
    fn from(extractor: XmlExtractor) -> Self {
        Extractor::Xml(extractor)
    }
}
