//! data-extract - suffix-dispatched JSON and XML data extraction
//!
//! Given a file path, [`extract()`] selects a parser from the path's literal
//! suffix (`json` or `xml`), parses the whole file eagerly and returns an
//! [`Extractor`] exposing the parsed document through `parsed_data`.
//!
//! # Example Usage
//!
//! ```no_run
//! use data_extract::{extract, Extractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Unsupported suffixes are logged and yield None
//! assert!(extract("data/person.sqlite")?.is_none());
//!
//! if let Some(Extractor::Xml(people)) = extract("data/person.xml")? {
//!     let liars = people.parsed_data().find_all(r#".//person[lastName="Liar"]"#)?;
//!     println!("Found: {} persons", liars.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`mod@extract`]: extractors, suffix dispatch and element path queries
//! - [`config`]: environment-driven settings
//! - [`cli`]: the `data-extract` command line front end
//! - [`util`]: logging setup

pub mod cli;
pub mod config;
pub mod extract;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, ExtractConfig};
pub use extract::{
    extract, extract_with, select_extractor, select_extractor_with, DataFormat, ElementPath,
    ExtractError, Extractor, JsonExtractor, ParsedData, QueryError, XmlElement, XmlExtractor,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "data-extract");
    }
}
