//! Output formatting for extracted documents
//!
//! Human output pretty-prints JSON and renders XML as an indented outline.
//! JSON output wraps every result in an object carrying the source path and
//! format, with XML trees serialized as `{tag, attributes, text, tail, children}`.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::extract::{DataFormat, XmlElement};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

/// What to print for one extracted file
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    /// A JSON document or the value selected by a pointer
    Json(&'a Value),
    /// A whole XML document
    XmlDocument(&'a XmlElement),
    /// Elements matched by an element path
    XmlMatches(Vec<&'a XmlElement>),
}

impl Selection<'_> {
    pub fn format(&self) -> DataFormat {
        match self {
            Selection::Json(_) => DataFormat::Json,
            Selection::XmlDocument(_) | Selection::XmlMatches(_) => DataFormat::Xml,
        }
    }
}

/// Output formatter for extraction results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the selection extracted from `path`
    pub fn format(&self, path: &str, selection: &Selection<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(path, selection),
            OutputFormat::Human => self.format_human(selection),
        }
    }

    fn format_json(&self, path: &str, selection: &Selection<'_>) -> Result<String> {
        let data = match selection {
            Selection::Json(value) => (*value).clone(),
            Selection::XmlDocument(root) => {
                serde_json::to_value(root).context("Failed to serialize XML document")?
            }
            Selection::XmlMatches(elements) => {
                serde_json::to_value(elements).context("Failed to serialize XML matches")?
            }
        };

        let output = json!({
            "path": path,
            "format": selection.format().suffix(),
            "data": data,
        });
        serde_json::to_string_pretty(&output).context("Failed to serialize output to JSON")
    }

    fn format_human(&self, selection: &Selection<'_>) -> Result<String> {
        match selection {
            Selection::Json(value) => {
                serde_json::to_string_pretty(value).context("Failed to format JSON value")
            }
            Selection::XmlDocument(root) => {
                let mut out = String::new();
                write_outline(&mut out, root, 0);
                Ok(out.trim_end().to_string())
            }
            Selection::XmlMatches(elements) => {
                let mut out = format!("Found: {} elements\n", elements.len());
                for element in elements {
                    write_outline(&mut out, element, 1);
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}

fn write_outline(out: &mut String, element: &XmlElement, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(element.tag());

    for (name, value) in element.attributes() {
        out.push_str(&format!(" {}=\"{}\"", name, value));
    }

    if let Some(text) = element.text().map(str::trim).filter(|t| !t.is_empty()) {
        out.push_str(": ");
        out.push_str(text);
    }
    out.push('\n');

    for child in element.children() {
        write_outline(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::XmlExtractor;

    fn person() -> XmlElement {
        XmlExtractor::from_content(
            r#"<person gender="male">
  <firstName>Jimy</firstName>
  <phoneNumbers><phoneNumber type="home">212 555-1234</phoneNumber></phoneNumbers>
</person>"#,
            "person.xml",
        )
        .unwrap()
        .into_parsed_data()
    }

    #[test]
    fn test_human_json() {
        let value = json!([{"title": "Dune"}]);
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format("movies.json", &Selection::Json(&value)).unwrap();
        assert!(output.contains("\"title\": \"Dune\""));
    }

    #[test]
    fn test_human_xml_outline() {
        let root = person();
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format("person.xml", &Selection::XmlDocument(&root))
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "person gender=\"male\"",
                "  firstName: Jimy",
                "  phoneNumbers",
                "    phoneNumber type=\"home\": 212 555-1234",
            ]
        );
    }

    #[test]
    fn test_human_matches() {
        let root = person();
        let matches = root.find_all(".//phoneNumber").unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format("person.xml", &Selection::XmlMatches(matches))
            .unwrap();
        assert!(output.starts_with("Found: 1 elements"));
        assert!(output.contains("  phoneNumber type=\"home\": 212 555-1234"));
    }

    #[test]
    fn test_json_wraps_path_and_format() {
        let value = json!({"title": "Dune"});
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format("movies.json", &Selection::Json(&value)).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["path"], "movies.json");
        assert_eq!(parsed["format"], "json");
        assert_eq!(parsed["data"]["title"], "Dune");
    }

    #[test]
    fn test_json_serializes_xml_tree() {
        let root = person();
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter
            .format("person.xml", &Selection::XmlDocument(&root))
            .unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["format"], "xml");
        assert_eq!(parsed["data"]["tag"], "person");
        assert_eq!(parsed["data"]["attributes"]["gender"], "male");
        assert_eq!(parsed["data"]["children"][0]["text"], "Jimy");
        assert_eq!(parsed["data"]["children"].as_array().unwrap().len(), 2);
    }
}
