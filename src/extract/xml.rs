//! XML extractor
//!
//! Parses a whole file with `roxmltree` and copies it into an owned
//! [`XmlElement`] tree so the parsed data outlives the source text.
//!
//! Tree shape follows the usual element-tree model:
//!
//! - namespaced names are written `{uri}local`
//! - `text` holds character data before an element's first child and `tail`
//!   holds character data following an element inside its parent
//! - comments and processing instructions are dropped, and the character data
//!   around them is joined

use super::error::{ExtractError, QueryError};
use super::query::ElementPath;
use crate::config::ExtractConfig;
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One element of a parsed XML document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    tail: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Attribute value by (qualified) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Character data before the first child element
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Character data after this element, before its next sibling
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first traversal starting with this element
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// All text below this element in document order, excluding its own tail
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
    }

    /// First element matching `path`
    pub fn find(&self, path: &str) -> Result<Option<&XmlElement>, QueryError> {
        Ok(ElementPath::parse(path)?.find(self))
    }

    /// Every element matching `path`, in document order
    pub fn find_all(&self, path: &str) -> Result<Vec<&XmlElement>, QueryError> {
        Ok(ElementPath::parse(path)?.find_all(self))
    }

    /// Text of the first element matching `path`
    ///
    /// A match without text yields `Some("")`; no match yields `None`.
    pub fn find_text(&self, path: &str) -> Result<Option<&str>, QueryError> {
        Ok(self
            .find(path)?
            .map(|element| element.text().unwrap_or("")))
    }
}

impl<'a> IntoIterator for &'a XmlElement {
    type Item = &'a XmlElement;
    type IntoIter = std::slice::Iter<'a, XmlElement>;

    /// Iterates direct children
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Depth-first iterator over an element and its descendants
pub struct Iter<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Extractor holding a fully parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlExtractor {
    root: XmlElement,
}

impl XmlExtractor {
    /// Reads and parses the file at `path` with the default configuration
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        Self::from_path_with(path, &ExtractConfig::default())
    }

    pub fn from_path_with(
        path: impl AsRef<Path>,
        config: &ExtractConfig,
    ) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extractor = Self::from_content_with(&content, path, config)?;
        debug!(
            path = %path.display(),
            root = extractor.root.tag(),
            elements = extractor.root.iter().count(),
            "Parsed XML document"
        );
        Ok(extractor)
    }

    /// Parses already loaded text, attributing failures to `origin`
    pub fn from_content(content: &str, origin: impl Into<PathBuf>) -> Result<Self, ExtractError> {
        Self::from_content_with(content, origin, &ExtractConfig::default())
    }

    pub fn from_content_with(
        content: &str,
        origin: impl Into<PathBuf>,
        config: &ExtractConfig,
    ) -> Result<Self, ExtractError> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = config.xml_allow_dtd;
        options.nodes_limit = config.xml_nodes_limit;

        let document =
            Document::parse_with_options(content, options).map_err(|source| ExtractError::Xml {
                path: origin.into(),
                source,
            })?;

        Ok(Self {
            root: build_element(document.root_element()),
        })
    }

    /// The document's root element
    pub fn parsed_data(&self) -> &XmlElement {
        &self.root
    }

    pub fn into_parsed_data(self) -> XmlElement {
        self.root
    }
}

fn qualified_name(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(uri) => format!("{{{}}}{}", uri, local),
        None => local.to_string(),
    }
}

fn build_element(node: Node<'_, '_>) -> XmlElement {
    let tag_name = node.tag_name();
    let mut element = XmlElement::new(qualified_name(tag_name.namespace(), tag_name.name()));

    for attribute in node.attributes() {
        element.attributes.insert(
            qualified_name(attribute.namespace(), attribute.name()),
            attribute.value().to_string(),
        );
    }

    let mut pending = String::new();
    for child in node.children() {
        if child.is_element() {
            attach_text(&mut element, &mut pending);
            element.children.push(build_element(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                pending.push_str(text);
            }
        }
    }
    attach_text(&mut element, &mut pending);

    element
}

/// Moves accumulated character data to the element text or the last child's tail
fn attach_text(element: &mut XmlElement, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    match element.children.last_mut() {
        Some(last) => last.tail = Some(text),
        None => element.text = Some(text),
    }
}
