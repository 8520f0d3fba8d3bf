//! Element path expressions
//!
//! Paths are `/`-separated steps evaluated relative to an [`XmlElement`]:
//!
//! - `tag` / `*` select child elements, `.` selects the current element
//! - `//` selects descendants at any depth below the current element
//! - predicates filter each step: `[@attr]`, `[@attr='v']`, `[tag]`,
//!   `[tag='text']`, `[.='text']`, `!=` forms, `[n]`, `[last()]`, `[last()-n]`
//!
//! Positional predicates count among the siblings selected under one parent,
//! after any predicates written before them.

use super::error::QueryError;
use super::xml::XmlElement;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
    SelfNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Tag(String),
}

impl NodeTest {
    fn matches(&self, element: &XmlElement) -> bool {
        match self {
            NodeTest::Any => true,
            NodeTest::Tag(tag) => element.tag() == tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals {
        name: String,
        value: String,
        negate: bool,
    },
    HasChild(String),
    ChildTextEquals {
        tag: String,
        value: String,
        negate: bool,
    },
    TextEquals {
        value: String,
        negate: bool,
    },
    /// 1-based position
    Position(usize),
    /// `last() - n`
    FromLast(usize),
}

impl Predicate {
    fn matches(&self, element: &XmlElement) -> bool {
        match self {
            Predicate::HasAttribute(name) => element.get(name).is_some(),
            Predicate::AttributeEquals {
                name,
                value,
                negate,
            } => element
                .get(name)
                .map_or(false, |actual| (actual == value) != *negate),
            Predicate::HasChild(tag) => element.children().iter().any(|c| c.tag() == tag),
            Predicate::ChildTextEquals { tag, value, negate } => {
                element.children().iter().any(|c| {
                    c.tag() == tag && ((c.text_content() == *value) != *negate)
                })
            }
            Predicate::TextEquals { value, negate } => {
                (element.text_content() == *value) != *negate
            }
            Predicate::Position(_) | Predicate::FromLast(_) => true,
        }
    }

    fn apply<'a>(&self, group: Vec<&'a XmlElement>) -> Vec<&'a XmlElement> {
        match self {
            Predicate::Position(n) => group.get(n - 1).copied().into_iter().collect(),
            Predicate::FromLast(n) => n
                .checked_add(1)
                .and_then(|k| group.len().checked_sub(k))
                .and_then(|i| group.get(i).copied())
                .into_iter()
                .collect(),
            _ => group.into_iter().filter(|e| self.matches(e)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

impl Step {
    /// Candidates for one context element, grouped by parent
    fn groups<'a>(&self, element: &'a XmlElement) -> Vec<Vec<&'a XmlElement>> {
        match self.axis {
            Axis::SelfNode => vec![vec![element]],
            Axis::Child => vec![self.matching_children(element)],
            Axis::Descendant => element
                .iter()
                .map(|e| self.matching_children(e))
                .filter(|group| !group.is_empty())
                .collect(),
        }
    }

    fn matching_children<'a>(&self, element: &'a XmlElement) -> Vec<&'a XmlElement> {
        element
            .children()
            .iter()
            .filter(|c| self.test.matches(c))
            .collect()
    }

    fn filter<'a>(&self, group: Vec<&'a XmlElement>) -> Vec<&'a XmlElement> {
        self.predicates
            .iter()
            .fold(group, |current, predicate| predicate.apply(current))
    }
}

/// A compiled element path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    source: String,
    steps: Vec<Step>,
}

impl ElementPath {
    /// Compiles `path`, rejecting syntax outside the supported subset
    pub fn parse(path: &str) -> Result<Self, QueryError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        if trimmed.starts_with('/') {
            return Err(QueryError::AbsolutePath(path.to_string()));
        }

        let mut parser = Parser::new(path, trimmed);
        let mut steps = Vec::new();
        let mut axis = Axis::Child;

        loop {
            steps.push(parser.step(axis)?);
            parser.skip_whitespace();
            match parser.peek() {
                None => break,
                Some('/') => {
                    parser.bump();
                    axis = if parser.eat('/') {
                        Axis::Descendant
                    } else {
                        Axis::Child
                    };
                    if parser.peek().is_none() {
                        return Err(parser.error("path ends with '/'"));
                    }
                }
                Some(c) => return Err(parser.error(format!("unexpected '{}'", c))),
            }
        }

        Ok(Self {
            source: path.to_string(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// All matching elements in document order, without duplicates
    pub fn find_all<'a>(&self, root: &'a XmlElement) -> Vec<&'a XmlElement> {
        let order: HashMap<*const XmlElement, usize> = root
            .iter()
            .enumerate()
            .map(|(index, element)| (element as *const XmlElement, index))
            .collect();
        let mut context = vec![root];

        for step in &self.steps {
            let mut seen: HashSet<*const XmlElement> = HashSet::new();
            let mut next = Vec::new();

            for &element in &context {
                for group in step.groups(element) {
                    for matched in step.filter(group) {
                        if seen.insert(matched as *const XmlElement) {
                            next.push(matched);
                        }
                    }
                }
            }

            next.sort_by_key(|element| order.get(&(*element as *const XmlElement)).copied());
            context = next;
            if context.is_empty() {
                break;
            }
        }

        context
    }

    /// First matching element
    pub fn find<'a>(&self, root: &'a XmlElement) -> Option<&'a XmlElement> {
        self.find_all(root).into_iter().next()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    original: &'a str,
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(original: &'a str, input: &'a str) -> Self {
        Self {
            original,
            input,
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> QueryError {
        QueryError::unsupported(self.original, reason)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), QueryError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn step(&mut self, axis: Axis) -> Result<Step, QueryError> {
        self.skip_whitespace();
        let (axis, test) = match self.peek() {
            Some('.') => {
                self.bump();
                if self.eat('.') {
                    return Err(self.error("parent steps are not supported"));
                }
                if axis == Axis::Descendant {
                    return Err(self.error("expected a tag or '*' after '//'"));
                }
                (Axis::SelfNode, NodeTest::Any)
            }
            Some('*') => {
                self.bump();
                (axis, NodeTest::Any)
            }
            _ => (axis, NodeTest::Tag(self.name()?)),
        };

        let mut predicates = Vec::new();
        while self.eat('[') {
            self.skip_whitespace();
            predicates.push(self.predicate()?);
            self.skip_whitespace();
            self.expect(']')?;
        }

        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    fn name(&mut self) -> Result<String, QueryError> {
        let start = self.pos;

        if self.eat('{') {
            if self.rest().starts_with("*}") {
                return Err(self.error("namespace wildcards are not supported"));
            }
            match self.rest().find('}') {
                Some(end) => self.pos += end + 1,
                None => return Err(self.error("unterminated namespace")),
            }
        }

        while let Some(c) = self.peek() {
            if matches!(c, '/' | '[' | ']' | '=' | '!' | '@' | '\'' | '"') || c.is_whitespace() {
                break;
            }
            self.bump();
        }

        let name = &self.input[start..self.pos];
        if name.is_empty() || name.ends_with('}') {
            return Err(self.error("expected a tag name"));
        }
        Ok(name.to_string())
    }

    /// Parses `=` or `!=`, returning whether the comparison is negated
    fn comparison(&mut self) -> Option<bool> {
        self.skip_whitespace();
        if self.eat('=') {
            Some(false)
        } else if self.eat_str("!=") {
            Some(true)
        } else {
            None
        }
    }

    fn quoted(&mut self) -> Result<String, QueryError> {
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted value")),
        };
        self.bump();

        match self.rest().find(quote) {
            Some(end) => {
                let value = self.rest()[..end].to_string();
                self.pos += end + quote.len_utf8();
                Ok(value)
            }
            None => Err(self.error("unterminated string")),
        }
    }

    fn number(&mut self) -> Result<usize, QueryError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.error("expected a number"))
    }

    fn predicate(&mut self) -> Result<Predicate, QueryError> {
        match self.peek() {
            Some('@') => {
                self.bump();
                let name = self.name()?;
                match self.comparison() {
                    Some(negate) => Ok(Predicate::AttributeEquals {
                        name,
                        value: self.quoted()?,
                        negate,
                    }),
                    None => Ok(Predicate::HasAttribute(name)),
                }
            }
            Some('.') => {
                self.bump();
                match self.comparison() {
                    Some(negate) => Ok(Predicate::TextEquals {
                        value: self.quoted()?,
                        negate,
                    }),
                    None => Err(self.error("expected '=' or '!=' after '.'")),
                }
            }
            Some(c) if c.is_ascii_digit() => {
                let position = self.number()?;
                if position == 0 {
                    return Err(self.error("positions start at 1"));
                }
                Ok(Predicate::Position(position))
            }
            _ if self.eat_str("last()") => {
                self.skip_whitespace();
                if self.eat('-') {
                    self.skip_whitespace();
                    Ok(Predicate::FromLast(self.number()?))
                } else {
                    Ok(Predicate::FromLast(0))
                }
            }
            _ => {
                let tag = self.name()?;
                match self.comparison() {
                    Some(negate) => Ok(Predicate::ChildTextEquals {
                        tag,
                        value: self.quoted()?,
                        negate,
                    }),
                    None => Ok(Predicate::HasChild(tag)),
                }
            }
        }
    }
}
