//! A small CSS selector subset.
//!
//! Supported: type selectors (`div`), the universal selector (`*`), `#id`,
//! `.class`, `[attr]` and `[attr=value]` (value optionally quoted), compound
//! selectors (`li.cs-option.selected`), descendant combinators
//! (`.cs-select li`) and selector lists (`a, b`).

use std::str::FromStr;

use crate::document::{Document, NodeId};
use crate::error::SelectorError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if doc.tag(node) != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| doc.has_class(node, class)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(expected) => doc.attr(node, name) == Some(expected.as_str()),
            None => doc.has_attr(node, name),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    // Each alternative is a descendant chain, outermost compound first.
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse()
    }

    /// Match elements by tag name.
    pub fn tag(name: &str) -> Self {
        Self::single(Compound {
            tag: Some(name.to_ascii_lowercase()),
            ..Default::default()
        })
    }

    /// Match elements carrying `class`.
    pub fn class(class: &str) -> Self {
        Self::single(Compound {
            classes: vec![class.to_string()],
            ..Default::default()
        })
    }

    /// Additionally require `class` on the subject of every alternative.
    pub fn and_class(mut self, class: &str) -> Self {
        for chain in &mut self.alternatives {
            if let Some(subject) = chain.last_mut() {
                subject.classes.push(class.to_string());
            }
        }
        self
    }

    fn single(compound: Compound) -> Self {
        Self {
            alternatives: vec![vec![compound]],
        }
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| matches_chain(doc, node, chain))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn matches_chain(doc: &Document, node: NodeId, chain: &[Compound]) -> bool {
    let Some((subject, rest)) = chain.split_last() else {
        return false;
    };
    if !subject.matches(doc, node) {
        return false;
    }

    // Descendant combinators only, so matching each compound against the
    // nearest qualifying ancestor is enough.
    let mut ancestors = doc.ancestors(node).into_iter();
    for compound in rest.iter().rev() {
        if !ancestors.any(|ancestor| compound.matches(doc, ancestor)) {
            return false;
        }
    }
    true
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            selector: self.input.to_string(),
            found,
            offset: self.pos,
        }
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident(c)) {
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn required_ident(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(c) if is_ident(c) => Ok(self.ident()),
            Some(c) => Err(self.unexpected(c)),
            None => Err(SelectorError::UnexpectedEnd(self.input.to_string())),
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        if self.input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut alternatives = Vec::new();
        loop {
            self.skip_ws();
            alternatives.push(self.parse_chain()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(Selector { alternatives })
    }

    fn parse_chain(&mut self) -> Result<Vec<Compound>, SelectorError> {
        let mut chain = vec![self.parse_compound()?];
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => break,
                Some(_) if had_ws => chain.push(self.parse_compound()?),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(chain)
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident(c) => compound.tag = Some(self.ident().to_ascii_lowercase()),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.required_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.required_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::UnexpectedEnd(self.input.to_string()),
            });
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<(String, Option<String>), SelectorError> {
        self.skip_ws();
        let name = self.required_ident()?;
        self.skip_ws();

        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_ws();
            Some(self.parse_attr_value()?)
        } else {
            None
        };

        self.skip_ws();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok((name, value))
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(SelectorError::UnterminatedAttribute(self.input.to_string())),
        }
    }

    fn parse_attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut out = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            return Ok(out);
                        }
                        Some(c) => {
                            out.push(c);
                            self.pos += 1;
                        }
                        None => {
                            return Err(SelectorError::UnterminatedAttribute(
                                self.input.to_string(),
                            ))
                        }
                    }
                }
            }
            Some(c) if is_ident(c) => Ok(self.ident()),
            Some(c) => Err(self.unexpected(c)),
            None => Err(SelectorError::UnterminatedAttribute(self.input.to_string())),
        }
    }
}

impl Document {
    /// Descendants of `scope` matching `selector`, in document order.
    pub fn find(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    /// First descendant of `scope` matching `selector`.
    pub fn find_one(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| selector.matches(self, node))
    }

    /// `node` itself or its nearest ancestor matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&candidate| selector.matches(self, candidate))
    }

    /// Every element in the document matching `selector`.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.find(self.root(), selector)
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }
}
