//! Selector parsing and matching.
//!
//! Supported grammar: selector lists (`a, b`), descendant (`a b`) and child
//! (`a > b`) combinators, and compound selectors built from a type selector
//! (`div`, `*`), id (`#main`), classes (`.item`) and attribute selectors
//! (`[data-type]`, `[data-type=close]`, `[href="..."]`).

use std::fmt;
use std::str::FromStr;

use cssparser::{
    BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, SourcePosition, ToCss,
    Token,
};
use slotmap::SlotMap;

use crate::element::{ElementData, Node, NodeId};
use crate::error::{DomError, Result};

type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatcher {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatcher>,
}

impl Compound {
    /// Add one simple selector, starting at `token`, to this compound.
    fn push<'i>(
        &mut self,
        parser: &mut Parser<'i, '_>,
        token: Token<'i>,
        start: SourcePosition,
        first: bool,
    ) -> ParseResult<'i, ()> {
        match token {
            Token::Ident(name) if first => self.tag = Some(name.to_ascii_lowercase()),
            Token::Delim('*') if first => {}
            Token::Ident(_) | Token::Delim('*') => {
                return Err(parser.new_custom_error("type selector must come first".to_string()));
            }
            Token::Delim('.') => self.classes.push(adjacent_ident(parser)?),
            Token::IDHash(id) | Token::Hash(id) => self.id = Some(id.to_string()),
            Token::SquareBracketBlock => {
                let matcher = parser.parse_nested_block(|p| parse_attribute(p))?;
                if !parser.slice_from(start).ends_with(']') {
                    return Err(parser.new_custom_error("unterminated attribute selector".to_string()));
                }
                self.attributes.push(matcher);
            }
            other => return Err(parser.new_unexpected_token_error(other)),
        }
        Ok(())
    }

    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag
            && element.tag != *tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|matcher| {
            match (element.attribute(&matcher.name), &matcher.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
                (None, _) => false,
            }
        })
    }
}

/// A compound selector chain, e.g. `.list > li a`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    /// Parse one entry of a selector list, up to the next top-level comma.
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> ParseResult<'i, Self> {
        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        let mut current: Option<Compound> = None;
        let mut pending: Option<Combinator> = None;

        parser.skip_whitespace();
        loop {
            let start = parser.position();
            let token = match parser.next_including_whitespace() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match token {
                Token::WhiteSpace(_) => {
                    if let Some(done) = current.take() {
                        compounds.push(done);
                        pending = Some(Combinator::Descendant);
                    }
                }
                Token::Delim('>') => {
                    if let Some(done) = current.take() {
                        compounds.push(done);
                    } else if compounds.is_empty() || pending == Some(Combinator::Child) {
                        return Err(parser.new_custom_error("misplaced `>`".to_string()));
                    }
                    pending = Some(Combinator::Child);
                }
                token => {
                    let first = current.is_none();
                    if first && let Some(combinator) = pending.take() {
                        combinators.push(combinator);
                    }
                    current
                        .get_or_insert_with(Compound::default)
                        .push(parser, token, start, first)?;
                }
            }
        }

        if let Some(done) = current {
            compounds.push(done);
        } else if pending == Some(Combinator::Child) {
            return Err(parser.new_custom_error("dangling `>`".to_string()));
        }
        if compounds.is_empty() {
            return Err(parser.new_custom_error("empty selector".to_string()));
        }

        Ok(Self {
            compounds,
            combinators,
        })
    }

    fn matches(&self, nodes: &SlotMap<NodeId, Node>, node: NodeId) -> bool {
        self.match_at(nodes, node, self.compounds.len() - 1)
    }

    fn match_at(&self, nodes: &SlotMap<NodeId, Node>, node: NodeId, index: usize) -> bool {
        let Some(element) = nodes.get(node).and_then(Node::element) else {
            return false;
        };
        if !self.compounds[index].matches(element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let mut ancestor = nodes.get(node).and_then(|n| n.parent);
        match self.combinators[index - 1] {
            Combinator::Child => {
                ancestor.is_some_and(|parent| self.match_at(nodes, parent, index - 1))
            }
            Combinator::Descendant => {
                while let Some(current) = ancestor {
                    if self.match_at(nodes, current, index - 1) {
                        return true;
                    }
                    ancestor = nodes.get(current).and_then(|n| n.parent);
                }
                false
            }
        }
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let selectors = parser
            .parse_comma_separated(|p| ComplexSelector::parse(p))
            .map_err(|error| DomError::selector(source, describe(error)))?;
        Ok(Self {
            source: source.trim().to_string(),
            selectors,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, nodes: &SlotMap<NodeId, Node>, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(nodes, node))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Class names must follow their `.` directly.
fn adjacent_ident<'i>(parser: &mut Parser<'i, '_>) -> ParseResult<'i, String> {
    match parser.next_including_whitespace()?.clone() {
        Token::Ident(name) => Ok(name.to_string()),
        other => Err(parser.new_unexpected_token_error(other)),
    }
}

/// Contents of `[...]`: a name, optionally followed by `=` and a value.
fn parse_attribute<'i>(parser: &mut Parser<'i, '_>) -> ParseResult<'i, AttributeMatcher> {
    let name = parser.expect_ident()?.to_string();
    if parser.is_exhausted() {
        return Ok(AttributeMatcher { name, value: None });
    }

    parser.expect_delim('=')?;
    let value = match parser.next()?.clone() {
        Token::Ident(value) | Token::QuotedString(value) => value.to_string(),
        token @ (Token::Number { .. } | Token::Dimension { .. }) => token.to_css_string(),
        other => return Err(parser.new_unexpected_token_error(other)),
    };
    parser.expect_exhausted()?;

    Ok(AttributeMatcher {
        name,
        value: Some(value),
    })
}

fn describe(error: ParseError<'_, String>) -> String {
    match error.kind {
        ParseErrorKind::Custom(reason) => reason,
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected `{}`", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of selector".to_string()
        }
        ParseErrorKind::Basic(_) => "malformed selector".to_string(),
    }
}
