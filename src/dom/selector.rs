//! Structural locators: a small CSS selector subset.
//!
//! Supports type (`div`), universal (`*`), class (`.modal-body`), id
//! (`#dynmodal-1`) and attribute-presence (`[data-close]`) components,
//! joined by descendant (whitespace) or child (`>`) combinators.
//!
//! Whitespace is significant: two compound selectors separated by a gap are
//! joined with a descendant combinator; adjacency is decided from token byte
//! spans.

use logos::Logos;

use super::node::{NodeData, NodeId};
use super::tree::Dom;

/// Locator token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum Token {
    /// Identifier: tag names, class names, ids, attribute names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Digit-led run, only valid after `#` (generated ids end in a counter).
    #[regex(r"[0-9][a-zA-Z0-9_-]*")]
    Digits,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("*")]
    Star,

    #[token(">")]
    GreaterThan,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,
}

/// Errors from locator parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("unexpected character at byte {0}")]
    InvalidCharacter(usize),
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of selector: {0}")]
    UnexpectedEof(String),
}

/// A single selector component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// Type selector: matches the element tag (e.g. `div`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute presence: `[name]`.
    Attribute(String),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A sequence of components without combinators, e.g. `h5.modal-title`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// A full selector: compound selectors joined by combinators.
///
/// `parts` holds `n` compounds and `combinators` holds the `n - 1` joins
/// between them, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse a locator string.
    ///
    /// The empty string parses to the empty selector, which matches nothing.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut tokens = Vec::new();
        for (result, span) in Token::lexer(input).spanned() {
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(()) => return Err(SelectorError::InvalidCharacter(span.start)),
            }
        }

        let mut selector = Selector::default();
        let mut current = CompoundSelector::default();
        let mut pending: Option<Combinator> = None;
        let mut last_end: Option<usize> = None;
        let mut i = 0;

        while i < tokens.len() {
            let (token, span) = &tokens[i];
            let adjacent = last_end == Some(span.start);

            if *token == Token::GreaterThan {
                if current.components.is_empty() {
                    return Err(unexpected(span.start, "'>' without a left-hand selector"));
                }
                selector.push_compound(std::mem::take(&mut current), pending.take());
                pending = Some(Combinator::Child);
                last_end = None;
                i += 1;
                continue;
            }

            // A gap between two components starts a new compound.
            if !adjacent && !current.components.is_empty() {
                selector.push_compound(std::mem::take(&mut current), pending.take());
                pending = Some(Combinator::Descendant);
            }

            let (component, end, consumed) = match token {
                Token::Ident => (
                    SelectorComponent::Type(input[span.clone()].to_ascii_lowercase()),
                    span.end,
                    1,
                ),
                Token::Star => (SelectorComponent::Universal, span.end, 1),
                Token::Dot | Token::Hash => {
                    let (name_tok, name_span) = tokens
                        .get(i + 1)
                        .ok_or_else(|| SelectorError::UnexpectedEof("expected a name".into()))?;
                    let valid = match token {
                        Token::Dot => *name_tok == Token::Ident,
                        _ => matches!(name_tok, Token::Ident | Token::Digits),
                    };
                    if !valid || name_span.start != span.end {
                        return Err(unexpected(name_span.start, "expected a name"));
                    }
                    let name = input[name_span.clone()].to_owned();
                    let component = match token {
                        Token::Dot => SelectorComponent::Class(name),
                        _ => SelectorComponent::Id(name),
                    };
                    (component, name_span.end, 2)
                }
                Token::BracketOpen => {
                    let name = match tokens.get(i + 1) {
                        Some((Token::Ident, s)) => input[s.clone()].to_ascii_lowercase(),
                        Some((_, s)) => return Err(unexpected(s.start, "expected attribute name")),
                        None => return Err(SelectorError::UnexpectedEof("expected attribute name".into())),
                    };
                    let end = match tokens.get(i + 2) {
                        Some((Token::BracketClose, s)) => s.end,
                        Some((_, s)) => return Err(unexpected(s.start, "expected ']'")),
                        None => return Err(SelectorError::UnexpectedEof("expected ']'".into())),
                    };
                    (SelectorComponent::Attribute(name), end, 3)
                }
                Token::Digits | Token::BracketClose | Token::GreaterThan => {
                    return Err(unexpected(span.start, "unexpected token"));
                }
            };

            current.components.push(component);
            last_end = Some(end);
            i += consumed;
        }

        if current.components.is_empty() {
            if pending.is_some() {
                return Err(SelectorError::UnexpectedEof("dangling combinator".into()));
            }
        } else {
            selector.push_compound(current, pending);
        }
        Ok(selector)
    }

    /// Whether this selector has no parts (the root sentinel).
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn push_compound(&mut self, compound: CompoundSelector, joined_by: Option<Combinator>) {
        if let Some(combinator) = joined_by {
            self.combinators.push(combinator);
        }
        self.parts.push(compound);
    }

    /// Check whether this selector matches `node_id`.
    ///
    /// Walks the parts from right to left, navigating the DOM via combinators.
    /// Ancestors are searched all the way to the top level.
    pub fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        let Some(last) = self.parts.last() else {
            return false;
        };
        if !dom.get(node_id).is_some_and(|node| matches_compound(last, node)) {
            return false;
        }

        let mut current = node_id;
        for idx in (0..self.parts.len() - 1).rev() {
            let compound = &self.parts[idx];
            match self.combinators[idx] {
                Combinator::Child => {
                    let Some(parent_id) = dom.parent(current) else {
                        return false;
                    };
                    if !dom.get(parent_id).is_some_and(|p| matches_compound(compound, p)) {
                        return false;
                    }
                    current = parent_id;
                }
                Combinator::Descendant => {
                    let found = dom.ancestors(current).into_iter().find(|&ancestor| {
                        dom.get(ancestor)
                            .is_some_and(|a| matches_compound(compound, a))
                    });
                    match found {
                        Some(ancestor) => current = ancestor,
                        None => return false,
                    }
                }
            }
        }
        true
    }
}

fn unexpected(position: usize, message: &str) -> SelectorError {
    SelectorError::UnexpectedToken {
        position,
        message: message.to_owned(),
    }
}

/// Check whether a compound selector matches a single node's data.
///
/// Text nodes never match.
fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    node.is_element()
        && compound.components.iter().all(|component| match component {
            SelectorComponent::Type(name) => node.tag() == Some(name.as_str()),
            SelectorComponent::Class(name) => node.has_class(name),
            SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
            SelectorComponent::Attribute(name) => node.has_attr(name),
            SelectorComponent::Universal => true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compound(components: Vec<SelectorComponent>) -> CompoundSelector {
        CompoundSelector { components }
    }

    #[test]
    fn parse_empty_is_root_sentinel() {
        let selector = Selector::parse("").unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn parse_type_and_class() {
        let selector = Selector::parse("div.modal-dialog").unwrap();
        assert_eq!(
            selector.parts,
            vec![compound(vec![
                SelectorComponent::Type("div".into()),
                SelectorComponent::Class("modal-dialog".into()),
            ])]
        );
        assert!(selector.combinators.is_empty());
    }

    #[test]
    fn parse_descendant_chain() {
        let selector = Selector::parse("div.modal-header h5.modal-title").unwrap();
        assert_eq!(selector.parts.len(), 2);
        assert_eq!(selector.combinators, vec![Combinator::Descendant]);
    }

    #[test]
    fn parse_child_combinator_with_and_without_spaces() {
        let spaced = Selector::parse("div > p").unwrap();
        let tight = Selector::parse("div>p").unwrap();
        assert_eq!(spaced, tight);
        assert_eq!(spaced.combinators, vec![Combinator::Child]);
    }

    #[test]
    fn parse_id_with_numeric_suffix() {
        let selector = Selector::parse("#dynmodal-12").unwrap();
        assert_eq!(
            selector.parts,
            vec![compound(vec![SelectorComponent::Id("dynmodal-12".into())])]
        );
    }

    #[test]
    fn parse_attribute_presence() {
        let selector = Selector::parse("button[data-close]").unwrap();
        assert_eq!(
            selector.parts,
            vec![compound(vec![
                SelectorComponent::Type("button".into()),
                SelectorComponent::Attribute("data-close".into()),
            ])]
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Selector::parse("div!").is_err());
        assert!(Selector::parse("div >").is_err());
        assert!(Selector::parse("> p").is_err());
        assert!(Selector::parse(". foo").is_err());
        assert!(Selector::parse("[data-close").is_err());
    }

    #[test]
    fn matches_descendant_skips_intermediate() {
        let mut dom = Dom::new();
        let header = dom.insert(NodeData::element("div").with_class("modal-header"));
        let wrap = dom.insert_child(header, NodeData::element("span"));
        let title = dom.insert_child(wrap, NodeData::element("h5").with_class("modal-title"));

        let descendant = Selector::parse("div.modal-header h5.modal-title").unwrap();
        let child = Selector::parse("div.modal-header > h5.modal-title").unwrap();
        assert!(descendant.matches(&dom, title));
        assert!(!child.matches(&dom, title));
    }

    #[test]
    fn text_nodes_never_match() {
        let mut dom = Dom::new();
        let text = dom.insert(NodeData::text("hi"));
        assert!(!Selector::parse("*").unwrap().matches(&dom, text));
    }
}
