//! HTML fragment parsing and serialization.
//!
//! Parsing uses two logos lexers: [`Markup`] for content between tags and
//! [`TagToken`] for the inside of an opening tag. The lexer morphs between the
//! two as tags open and close.
//!
//! Content structure is recovered the way an HTML fragment parser does it:
//! optional end tags (`p`, `li` and friends) close implicitly, elements still
//! open at end of input are closed there, stray end tags are dropped, and a
//! `<` that does not start a tag is text. Only broken tag syntax is rejected.

use logos::{Lexer, Logos};

use super::node::{NodeData, NodeId, NodeKind};
use super::tree::Dom;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose opening tag ends an open `p`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

/// Errors from HTML fragment parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid markup at byte {0}")]
    InvalidMarkup(usize),
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// Tokens between tags.
#[derive(Logos, Debug, Clone, PartialEq)]
enum Markup {
    /// `<tag`: start of an opening tag. The lexer morphs to [`TagToken`].
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*")]
    TagStart,

    /// `</tag>` closing tag.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\n\r\f]*>")]
    EndTag,

    /// `<!-- ... -->`, discarded. Unterminated comments run to end of input.
    #[token("<!--", skip_comment)]
    Comment,

    /// A `<` that starts no tag. Kept as text.
    #[token("<")]
    Lt,

    /// Character data.
    #[regex(r"[^<]+")]
    Text,
}

/// Tokens inside an opening tag.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum TagToken {
    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,

    /// A `/` not followed by `>`. Ignored.
    #[token("/")]
    Slash,

    #[token("=")]
    Equals,

    /// Quoted attribute value, either quote style.
    #[regex(r#""[^"]*"|'[^']*'"#)]
    Quoted,

    /// Attribute name.
    #[regex(r#"[^ \t\n\r\f"'<>/=]+"#)]
    Name,
}

/// Consume everything up to and including the next `-->`.
fn skip_comment(lex: &mut Lexer<Markup>) -> bool {
    let len = match lex.remainder().find("-->") {
        Some(end) => end + 3,
        None => lex.remainder().len(),
    };
    lex.bump(len);
    true
}

/// Whether opening `tag` implicitly ends the open element `open`.
fn closes_implicitly(tag: &str, open: &str) -> bool {
    match open {
        "p" => CLOSES_PARAGRAPH.contains(&tag),
        "li" => tag == "li",
        "dt" | "dd" => matches!(tag, "dt" | "dd"),
        "option" => matches!(tag, "option" | "optgroup"),
        "tr" => tag == "tr",
        "td" | "th" => matches!(tag, "td" | "th" | "tr"),
        _ => false,
    }
}

/// Parse `input` into `dom` as top-level nodes.
///
/// On error `dom` may hold a partial parse; callers parse into a scratch DOM.
pub(crate) fn parse_into(dom: &mut Dom, input: &str) -> Result<(), ParseError> {
    let mut open: Vec<NodeId> = Vec::new();
    let mut lex = Markup::lexer(input);

    while let Some(result) = lex.next() {
        let span = lex.span();
        match result {
            Ok(Markup::Text) => push_text(dom, &open, &decode_entities(lex.slice())),
            Ok(Markup::Lt) => push_text(dom, &open, "<"),
            Ok(Markup::Comment) => {}
            Ok(Markup::EndTag) => {
                let tag = lex.slice()[2..]
                    .trim_end_matches('>')
                    .trim()
                    .to_ascii_lowercase();
                match open.iter().rposition(|&id| tag_of(dom, id) == Some(tag.as_str())) {
                    Some(depth) => open.truncate(depth),
                    None => tracing::trace!(%tag, position = span.start, "dropping stray end tag"),
                }
            }
            Ok(Markup::TagStart) => {
                let mut data = NodeData::element(&lex.slice()[1..]);
                let mut inside = lex.morph::<TagToken>();
                let self_closed = parse_attributes(&mut inside, &mut data)?;
                lex = inside.morph::<Markup>();

                let tag = data.tag().unwrap_or_default().to_owned();
                while let Some(&top) = open.last() {
                    match tag_of(dom, top) {
                        Some(current) if closes_implicitly(&tag, current) => {
                            open.pop();
                        }
                        _ => break,
                    }
                }

                let is_void = VOID_ELEMENTS.contains(&tag.as_str());
                let id = push(dom, &open, data);
                if !self_closed && !is_void {
                    open.push(id);
                }
            }
            Err(()) => return Err(ParseError::InvalidMarkup(span.start)),
        }
    }
    Ok(())
}

fn tag_of(dom: &Dom, id: NodeId) -> Option<&str> {
    dom.get(id).and_then(NodeData::tag)
}

fn push(dom: &mut Dom, open: &[NodeId], data: NodeData) -> NodeId {
    match open.last() {
        Some(&parent) => dom.insert_child(parent, data),
        None => dom.insert(data),
    }
}

/// Append text, merging into a preceding text sibling.
fn push_text(dom: &mut Dom, open: &[NodeId], text: &str) {
    let last = match open.last() {
        Some(&parent) => dom.children(parent).last().copied(),
        None => dom.roots().last().copied(),
    };
    if let Some(NodeKind::Text(existing)) = last.and_then(|id| dom.get_mut(id)).map(|d| &mut d.kind) {
        existing.push_str(text);
        return;
    }
    push(dom, open, NodeData::text(text));
}

/// Read attributes up to `>` or `/>`. Returns whether the tag self-closed.
///
/// Unquoted values are read straight from the input up to whitespace or `>`,
/// so they may contain `/`.
fn parse_attributes(lex: &mut Lexer<TagToken>, data: &mut NodeData) -> Result<bool, ParseError> {
    let mut pending: Option<String> = None;
    let mut awaiting_value = false;

    while let Some(result) = lex.next() {
        let position = lex.span().start;
        match result {
            Ok(TagToken::Quoted) if awaiting_value => {
                let name = pending.take().ok_or(ParseError::InvalidMarkup(position))?;
                let raw = lex.slice();
                data.set_attr(&name, Some(decode_entities(&raw[1..raw.len() - 1])));
                awaiting_value = false;
            }
            Ok(TagToken::Equals) if !awaiting_value => {
                let Some(name) = pending.take() else {
                    return Err(ParseError::InvalidMarkup(position));
                };
                let rest = lex.remainder();
                let value = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
                let skipped = rest.len() - value.len();
                if value.is_empty() || value.starts_with(['"', '\'']) {
                    pending = Some(name);
                    awaiting_value = true;
                    continue;
                }
                let len = value
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(value.len());
                data.set_attr(&name, Some(decode_entities(&value[..len])));
                lex.bump(skipped + len);
            }
            Ok(TagToken::Name) if !awaiting_value => {
                if let Some(flag) = pending.replace(lex.slice().to_owned()) {
                    data.set_attr(&flag, None);
                }
            }
            Ok(TagToken::Slash) if !awaiting_value => {}
            Ok(TagToken::Close | TagToken::SelfClose) if !awaiting_value => {
                if let Some(flag) = pending.take() {
                    data.set_attr(&flag, None);
                }
                return Ok(matches!(result, Ok(TagToken::SelfClose)));
            }
            _ => return Err(ParseError::InvalidMarkup(position)),
        }
    }
    Err(ParseError::UnexpectedEof("unterminated tag".into()))
}

/// Decode the character references this crate's templates and callers use.
///
/// Unknown references are kept verbatim.
pub(crate) fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_owned();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            let ch = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                "times" => Some('\u{d7}'),
                _ => numeric_reference(name),
            }?;
            Some((ch, semi + 1))
        });
        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_reference(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Serialize the subtree rooted at `id` as HTML.
///
/// Attribute order is `id`, `class`, then the rest in insertion order.
pub(crate) fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(data) = dom.get(id) else {
        return;
    };
    let tag = match &data.kind {
        NodeKind::Text(text) => {
            escape_text(text, out);
            return;
        }
        NodeKind::Element(tag) => tag,
    };

    out.push('<');
    out.push_str(tag);
    if let Some(element_id) = &data.id {
        out.push_str(" id=\"");
        escape_attr(element_id, out);
        out.push('"');
    }
    if !data.classes.is_empty() {
        out.push_str(" class=\"");
        escape_attr(&data.classes.join(" "), out);
        out.push('"');
    }
    for (name, value) in &data.attributes {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            escape_attr(value, out);
            out.push('"');
        }
    }

    if VOID_ELEMENTS.contains(&tag.as_str()) {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for &child in dom.children(id) {
        write_node(dom, child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
