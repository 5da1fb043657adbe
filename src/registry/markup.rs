//! logos-based reader for server-emitted head markup.
//!
//! Only what a document head carries is understood: start tags with
//! attributes, end tags, comments, and the raw text of `<style>`-like
//! elements. Nesting is flattened; anything else between tags is skipped.

use logos::{Lexer, Logos};

/// Markup token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `<!-- ... -->`, consumed whole.
    #[token("<!--", comment)]
    Comment,

    /// `</name>`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\n\r\f]*>")]
    EndTag,

    /// `<name`, the start of a start tag.
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*")]
    TagOpen,

    /// `/>`
    #[token("/>")]
    SelfClose,

    /// `>`
    #[token(">")]
    TagEnd,

    /// `=`
    #[token("=")]
    Equals,

    /// `"..."`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'...'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Attribute names and unquoted attribute values.
    #[regex(r"[a-zA-Z0-9_:.-]+")]
    Name,
}

fn comment(lex: &mut Lexer<Token>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

/// Elements whose content is raw text, not markup.
const RAW_TEXT: &[&str] = &["style", "script", "title"];

/// Returns `true` if `tag` holds raw text.
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT.iter().any(|raw| raw.eq_ignore_ascii_case(tag))
}

/// An element read from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Raw text content; empty for non-raw-text elements.
    pub text: String,
}

/// Read every element of an HTML fragment, in document order.
pub fn parse(html: &str) -> Vec<Parsed> {
    let mut lex = Token::lexer(html);
    let mut out = Vec::new();

    while let Some(token) = lex.next() {
        if token != Ok(Token::TagOpen) {
            continue;
        }
        let tag = lex.slice()[1..].to_ascii_lowercase();
        let (attributes, self_closed) = attributes(&mut lex);

        let mut text = String::new();
        if !self_closed && is_raw_text(&tag) {
            let rest = lex.remainder();
            let end = find_end_tag(rest, &tag).unwrap_or(rest.len());
            text.push_str(&rest[..end]);
            lex.bump(end);
        }
        out.push(Parsed {
            tag,
            attributes,
            text,
        });
    }
    out
}

/// Read attributes up to the end of a start tag. Returns whether the tag
/// closed itself.
fn attributes(lex: &mut Lexer<Token>) -> (Vec<(String, String)>, bool) {
    let mut attributes: Vec<(String, String)> = Vec::new();
    let mut expect_value = false;

    while let Some(token) = lex.next() {
        match token {
            Ok(Token::TagEnd) => return (attributes, false),
            Ok(Token::SelfClose) => return (attributes, true),
            Ok(Token::Equals) => expect_value = true,
            Ok(Token::DoubleQuoted | Token::SingleQuoted) if expect_value => {
                let slice = lex.slice();
                set_last(&mut attributes, &slice[1..slice.len() - 1]);
                expect_value = false;
            }
            Ok(Token::Name) if expect_value => {
                set_last(&mut attributes, lex.slice());
                expect_value = false;
            }
            Ok(Token::Name) => {
                attributes.push((lex.slice().to_ascii_lowercase(), String::new()));
            }
            _ => expect_value = false,
        }
    }
    (attributes, false)
}

fn set_last(attributes: &mut [(String, String)], raw: &str) {
    if let Some((_, value)) = attributes.last_mut() {
        *value = html_escape::decode_html_entities(raw).into_owned();
    }
}

/// Byte offset of the `</tag` that ends a raw text element.
fn find_end_tag(text: &str, tag: &str) -> Option<usize> {
    let lower = text.to_ascii_lowercase();
    let needle = format!("</{tag}");
    let mut from = 0;
    while let Some(found) = lower[from..].find(&needle) {
        let at = from + found;
        let next = lower.as_bytes().get(at + needle.len()).copied();
        if matches!(next, None | Some(b'>' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'/')) {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}
