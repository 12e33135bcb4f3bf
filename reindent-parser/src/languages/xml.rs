//! XML lexicon and grammar
//!
//!     Declaration order matters: comments, CDATA sections, processing instructions
//!     and doctypes are tried before tags, and self-closing tags before opening tags,
//!     so `<b/>` is never taken for an opening tag.
//!
//!     The grammar keeps mixed content on one line: text that directly follows a tag
//!     stays glued to it, and a tag that follows text or closes an empty element does
//!     not start a new line either.

use crate::formatting::{Grammar, TokenView};
use crate::lexing::Lexicon;
use crate::token::TokenKind;

pub fn lexicon() -> Lexicon {
    non_tags()
        .rule(r"<[^/!?][^>]*/>", TokenKind::Inline)
        .rule(r"</[^>]+>", TokenKind::Close)
        .rule(r"<[^/!?][^>]*>", TokenKind::Open)
}

/// XML lexicon that also knows HTML's void elements (`<br>`, `<img ...>`), which
/// never get a closing tag and so must not open a scope.
pub fn html_lexicon() -> Lexicon {
    non_tags()
        .rule(
            r"(?i)<(?:area|base|br|col|embed|hr|img|input|link|meta|source|track|wbr)\b[^>]*>",
            TokenKind::Inline,
        )
        .rule(r"<[^/!?][^>]*/>", TokenKind::Inline)
        .rule(r"</[^>]+>", TokenKind::Close)
        .rule(r"<[^/!?][^>]*>", TokenKind::Open)
}

/// Whitespace, comments, CDATA, processing instructions and doctypes.
fn non_tags() -> Lexicon {
    Lexicon::new()
        .rule(r"\s*\n+\s*", TokenKind::Whitespace)
        .rule(r"(?s)<!--.*?-->", TokenKind::Block)
        .rule(r"(?s)<!\[CDATA\[.*?\]\]>", TokenKind::Block)
        .rule(r"(?s)<\?.*?\?>", TokenKind::Block)
        .rule(r"(?is)<!DOCTYPE.*?>", TokenKind::Block)
}

fn raw_after(view: &TokenView<'_>, kinds: &[TokenKind]) -> Option<String> {
    view.preceding_kind()
        .filter(|kind| kinds.contains(kind))
        .map(|_| view.data().to_string())
}

/// An opening tag right after text stays on the text's line.
fn open_tag(view: &TokenView<'_>) -> Option<String> {
    raw_after(view, &[TokenKind::Text])
}

/// A closing tag stays on the line of an empty element or of the text it ends.
fn close_tag(view: &TokenView<'_>) -> Option<String> {
    raw_after(view, &[TokenKind::Open, TokenKind::Text])
}

/// Text directly inside or after a tag is not moved to a line of its own.
fn text(view: &TokenView<'_>) -> Option<String> {
    raw_after(view, &[TokenKind::Open, TokenKind::Close])
}

/// A self-closing element gets its own line, unless it sits in running text.
fn empty_element(view: &TokenView<'_>) -> Option<String> {
    match view.preceding_kind() {
        Some(TokenKind::Text) => Some(view.data().to_string()),
        _ => Some(format!("\n{}{}", view.indentation(), view.data())),
    }
}

pub fn grammar() -> Grammar {
    Grammar::new()
        .rule(TokenKind::Open, open_tag)
        .rule(TokenKind::Close, close_tag)
        .rule(TokenKind::Text, text)
        .rule(TokenKind::Inline, empty_element)
}
