//! CSS lexicon
//!
//!     Rule blocks nest through the braces; declarations, comments and statement
//!     at-rules are blocks on their own line. Selectors are left to the text fallback.
//!     CSS needs no grammar.

use crate::lexing::Lexicon;
use crate::token::TokenKind;

pub fn lexicon() -> Lexicon {
    Lexicon::new()
        .rule(r"\s*\n+\s*", TokenKind::Whitespace)
        .rule(r"(?s)/\*.*?\*/", TokenKind::Block)
        .rule(r"\{", TokenKind::Open)
        .rule(r"\}", TokenKind::Close)
        .rule(r"@[\w-]+[^;{}]*;", TokenKind::Block)
        .rule(r"[\w-]+\s*:\s*[^;{}]+;", TokenKind::Block)
}
