//! Core token types shared by the lexer, the tree builder and the renderer.
//!
//!     A token is both a node in the nesting tree and a link in the linear chain that
//!     mirrors source order. The flat [`Token`] is what the lexer emits; once the tree
//!     is built every token lives in a [`TokenTree`] arena and is addressed by a
//!     [`TokenId`].

pub mod tree;

pub use tree::TokenTree;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Synthetic ancestor of every token. Never produced by a lexicon.
    Root,
    /// Begins a nesting scope (`<a>`, `{`).
    Open,
    /// Ends the scope of the most recently entered open token.
    Close,
    /// Self-contained unit without nesting effect (comments, declarations).
    Block,
    /// Like a block, but rendered without an injected line break.
    Inline,
    /// Runs of whitespace that contain line breaks.
    Whitespace,
    /// Anything the lexicon did not match.
    Text,
}

impl TokenKind {
    pub const ALL: [TokenKind; 7] = [
        TokenKind::Root,
        TokenKind::Open,
        TokenKind::Close,
        TokenKind::Block,
        TokenKind::Inline,
        TokenKind::Whitespace,
        TokenKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Root => "root",
            TokenKind::Open => "open",
            TokenKind::Close => "close",
            TokenKind::Block => "block",
            TokenKind::Inline => "inline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no token kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind '{0}'")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTokenKind(s.to_string()))
    }
}

/// Stable handle of a token inside a [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId(pub(crate) usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A token as emitted by the lexer: its kind, the exact source text and where it came
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub data: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, data: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            data: data.into(),
            span,
        }
    }

    pub(crate) fn root() -> Self {
        Token::new(TokenKind::Root, "", 0..0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.data)
    }
}
