//! Renderer
//!
//!     Converts tokens back to text. The default rendering of each kind:
//!
//!     root        → nothing
//!     inline      → the token's data, untouched
//!     whitespace  → (newlines in data - 1) newlines, then the token's indentation
//!     other kinds → a newline, the token's indentation, then the data
//!
//!     So whitespace keeps the count of blank lines but drops its literal spacing, and
//!     the next token supplies the final line break itself. A grammar rule for the
//!     token's kind is consulted before any of this (see [`Grammar`]).
//!
//!     Document output walks the linear chain, not the tree: the tree exists only to
//!     give every token a depth, so output order is always source order.

use crate::formatting::grammar::{Grammar, TokenView};
use crate::token::{TokenId, TokenKind, TokenTree};
use log::trace;

/// Rendering of `id` ignoring any grammar.
pub fn default_render(tree: &TokenTree, id: TokenId, unit: Option<&str>) -> String {
    let data = tree.data(id);
    match tree.kind(id) {
        TokenKind::Root => String::new(),
        TokenKind::Inline => data.to_string(),
        TokenKind::Whitespace => {
            let breaks = data.matches('\n').count().saturating_sub(1);
            let mut rendered = "\n".repeat(breaks);
            rendered.push_str(&tree.indentation(id, unit));
            rendered
        }
        TokenKind::Open | TokenKind::Close | TokenKind::Block | TokenKind::Text => {
            format!("\n{}{}", tree.indentation(id, unit), data)
        }
    }
}

/// Renders tokens of one tree through a grammar.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    tree: &'a TokenTree,
    grammar: &'a Grammar,
}

impl<'a> Renderer<'a> {
    pub fn new(tree: &'a TokenTree, grammar: &'a Grammar) -> Self {
        Renderer { tree, grammar }
    }

    /// Render one token: the grammar rule for its kind if it yields, the default
    /// otherwise.
    pub fn render(&self, id: TokenId, unit: Option<&str>) -> String {
        let view = TokenView::new(self.tree, id, unit);
        self.grammar
            .apply(&view)
            .unwrap_or_else(|| view.default_render())
    }

    /// Render `start` and every token after it in source order.
    ///
    /// `unit` replaces each token's own indentation unit when given.
    pub fn serialize_linear(&self, start: TokenId, unit: Option<&str>) -> String {
        let mut output = String::new();
        let mut count = 0usize;
        for id in self.tree.linear(start) {
            output.push_str(&self.render(id, unit));
            count += 1;
        }
        trace!(tokens = count, bytes = output.len(); "Serialized linear chain");
        output
    }

    /// Render the subtree rooted at `start` in depth-first pre-order.
    pub fn serialize_subtree(&self, start: TokenId, unit: Option<&str>) -> String {
        self.tree
            .descendants(start)
            .map(|id| self.render(id, unit))
            .collect()
    }
}
