//! Arena-backed token tree
//!
//!     Every token of a document lives in one [`TokenTree`]. Nodes are stored in a
//!     `Vec` and refer to each other by [`TokenId`], which gives two overlapping
//!     structures over the same nodes:
//!
//!     - the nesting tree: `parent` / `children`, rooted at [`TokenTree::ROOT`];
//!     - the linear chain: `previous` / `following`, in source order, starting at the
//!       root.
//!
//!     The root is always index 0 and the lexer's tokens follow in source order, so
//!     arena order and linear order coincide for a tree built by
//!     [`build_tree`](crate::building::build_tree).

use super::{Token, TokenId, TokenKind};
use std::iter::FusedIterator;

/// One token plus its tree and chain links.
#[derive(Debug, Clone)]
struct Node {
    token: Token,
    parent: Option<TokenId>,
    children: Vec<TokenId>,
    previous: Option<TokenId>,
    following: Option<TokenId>,
    depth: isize,
    indentation_unit: String,
}

impl Node {
    fn new(token: Token) -> Self {
        Node {
            token,
            parent: None,
            children: Vec::new(),
            previous: None,
            following: None,
            depth: 0,
            indentation_unit: String::new(),
        }
    }
}

/// Owner of every token of one document.
#[derive(Debug, Clone)]
pub struct TokenTree {
    nodes: Vec<Node>,
}

impl TokenTree {
    pub const ROOT: TokenId = TokenId(0);

    /// A tree holding only the synthetic root.
    pub fn new() -> Self {
        let mut root = Node::new(Token::root());
        root.depth = -1;
        TokenTree { nodes: vec![root] }
    }

    /// Number of tokens, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn root(&self) -> TokenId {
        Self::ROOT
    }

    /// First token after the root in source order.
    pub fn first(&self) -> Option<TokenId> {
        self.following(Self::ROOT)
    }

    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.nodes[id.0].token.kind
    }

    pub fn data(&self, id: TokenId) -> &str {
        &self.nodes[id.0].token.data
    }

    pub fn parent(&self, id: TokenId) -> Option<TokenId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: TokenId) -> &[TokenId] {
        &self.nodes[id.0].children
    }

    pub fn following(&self, id: TokenId) -> Option<TokenId> {
        self.nodes[id.0].following
    }

    /// The raw predecessor in source order, whitespace included.
    pub fn previous(&self, id: TokenId) -> Option<TokenId> {
        self.nodes[id.0].previous
    }

    /// The nearest predecessor in source order that is not whitespace.
    ///
    /// Read this as XPath's `preceding` axis rather than `preceding-sibling`: the first
    /// token inside an open token has that open token as its preceding token. The first
    /// token of the document is preceded by the root, and the root by nothing.
    pub fn preceding(&self, id: TokenId) -> Option<TokenId> {
        let mut current = self.previous(id)?;
        while self.kind(current) == TokenKind::Whitespace {
            match self.previous(current) {
                Some(previous) => current = previous,
                None => break,
            }
        }
        Some(current)
    }

    /// Nesting depth: -1 for the root, parent's depth plus one otherwise.
    ///
    /// The value is the one stored by the last [`assign_depths`](Self::assign_depths)
    /// pass.
    pub fn depth(&self, id: TokenId) -> isize {
        self.nodes[id.0].depth
    }

    /// Recompute every depth top-down from the root.
    pub fn assign_depths(&mut self) {
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let depth = match self.nodes[id.0].parent {
                Some(parent) => self.nodes[parent.0].depth + 1,
                None => -1,
            };
            self.nodes[id.0].depth = depth;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
    }

    pub fn indentation_unit(&self, id: TokenId) -> &str {
        &self.nodes[id.0].indentation_unit
    }

    pub fn set_indentation_unit(&mut self, id: TokenId, unit: impl Into<String>) {
        self.nodes[id.0].indentation_unit = unit.into();
    }

    /// Give every token the same indentation unit.
    pub fn set_indentation_unit_all(&mut self, unit: &str) {
        for node in &mut self.nodes {
            node.indentation_unit.clear();
            node.indentation_unit.push_str(unit);
        }
    }

    /// The unit repeated `depth` times. `unit` replaces the token's own unit when given.
    pub fn indentation(&self, id: TokenId, unit: Option<&str>) -> String {
        let unit = unit.unwrap_or_else(|| self.indentation_unit(id));
        match usize::try_from(self.depth(id)) {
            Ok(depth) => unit.repeat(depth),
            Err(_) => String::new(),
        }
    }

    /// Walk the linear chain starting at `start` (inclusive).
    pub fn linear(&self, start: TokenId) -> Linear<'_> {
        Linear {
            tree: self,
            next: Some(start),
        }
    }

    /// Depth-first pre-order walk over the subtree rooted at `start` (inclusive).
    pub fn descendants(&self, start: TokenId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![start],
        }
    }

    /// Concatenated data of every token in source order: the original document.
    pub fn source(&self) -> String {
        self.linear(Self::ROOT).map(|id| self.data(id)).collect()
    }

    /// Add a detached token. Callers link and attach it.
    pub(crate) fn push(&mut self, token: Token) -> TokenId {
        let id = TokenId(self.nodes.len());
        self.nodes.push(Node::new(token));
        id
    }

    /// Make `child` the last child of `parent`.
    pub(crate) fn attach(&mut self, parent: TokenId, child: TokenId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Chain `next` right after `previous` in source order.
    pub(crate) fn link(&mut self, previous: TokenId, next: TokenId) {
        self.nodes[previous.0].following = Some(next);
        self.nodes[next.0].previous = Some(previous);
    }
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the `following` chain.
pub struct Linear<'a> {
    tree: &'a TokenTree,
    next: Option<TokenId>,
}

impl Iterator for Linear<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let current = self.next?;
        self.next = self.tree.following(current);
        Some(current)
    }
}

impl FusedIterator for Linear<'_> {}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a TokenTree,
    stack: Vec<TokenId>,
}

impl Iterator for Descendants<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

impl FusedIterator for Descendants<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, data: &str) -> Token {
        Token::new(kind, data, 0..data.len())
    }

    /// root → open → (whitespace, text); close under root
    fn small_tree() -> (TokenTree, [TokenId; 4]) {
        let mut tree = TokenTree::new();
        let open = tree.push(token(TokenKind::Open, "<a>"));
        let space = tree.push(token(TokenKind::Whitespace, "\n  "));
        let text = tree.push(token(TokenKind::Text, "hi"));
        let close = tree.push(token(TokenKind::Close, "</a>"));
        tree.link(TokenTree::ROOT, open);
        tree.link(open, space);
        tree.link(space, text);
        tree.link(text, close);
        tree.attach(TokenTree::ROOT, open);
        tree.attach(open, space);
        tree.attach(open, text);
        tree.attach(TokenTree::ROOT, close);
        tree.assign_depths();
        (tree, [open, space, text, close])
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = TokenTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(TokenTree::ROOT), -1);
        assert_eq!(tree.kind(TokenTree::ROOT), TokenKind::Root);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.preceding(TokenTree::ROOT), None);
    }

    #[test]
    fn test_depths() {
        let (tree, [open, space, text, close]) = small_tree();
        assert_eq!(tree.depth(open), 0);
        assert_eq!(tree.depth(space), 1);
        assert_eq!(tree.depth(text), 1);
        assert_eq!(tree.depth(close), 0);
    }

    #[test]
    fn test_preceding_skips_whitespace() {
        let (tree, [open, space, text, close]) = small_tree();
        assert_eq!(tree.preceding(open), Some(TokenTree::ROOT));
        assert_eq!(tree.preceding(space), Some(open));
        assert_eq!(tree.preceding(text), Some(open));
        assert_eq!(tree.preceding(close), Some(text));
        assert_eq!(tree.previous(text), Some(space));
    }

    #[test]
    fn test_preceding_stops_at_root_after_leading_whitespace() {
        let mut tree = TokenTree::new();
        let space = tree.push(token(TokenKind::Whitespace, "\n"));
        let block = tree.push(token(TokenKind::Block, "x;"));
        tree.link(TokenTree::ROOT, space);
        tree.link(space, block);
        assert_eq!(tree.preceding(block), Some(TokenTree::ROOT));
    }

    #[test]
    fn test_indentation() {
        let (mut tree, [open, _, text, _]) = small_tree();
        assert_eq!(tree.indentation(text, Some("--")), "--");
        assert_eq!(tree.indentation(open, Some("--")), "");
        assert_eq!(tree.indentation(TokenTree::ROOT, Some("--")), "");
        assert_eq!(tree.indentation(text, None), "");

        tree.set_indentation_unit(text, "\t");
        assert_eq!(tree.indentation(text, None), "\t");
        tree.set_indentation_unit_all("  ");
        assert_eq!(tree.indentation_unit(open), "  ");
        assert_eq!(tree.indentation(text, None), "  ");
    }

    #[test]
    fn test_walks() {
        let (tree, [open, space, text, close]) = small_tree();
        let linear: Vec<_> = tree.linear(TokenTree::ROOT).collect();
        assert_eq!(linear, vec![TokenTree::ROOT, open, space, text, close]);

        let subtree: Vec<_> = tree.descendants(open).collect();
        assert_eq!(subtree, vec![open, space, text]);

        assert_eq!(tree.source(), "<a>\n  hi</a>");
    }
}
