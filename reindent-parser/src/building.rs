//! Tree building
//!
//!     Nests a flat token list into a [`TokenTree`]. The builder keeps a single cursor,
//!     the scope currently open, which starts at the root. Each token is chained after
//!     the previous one in source order and then handed to the cursor's attachment
//!     rule, which decides where the token goes and returns the next cursor.
//!
//! Attachment Rules
//!
//!     root cursor, any token    → child of root; an open token becomes the cursor
//!     open cursor, close token  → sibling of the open token; cursor moves to its parent
//!     open cursor, other token  → child of the open token; an open token becomes the cursor
//!
//!     So an open/close pair are siblings and everything between them is nested under
//!     the open token. Only root and open tokens are ever the cursor.
//!
//!     Malformed input is never an error: a close token with no open scope is attached
//!     to the root like any other token, and an open token that is never closed keeps
//!     its scope open to the end of the document.

use crate::token::{Token, TokenId, TokenKind, TokenTree};
use log::trace;

/// Attach `token` relative to `cursor` and return the cursor for the next token.
fn hierarchise(tree: &mut TokenTree, cursor: TokenId, token: TokenId) -> TokenId {
    let kind = tree.kind(token);
    match (tree.kind(cursor), tree.parent(cursor)) {
        (TokenKind::Open, Some(scope)) if kind == TokenKind::Close => {
            tree.attach(scope, token);
            scope
        }
        _ => {
            tree.attach(cursor, token);
            if kind == TokenKind::Open {
                token
            } else {
                cursor
            }
        }
    }
}

/// Build the nesting tree for `tokens` (in source order) and assign every depth.
pub fn build_tree(tokens: impl IntoIterator<Item = Token>) -> TokenTree {
    let mut tree = TokenTree::new();
    let mut cursor = TokenTree::ROOT;
    let mut previous = TokenTree::ROOT;

    for token in tokens {
        let id = tree.push(token);
        tree.link(previous, id);
        cursor = hierarchise(&mut tree, cursor, id);
        previous = id;
    }

    tree.assign_depths();
    trace!(tokens = tree.len() - 1, open_at_end = cursor != TokenTree::ROOT; "Built token tree");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(spec: &[(TokenKind, &str)]) -> Vec<Token> {
        let mut offset = 0;
        spec.iter()
            .map(|(kind, data)| {
                let token = Token::new(*kind, *data, offset..offset + data.len());
                offset += data.len();
                token
            })
            .collect()
    }

    fn ids(tree: &TokenTree) -> Vec<TokenId> {
        tree.linear(TokenTree::ROOT).skip(1).collect()
    }

    #[test]
    fn test_open_close_are_siblings() {
        let tree = build_tree(tokens(&[
            (TokenKind::Open, "<a>"),
            (TokenKind::Inline, "<b/>"),
            (TokenKind::Close, "</a>"),
        ]));
        let [open, inline, close] = ids(&tree)[..] else {
            panic!("expected three tokens");
        };

        assert_eq!(tree.children(TokenTree::ROOT), &[open, close]);
        assert_eq!(tree.children(open), &[inline]);
        assert_eq!(tree.parent(inline), Some(open));
        assert_eq!(tree.parent(close), Some(TokenTree::ROOT));
        assert_eq!(
            (tree.depth(open), tree.depth(inline), tree.depth(close)),
            (0, 1, 0)
        );
    }

    #[test]
    fn test_nested_scopes() {
        let tree = build_tree(tokens(&[
            (TokenKind::Open, "<a>"),
            (TokenKind::Open, "<b>"),
            (TokenKind::Text, "x"),
            (TokenKind::Close, "</b>"),
            (TokenKind::Block, "<!-- c -->"),
            (TokenKind::Close, "</a>"),
            (TokenKind::Block, "<!-- d -->"),
        ]));
        let [a, b, x, b_end, c, a_end, d] = ids(&tree)[..] else {
            panic!("expected seven tokens");
        };

        assert_eq!(tree.children(a), &[b, b_end, c]);
        assert_eq!(tree.children(b), &[x]);
        assert_eq!(tree.children(TokenTree::ROOT), &[a, a_end, d]);
        assert_eq!(tree.depth(x), 2);
        assert_eq!(tree.depth(b_end), 1);
        assert_eq!(tree.depth(d), 0);
    }

    #[test]
    fn test_unmatched_close_attaches_to_root() {
        let tree = build_tree(tokens(&[
            (TokenKind::Close, "</x>"),
            (TokenKind::Block, "y;"),
        ]));
        let [close, block] = ids(&tree)[..] else {
            panic!("expected two tokens");
        };
        assert_eq!(tree.parent(close), Some(TokenTree::ROOT));
        assert_eq!(tree.parent(block), Some(TokenTree::ROOT));
        assert_eq!(tree.depth(block), 0);
    }

    #[test]
    fn test_surplus_close_after_balanced_scope() {
        let tree = build_tree(tokens(&[
            (TokenKind::Open, "{"),
            (TokenKind::Close, "}"),
            (TokenKind::Close, "}"),
            (TokenKind::Open, "{"),
        ]));
        let [_, _, extra, reopened] = ids(&tree)[..] else {
            panic!("expected four tokens");
        };
        assert_eq!(tree.parent(extra), Some(TokenTree::ROOT));
        assert_eq!(tree.parent(reopened), Some(TokenTree::ROOT));
    }

    #[test]
    fn test_dangling_open_keeps_scope() {
        let tree = build_tree(tokens(&[
            (TokenKind::Open, "<a>"),
            (TokenKind::Block, "one;"),
            (TokenKind::Block, "two;"),
        ]));
        let [open, one, two] = ids(&tree)[..] else {
            panic!("expected three tokens");
        };
        assert_eq!(tree.children(open), &[one, two]);
        assert_eq!(tree.depth(two), 1);
    }

    #[test]
    fn test_linear_chain_covers_source() {
        let spec = [
            (TokenKind::Open, "{"),
            (TokenKind::Whitespace, "\n  "),
            (TokenKind::Block, "a: b;"),
            (TokenKind::Whitespace, "\n"),
            (TokenKind::Close, "}"),
        ];
        let tree = build_tree(tokens(&spec));
        assert_eq!(tree.source(), "{\n  a: b;\n}");
        assert_eq!(tree.previous(ids(&tree)[0]), Some(TokenTree::ROOT));
        assert_eq!(tree.following(*ids(&tree).last().unwrap()), None);
    }

    #[test]
    fn test_empty_input() {
        let tree = build_tree(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.source(), "");
    }
}
