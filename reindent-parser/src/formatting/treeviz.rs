//! Treeviz formatter for token trees
//!
//! One line per token, nesting drawn with box characters, so the result of tree
//! building can be scanned quickly. Labels are the token kind, its depth and its data
//! with control characters escaped, truncated to 30 characters.
//!
//! Example, for `<a><b/></a>`:
//!
//! ```text
//! ├─ open@0: <a>
//! │ └─ inline@1: <b/>
//! └─ close@0: </a>
//! ```
//!
//! The root itself is not printed.

use crate::token::{TokenId, TokenTree};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(tree: &TokenTree) -> String {
    let mut result = String::new();
    append_children(&mut result, tree, TokenTree::ROOT, "");
    result
}

fn append_children(result: &mut String, tree: &TokenTree, id: TokenId, prefix: &str) {
    let children = tree.children(id);
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_token(result, tree, *child, prefix, is_last);
    }
}

fn append_token(result: &mut String, tree: &TokenTree, id: TokenId, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&tree.data(id).escape_debug().to_string(), 30);

    result.push_str(&format!(
        "{}{} {}@{}: {}\n",
        prefix,
        connector,
        tree.kind(id),
        tree.depth(id),
        label
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, tree, id, &new_prefix);
}
