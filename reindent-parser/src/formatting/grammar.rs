//! Grammar: context-sensitive render overrides
//!
//!     A grammar maps a token kind to a render rule. When the renderer meets a token
//!     whose kind has a rule, the rule runs first and receives a [`TokenView`] of the
//!     token. Returning `Some` replaces the default rendering; returning `None` keeps
//!     it. Rules typically look at [`TokenView::preceding`], the nearest
//!     non-whitespace token before this one, to decide whether the token should stay
//!     on the current line.

use crate::error::ScannerError;
use crate::formatting::render::default_render;
use crate::token::{TokenId, TokenKind, TokenTree};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A render override. `None` falls back to the default rendering.
pub type RenderRule = Arc<dyn Fn(&TokenView<'_>) -> Option<String> + Send + Sync>;

/// Read-only view of one token inside its tree, handed to render rules.
#[derive(Clone, Copy)]
pub struct TokenView<'a> {
    tree: &'a TokenTree,
    id: TokenId,
    unit: Option<&'a str>,
}

impl<'a> TokenView<'a> {
    /// `unit` overrides the token's own indentation unit when given.
    pub fn new(tree: &'a TokenTree, id: TokenId, unit: Option<&'a str>) -> Self {
        TokenView { tree, id, unit }
    }

    fn at(&self, id: TokenId) -> TokenView<'a> {
        TokenView { id, ..*self }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn tree(&self) -> &'a TokenTree {
        self.tree
    }

    pub fn kind(&self) -> TokenKind {
        self.tree.kind(self.id)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn data(&self) -> &'a str {
        self.tree.data(self.id)
    }

    pub fn depth(&self) -> isize {
        self.tree.depth(self.id)
    }

    pub fn indentation(&self) -> String {
        self.tree.indentation(self.id, self.unit)
    }

    /// Nearest non-whitespace token before this one (the root for the first token).
    pub fn preceding(&self) -> Option<TokenView<'a>> {
        self.tree.preceding(self.id).map(|id| self.at(id))
    }

    /// Kind of [`preceding`](Self::preceding), the usual thing a rule checks.
    pub fn preceding_kind(&self) -> Option<TokenKind> {
        self.tree.preceding(self.id).map(|id| self.tree.kind(id))
    }

    pub fn following(&self) -> Option<TokenView<'a>> {
        self.tree.following(self.id).map(|id| self.at(id))
    }

    pub fn parent(&self) -> Option<TokenView<'a>> {
        self.tree.parent(self.id).map(|id| self.at(id))
    }

    /// What this token renders as without any override.
    pub fn default_render(&self) -> String {
        default_render(self.tree, self.id, self.unit)
    }
}

impl fmt::Debug for TokenView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenView")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("data", &self.data())
            .finish()
    }
}

/// Per-kind render overrides.
#[derive(Clone, Default)]
pub struct Grammar {
    rules: HashMap<TokenKind, RenderRule>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            rules: HashMap::new(),
        }
    }

    /// Add a rule, builder style. A later rule for the same kind replaces the earlier.
    pub fn rule<F>(mut self, kind: TokenKind, rule: F) -> Self
    where
        F: Fn(&TokenView<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.insert(kind, Arc::new(rule));
        self
    }

    pub fn insert(&mut self, kind: TokenKind, rule: RenderRule) {
        self.rules.insert(kind, rule);
    }

    pub fn get(&self, kind: TokenKind) -> Option<&RenderRule> {
        self.rules.get(&kind)
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.rules.contains_key(&kind)
    }

    /// Kinds that have a rule, sorted.
    pub fn kinds(&self) -> Vec<TokenKind> {
        let mut kinds: Vec<_> = self.rules.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The root never renders, so a rule for it is a configuration mistake.
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.contains(TokenKind::Root) {
            return Err(ScannerError::RootRenderRule);
        }
        Ok(())
    }

    /// Run the override for the token's kind, if any.
    pub fn apply(&self, view: &TokenView<'_>) -> Option<String> {
        self.get(view.kind()).and_then(|rule| rule(view))
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("kinds", &self.kinds())
            .finish()
    }
}
