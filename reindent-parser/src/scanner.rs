//! Scanner: the configured reindent pipeline
//!
//!     A [`Scanner`] owns a compiled lexicon, a grammar of render overrides and the
//!     matching options. Everything that can be wrong with that configuration is
//!     rejected when the scanner is built; once built, every stage is total:
//!
//!     parse            source → Vec<Token>
//!     construct_tree   Vec<Token> → TokenTree (depths assigned)
//!     serialize_linear TokenTree → String, in source order
//!     indent           all three in a row
//!
//!     A scanner is immutable and can be shared between threads. Each call works on
//!     its own freshly built tree.

use crate::building::build_tree;
use crate::error::ScannerError;
use crate::formatting::{Grammar, Renderer, TokenView};
use crate::lexing::{CompiledLexicon, Lexicon};
use crate::token::{Token, TokenId, TokenKind, TokenTree};
use log::debug;
use serde::{Deserialize, Serialize};

/// Regex flags and the fallback kind for unmatched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerOptions {
    pub case_insensitive: bool,
    /// `.` also matches `\n`.
    pub dot_matches_new_line: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// Kind given to spans no lexicon rule matches.
    pub text_kind: TokenKind,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        ScannerOptions {
            case_insensitive: false,
            dot_matches_new_line: false,
            multi_line: false,
            text_kind: TokenKind::Text,
        }
    }
}

/// Tokenizes and re-indents sources according to a lexicon and grammar.
#[derive(Debug, Clone)]
pub struct Scanner {
    lexicon: Lexicon,
    compiled: CompiledLexicon,
    grammar: Grammar,
    options: ScannerOptions,
}

impl Scanner {
    /// Scanner without render overrides and with default options.
    pub fn new(lexicon: Lexicon) -> Result<Self, ScannerError> {
        Self::builder(lexicon).build()
    }

    pub fn with_grammar(lexicon: Lexicon, grammar: Grammar) -> Result<Self, ScannerError> {
        Self::builder(lexicon).grammar(grammar).build()
    }

    pub fn builder(lexicon: Lexicon) -> ScannerBuilder {
        ScannerBuilder::new(lexicon)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Split `source` into tokens.
    pub fn parse(&self, source: &str) -> Vec<Token> {
        self.compiled.tokenize(source)
    }

    /// Nest `tokens` and assign depths.
    pub fn construct_tree(&self, tokens: Vec<Token>) -> TokenTree {
        build_tree(tokens)
    }

    pub fn renderer<'a>(&'a self, tree: &'a TokenTree) -> Renderer<'a> {
        Renderer::new(tree, &self.grammar)
    }

    /// Render a single token through this scanner's grammar.
    pub fn render(&self, tree: &TokenTree, id: TokenId, unit: Option<&str>) -> String {
        self.renderer(tree).render(id, unit)
    }

    /// Render `start` and everything after it in source order.
    pub fn serialize_linear(&self, tree: &TokenTree, start: TokenId, unit: Option<&str>) -> String {
        self.renderer(tree).serialize_linear(start, unit)
    }

    /// Render only the subtree under `start`, in tree order.
    pub fn serialize(&self, tree: &TokenTree, start: TokenId, unit: Option<&str>) -> String {
        self.renderer(tree).serialize_subtree(start, unit)
    }

    /// Re-indent `source` with `unit` repeated once per nesting level.
    pub fn indent(&self, source: &str, unit: &str) -> String {
        let tree = self.construct_tree(self.parse(source));
        self.serialize_linear(&tree, TokenTree::ROOT, Some(unit))
    }

    /// Build a view on a token, as render rules see it.
    pub fn view<'a>(&self, tree: &'a TokenTree, id: TokenId, unit: Option<&'a str>) -> TokenView<'a> {
        TokenView::new(tree, id, unit)
    }
}

/// Step-by-step scanner configuration.
#[derive(Debug, Clone)]
pub struct ScannerBuilder {
    lexicon: Lexicon,
    grammar: Grammar,
    options: ScannerOptions,
}

impl ScannerBuilder {
    pub fn new(lexicon: Lexicon) -> Self {
        ScannerBuilder {
            lexicon,
            grammar: Grammar::new(),
            options: ScannerOptions::default(),
        }
    }

    pub fn grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Add a single render override.
    pub fn rule<F>(mut self, kind: TokenKind, rule: F) -> Self
    where
        F: Fn(&TokenView<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.grammar = self.grammar.rule(kind, rule);
        self
    }

    pub fn options(mut self, options: ScannerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.options.case_insensitive = yes;
        self
    }

    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.options.dot_matches_new_line = yes;
        self
    }

    pub fn multi_line(mut self, yes: bool) -> Self {
        self.options.multi_line = yes;
        self
    }

    pub fn text_kind(mut self, kind: TokenKind) -> Self {
        self.options.text_kind = kind;
        self
    }

    /// Compile the lexicon and validate the grammar.
    pub fn build(self) -> Result<Scanner, ScannerError> {
        let compiled = CompiledLexicon::compile(&self.lexicon, &self.options)?;
        self.grammar.validate()?;
        debug!(
            rules = self.lexicon.len(),
            overrides = self.grammar.kinds().len();
            "Built scanner"
        );
        Ok(Scanner {
            lexicon: self.lexicon,
            compiled,
            grammar: self.grammar,
            options: self.options,
        })
    }
}

/// Tokenize, nest and re-indent `source` in one call.
///
/// Fails only when `lexicon` or `grammar` is invalid; any source string is accepted.
pub fn reindent(
    source: &str,
    lexicon: &Lexicon,
    grammar: &Grammar,
    indent_unit: &str,
) -> Result<String, ScannerError> {
    let scanner = Scanner::with_grammar(lexicon.clone(), grammar.clone())?;
    Ok(scanner.indent(source, indent_unit))
}
