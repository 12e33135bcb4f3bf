//! Languages and the language registry
//!
//!     A [`Language`] bundles a default lexicon, an optional default grammar and any
//!     number of named lexicon or grammar variants. The [`LanguageRegistry`] resolves
//!     `(language, lexicon variant, grammar variant)` to a ready [`Scanner`].
//!
//!     Built-in languages:
//!
//!     xml   lexicon + grammar; lexicon variant `html` (void elements are inline)
//!     css   lexicon only
//!
//!     Language and variant names are case-insensitive.

pub mod css;
pub mod xml;

use crate::error::LanguageError;
use crate::formatting::Grammar;
use crate::lexing::Lexicon;
use crate::scanner::{Scanner, ScannerOptions};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Lexicons and grammars registered under one name.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    lexicon: Lexicon,
    grammar: Option<Grammar>,
    lexicon_variants: BTreeMap<String, Lexicon>,
    grammar_variants: BTreeMap<String, Grammar>,
}

impl Language {
    pub fn new(name: &str, lexicon: Lexicon) -> Self {
        Language {
            name: name.to_lowercase(),
            lexicon,
            grammar: None,
            lexicon_variants: BTreeMap::new(),
            grammar_variants: BTreeMap::new(),
        }
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    pub fn with_lexicon_variant(mut self, variant: &str, lexicon: Lexicon) -> Self {
        self.lexicon_variants.insert(variant.to_lowercase(), lexicon);
        self
    }

    pub fn with_grammar_variant(mut self, variant: &str, grammar: Grammar) -> Self {
        self.grammar_variants.insert(variant.to_lowercase(), grammar);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default lexicon, or the named variant.
    pub fn lexicon(&self, variant: Option<&str>) -> Result<&Lexicon, LanguageError> {
        match variant {
            None => Ok(&self.lexicon),
            Some(variant) => self
                .lexicon_variants
                .get(&variant.to_lowercase())
                .ok_or_else(|| LanguageError::UnknownLexiconVariant {
                    language: self.name.clone(),
                    variant: variant.to_string(),
                }),
        }
    }

    /// The default grammar (empty if the language has none), or the named variant.
    pub fn grammar(&self, variant: Option<&str>) -> Result<Grammar, LanguageError> {
        match variant {
            None => Ok(self.grammar.clone().unwrap_or_default()),
            Some(variant) => self
                .grammar_variants
                .get(&variant.to_lowercase())
                .cloned()
                .ok_or_else(|| LanguageError::UnknownGrammarVariant {
                    language: self.name.clone(),
                    variant: variant.to_string(),
                }),
        }
    }

    pub fn lexicon_variants(&self) -> Vec<&str> {
        self.lexicon_variants.keys().map(String::as_str).collect()
    }

    pub fn grammar_variants(&self) -> Vec<&str> {
        self.grammar_variants.keys().map(String::as_str).collect()
    }

    pub fn has_grammar(&self) -> bool {
        self.grammar.is_some()
    }
}

/// Languages by name.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: BTreeMap<String, Language>,
}

impl LanguageRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        LanguageRegistry {
            languages: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in languages.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            Language::new("xml", xml::lexicon())
                .with_grammar(xml::grammar())
                .with_lexicon_variant("html", xml::html_lexicon()),
        );
        registry.register(Language::new("css", css::lexicon()));
        registry
    }

    /// Register a language, replacing any language of the same name.
    pub fn register(&mut self, language: Language) {
        self.languages.insert(language.name.clone(), language);
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.languages.get(&name.to_lowercase())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered language names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    /// Build a scanner for `language`, optionally picking lexicon/grammar variants.
    pub fn scanner(
        &self,
        language: &str,
        lexicon_variant: Option<&str>,
        grammar_variant: Option<&str>,
        options: ScannerOptions,
    ) -> Result<Scanner, LanguageError> {
        let found = self
            .get(language)
            .ok_or_else(|| LanguageError::UnknownLanguage(language.to_string()))?;
        let lexicon = found.lexicon(lexicon_variant)?.clone();
        let grammar = found.grammar(grammar_variant)?;
        debug!(
            language = found.name(),
            lexicon_variant:? = lexicon_variant,
            grammar_variant:? = grammar_variant;
            "Resolved language"
        );
        Ok(Scanner::builder(lexicon)
            .grammar(grammar)
            .options(options)
            .build()?)
    }
}

static BUILTINS: Lazy<LanguageRegistry> = Lazy::new(LanguageRegistry::with_builtins);

/// Scanner for a built-in language, with default options.
pub fn scanner_from(
    language: &str,
    lexicon_variant: Option<&str>,
    grammar_variant: Option<&str>,
) -> Result<Scanner, LanguageError> {
    BUILTINS.scanner(
        language,
        lexicon_variant,
        grammar_variant,
        ScannerOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_builtins() {
        let registry = LanguageRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["css", "xml"]);
        assert!(registry.has("XML"));
        let xml = registry.get("xml").unwrap();
        assert!(xml.has_grammar());
        assert_eq!(xml.lexicon_variants(), vec!["html"]);
        assert!(xml.grammar_variants().is_empty());
        assert!(!registry.get("css").unwrap().has_grammar());
    }

    #[test]
    fn test_scanner_from_builtin() {
        let scanner = scanner_from("XML", None, None).unwrap();
        assert!(scanner.grammar().contains(TokenKind::Text));
        assert_eq!(scanner.indent("<a><b/></a>", "  "), "\n<a>\n  <b/>\n</a>");

        let scanner = scanner_from("xml", Some("HTML"), None).unwrap();
        assert_eq!(scanner.lexicon(), &xml::html_lexicon());
    }

    #[test]
    fn test_lookup_errors() {
        assert!(matches!(
            scanner_from("cobol", None, None),
            Err(LanguageError::UnknownLanguage(name)) if name == "cobol"
        ));
        assert!(matches!(
            scanner_from("css", Some("less"), None),
            Err(LanguageError::UnknownLexiconVariant { .. })
        ));
        assert!(matches!(
            scanner_from("xml", None, Some("pretty")),
            Err(LanguageError::UnknownGrammarVariant { .. })
        ));
    }

    #[test]
    fn test_registered_language_and_variants() {
        let mut registry = LanguageRegistry::new();
        registry.register(
            Language::new("Braces", Lexicon::new().rule(r"\{", TokenKind::Open))
                .with_grammar_variant(
                    "loud",
                    Grammar::new().rule(TokenKind::Open, |_| Some("!".to_string())),
                ),
        );
        let options = ScannerOptions::default();
        let plain = registry.scanner("braces", None, None, options.clone()).unwrap();
        assert_eq!(plain.indent("{", ""), "\n{");
        let loud = registry
            .scanner("braces", None, Some("LOUD"), options)
            .unwrap();
        assert_eq!(loud.indent("{", ""), "!");
    }

    #[test]
    fn test_invalid_registered_lexicon_surfaces_scanner_error() {
        let mut registry = LanguageRegistry::new();
        registry.register(Language::new("bad", Lexicon::new().rule("(", TokenKind::Open)));
        assert!(matches!(
            registry.scanner("bad", None, None, ScannerOptions::default()),
            Err(LanguageError::Scanner(_))
        ));
    }
}
