//! Error types
//!
//! Documents never fail to tokenize or nest: unmatched text becomes a text token and
//! unbalanced open/close tokens are attached best-effort. The only failures are
//! configuration mistakes, caught when a scanner is built, and name lookups in the
//! language registry.

use crate::token::TokenKind;
use thiserror::Error;

/// Rejected scanner configuration.
#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("lexicon rule {index} has an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("lexicon patterns cannot be combined: {0}")]
    InvalidLexicon(#[source] Box<regex::Error>),

    #[error("lexicon rule {index} ({pattern:?}) is bound to the root kind, which is never matched from source")]
    RootRule { index: usize, pattern: String },

    #[error("a render rule cannot be registered for the root token")]
    RootRenderRule,

    #[error("unmatched text cannot use the {0} kind")]
    InvalidTextKind(TokenKind),
}

/// Failure to resolve a scanner by language name.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("language '{language}' has no lexicon variant '{variant}'")]
    UnknownLexiconVariant { language: String, variant: String },

    #[error("language '{language}' has no grammar variant '{variant}'")]
    UnknownGrammarVariant { language: String, variant: String },

    #[error(transparent)]
    Scanner(#[from] ScannerError),
}
