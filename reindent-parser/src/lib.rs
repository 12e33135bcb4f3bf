//! # reindent-parser
//!
//! Tokenize, rebuild the nesting tree, and reprint markup-like sources with canonical
//! indentation.
//!
//! File Layout
//!
//!     The pipeline is split the same way the data flows:
//!
//!     src/
//!       ├── token        Token kinds, the flat token, and the arena-backed tree
//!       ├── lexing       Lexicon compilation and tokenization
//!       ├── building     The cursor state machine that nests tokens
//!       ├── formatting   Default rendering, grammar overrides, serialization, treeviz
//!       ├── scanner      The configured pipeline object (lexicon + grammar + options)
//!       └── languages    Bundled lexicons (xml, css) and the language registry
//!
//!     source → lexing → Vec<Token> → building → TokenTree → formatting → String
//!
//!     The tree only assigns depths. Output is always produced by walking the linear
//!     token chain, so every byte of the input is visited exactly once.

pub mod building;
pub mod error;
pub mod formatting;
pub mod languages;
pub mod lexing;
pub mod scanner;
pub mod token;

pub use error::{LanguageError, ScannerError};
pub use formatting::{Grammar, RenderRule, Renderer, TokenView};
pub use languages::{scanner_from, Language, LanguageRegistry};
pub use lexing::{Lexicon, LexiconRule};
pub use scanner::{reindent, Scanner, ScannerBuilder, ScannerOptions};
pub use token::{Token, TokenId, TokenKind, TokenTree};
