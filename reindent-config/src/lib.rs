//! Shared configuration loader for the reindent toolchain.
//!
//! `defaults/reindent.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ReindentConfig`].
//!
//! Besides the formatting and scanner knobs, a configuration can declare whole
//! languages: an ordered list of `{ pattern, kind }` rules, optionally borrowing the
//! grammar of a built-in language. [`ReindentConfig::registry`] merges them with the
//! built-ins.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use log::debug;
use reindent_parser::{
    Language, LanguageError, LanguageRegistry, Lexicon, Scanner, ScannerOptions,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/reindent.default.toml");

/// Top-level configuration consumed by reindent applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ReindentConfig {
    pub formatting: FormattingConfig,
    pub scanner: ScannerOptions,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

/// What to reindent with, and how far to indent.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub indent_string: String,
    pub language: String,
    #[serde(default)]
    pub lexicon_variant: Option<String>,
    #[serde(default)]
    pub grammar_variant: Option<String>,
}

/// A language declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub rules: Lexicon,
    /// Name of a built-in language whose default grammar this language reuses.
    #[serde(default)]
    pub grammar: Option<String>,
}

impl ReindentConfig {
    /// Built-in languages plus the ones declared under `languages`.
    ///
    /// A declared language replaces a built-in of the same name.
    pub fn registry(&self) -> Result<LanguageRegistry, LanguageError> {
        let builtins = LanguageRegistry::with_builtins();
        let mut registry = builtins.clone();
        for (name, declared) in &self.languages {
            let mut language = Language::new(name, declared.rules.clone());
            if let Some(source) = &declared.grammar {
                let grammar = builtins
                    .get(source)
                    .ok_or_else(|| LanguageError::UnknownLanguage(source.clone()))?
                    .grammar(None)?;
                language = language.with_grammar(grammar);
            }
            debug!(
                language = name.as_str(),
                rules = declared.rules.len();
                "Registered configured language"
            );
            registry.register(language);
        }
        Ok(registry)
    }

    /// Scanner for `formatting.language` and its variants, with the `scanner` options.
    pub fn scanner(&self) -> Result<Scanner, LanguageError> {
        self.registry()?.scanner(
            &self.formatting.language,
            self.formatting.lexicon_variant.as_deref(),
            self.formatting.grammar_variant.as_deref(),
            self.scanner.clone(),
        )
    }
}

/// Stacks configuration sources, lowest precedence first, on top of the embedded
/// `reindent.default.toml`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file; `build` fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that may be absent, such as `./reindent.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `formatting.language`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge all sources into a [`ReindentConfig`].
    pub fn build(self) -> Result<ReindentConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<ReindentConfig, ConfigError> {
    Loader::new().build()
}
