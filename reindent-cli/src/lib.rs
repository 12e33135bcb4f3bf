//! CLI logic for the reindent formatter.
//!
//! The binary only parses arguments and sets up logging; everything else lives here so
//! it can be driven from tests. Configuration is layered as follows, later layers
//! winning:
//!
//! ```text
//! embedded defaults
//! ./reindent.toml, or the file given with --config
//! --language / --indent / --lexicon-variant / --grammar-variant
//! ```

use log::{debug, info};
use reindent_config::{ConfigError, Loader, ReindentConfig};
use reindent_parser::formatting::to_treeviz_str;
use reindent_parser::{LanguageError, TokenTree};
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

/// Config file picked up from the working directory when no --config is given.
pub const LOCAL_CONFIG: &str = "reindent.toml";

/// Output formats accepted by `--format`.
pub const AVAILABLE_FORMATS: &[&str] = &["text", "tokens", "tree"];

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Language(#[from] LanguageError),

    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown output format '{0}' (available: text, tokens, tree)")]
    UnknownFormat(String),
}

/// What to print for the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The reindented source.
    #[default]
    Text,
    /// The token stream as JSON.
    Tokens,
    /// The nesting tree, one token per line.
    Tree,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "tokens" => Ok(OutputFormat::Tokens),
            "tree" => Ok(OutputFormat::Tree),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Input file; `None` or `-` reads standard input.
    pub path: Option<String>,
    pub config: Option<PathBuf>,
    pub language: Option<String>,
    pub indent: Option<String>,
    pub lexicon_variant: Option<String>,
    pub grammar_variant: Option<String>,
    pub format: OutputFormat,
}

/// Layer the configuration files and flag overrides.
pub fn load_config(options: &Options) -> Result<ReindentConfig, CliError> {
    let mut loader = match &options.config {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    let overrides = [
        ("formatting.language", &options.language),
        ("formatting.indent_string", &options.indent),
        ("formatting.lexicon_variant", &options.lexicon_variant),
        ("formatting.grammar_variant", &options.grammar_variant),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    Ok(loader.build()?)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(source)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
    }
}

/// Render `source` in the requested format.
pub fn format_source(
    config: &ReindentConfig,
    source: &str,
    format: OutputFormat,
) -> Result<String, CliError> {
    let scanner = config.scanner()?;
    let tokens = scanner.parse(source);
    debug!(tokens = tokens.len(), format:?; "Tokenized input");

    match format {
        OutputFormat::Tokens => Ok(serde_json::to_string_pretty(&tokens)?),
        OutputFormat::Tree => Ok(to_treeviz_str(&scanner.construct_tree(tokens))),
        OutputFormat::Text => {
            let tree = scanner.construct_tree(tokens);
            let unit = config.formatting.indent_string.as_str();
            Ok(scanner.serialize_linear(&tree, TokenTree::ROOT, Some(unit)))
        }
    }
}

/// Read the input named by `options` and render it.
pub fn run(options: &Options) -> Result<String, CliError> {
    let config = load_config(options)?;
    info!(
        language = config.formatting.language.as_str(),
        path = options.path.as_deref().unwrap_or("-");
        "Reindenting"
    );
    let source = read_input(options.path.as_deref())?;
    format_source(&config, &source, options.format)
}

/// One line per language with its variants.
pub fn list_languages(options: &Options) -> Result<String, CliError> {
    let registry = load_config(options)?.registry()?;
    let mut listing = String::from("Available languages:\n\n");
    for language in registry.languages() {
        listing.push_str(&format!("  {}", language.name()));
        let lexicons = language.lexicon_variants();
        if !lexicons.is_empty() {
            listing.push_str(&format!("  lexicon variants: {}", lexicons.join(", ")));
        }
        let grammars = language.grammar_variants();
        if !grammars.is_empty() {
            listing.push_str(&format!("  grammar variants: {}", grammars.join(", ")));
        }
        listing.push('\n');
    }
    Ok(listing)
}
