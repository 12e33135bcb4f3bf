//! Command-line interface for reindent
//! Re-indents markup-like sources (XML, CSS, or languages declared in a config file).
//!
//! Usage:
//!   reindent `[<path>|-]` [--language `<name>`] [--indent `<unit>`] [--format `<format>`]
//!   reindent --list-languages                     - List languages and their variants

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, LevelFilter};
use reindent_cli::{list_languages, run, Options, OutputFormat, AVAILABLE_FORMATS};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

fn command() -> Command {
    Command::new("reindent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Re-indent markup-like sources by their nesting structure")
        .arg(
            Arg::new("path")
                .help("Path to the source file ('-' or nothing reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Language to reindent as (default: xml)"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .short('i')
                .help("String appended once per nesting level (default: two spaces)"),
        )
        .arg(
            Arg::new("lexicon-variant")
                .long("lexicon-variant")
                .help("Named lexicon variant of the language (e.g., 'html' for xml)"),
        )
        .arg(
            Arg::new("grammar-variant")
                .long("grammar-variant")
                .help("Named grammar variant of the language"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(AVAILABLE_FORMATS.to_vec())
                .default_value("text"),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .help("List available languages and their variants")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level (off, error, warn, info, debug, trace)")
                .default_value("warn"),
        )
}

fn options(matches: &ArgMatches) -> Options {
    let string = |id: &str| matches.get_one::<String>(id).cloned();
    Options {
        path: string("path"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        language: string("language"),
        indent: string("indent"),
        lexicon_variant: string("lexicon-variant"),
        grammar_variant: string("grammar-variant"),
        format: matches
            .get_one::<String>("format")
            .and_then(|format| OutputFormat::from_str(format).ok())
            .unwrap_or_default(),
    }
}

fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

fn main() {
    let matches = command().get_matches();
    init_logging(
        matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or("warn"),
    );

    let options = options(&matches);
    debug!(options:?; "Parsed arguments");

    let result = if matches.get_flag("list-languages") {
        list_languages(&options)
    } else {
        run(&options)
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
