//! # langstat
//!
//! A CLI tool that reports lines of code per programming language.
//!
//! ## Overview
//!
//! langstat is built on top of langstatlib. It walks a project directory,
//! classifies files by name and extension, and prints how many files and
//! lines each language has along with its share of the total.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze the current directory
//! langstat
//!
//! # Respect the project's .gitignore
//! langstat path/to/project --gitignore
//!
//! # Extra gitignore-style rules, applied after the ignore file
//! langstat . --gitignore --exclude "vendor/" --exclude "*.min.js"
//!
//! # Plain fixed-width table, or JSON
//! langstat . --output plain
//! langstat . --output json
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use langstatlib::{count_directory, CountOptions, DEFAULT_IGNORE_FILE};
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("langstat")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Analyzes a project's source code and reports language statistics")
        .arg(
            Arg::new("path")
                .help("Path to the project directory (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("gitignore")
                .long("gitignore")
                .action(ArgAction::SetTrue)
                .help("Respect the ignore file in the project directory"),
        )
        .arg(
            Arg::new("ignore-file")
                .long("ignore-file")
                .value_name("NAME")
                .default_value(DEFAULT_IGNORE_FILE)
                .help("Ignore file name, relative to the project directory"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Additional gitignore-style rule (can be specified multiple times)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "plain", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("follow-links")
                .long("follow-links")
                .action(ArgAction::SetTrue)
                .help("Descend into symlinked directories"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build count options from matches
fn build_options(matches: &ArgMatches) -> CountOptions {
    let mut options = CountOptions::new()
        .gitignore(matches.get_flag("gitignore"))
        .follow_links(matches.get_flag("follow-links"));

    if let Some(name) = matches.get_one::<String>("ignore-file") {
        options = options.ignore_file(name);
    }
    if let Some(rules) = matches.get_many::<String>("exclude") {
        for rule in rules {
            options = options.exclude(rule);
        }
    }
    options
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let format = matches
        .get_one::<String>("output")
        .map(|s| OutputFormat::from_name(s))
        .unwrap_or(OutputFormat::Table);

    let root = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
    if !root.is_dir() {
        bail!("Path '{}' is not a valid directory.", root.display());
    }

    let options = build_options(matches);
    let ignore_note = options
        .use_ignore_file
        .then_some(options.ignore_file_name.as_str());

    let mut output = render::render_header(&root, ignore_note, format);
    let result = count_directory(&root, &options)
        .with_context(|| format!("failed to analyze '{}'", root.display()))?;
    output.push_str(&render::render(&result, format)?);
    Ok(output)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
