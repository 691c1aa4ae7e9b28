//! # typescan
//!
//! List the program types a code generator should process.
//!
//! ## Overview
//!
//! typescan is built on top of typescanlib and provides a command-line
//! interface for type discovery against JSON symbol registries. Explicit
//! names, glob patterns, an entry-point type and automatic entry-point
//! discovery can be combined; the result is printed in discovery order.
//!
//! ## Usage
//!
//! ```bash
//! # Every type directly under com.example
//! typescan --registry types.json --pattern 'com.example.*'
//!
//! # Explicit names plus everything below a package, as JSON
//! typescan -r types.json -c com.example.User -p 'com.example.dto.**' --output json
//!
//! # Merge several registries and discover through entry points
//! typescan -r 'registries/*.json' --auto-entry-point --exclude-pattern '**Internal'
//!
//! # Read the request from a settings file, adding to it on the command line
//! typescan -r types.json --settings typescan.json -c com.example.Extra
//! ```

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use typescanlib::{discover, DiscoveryContext, DiscoverySettings, Input, Registry};

/// JSON output shape
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    count: usize,
    #[serde(flatten)]
    input: &'a Input,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("typescan")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Discover the program types a code generator should process")
        .arg(
            Arg::new("registry")
                .short('r')
                .long("registry")
                .action(ArgAction::Append)
                .required(true)
                .help("Registry file or glob of files describing known types"),
        )
        .arg(
            Arg::new("class")
                .short('c')
                .long("class")
                .action(ArgAction::Append)
                .help("Fully-qualified type name (can be specified multiple times)"),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .action(ArgAction::Append)
                .help("Type name glob; '*' stays within a segment, '**' crosses them"),
        )
        .arg(
            Arg::new("entry-point")
                .long("entry-point")
                .help("Entry-point type to include"),
        )
        .arg(
            Arg::new("auto-entry-point")
                .long("auto-entry-point")
                .action(ArgAction::SetTrue)
                .help("Discover types through entry points found in the registry"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Type name to skip during entry-point discovery"),
        )
        .arg(
            Arg::new("exclude-pattern")
                .long("exclude-pattern")
                .action(ArgAction::Append)
                .help("Type name glob to skip during entry-point discovery"),
        )
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .help("JSON settings file; command-line options add to it"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help("Show debug diagnostics"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only show warnings and errors"),
        )
}

/// Extract a repeated string argument
fn extract_many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

/// Append CLI values to an optional settings list
fn merge_list(current: &mut Option<Vec<String>>, extra: Vec<String>) {
    if extra.is_empty() {
        return;
    }
    current.get_or_insert_with(Vec::new).extend(extra);
}

/// Build discovery settings from the settings file and matches
fn build_settings(matches: &ArgMatches) -> Result<DiscoverySettings, anyhow::Error> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(path) => DiscoverySettings::from_path(path)?,
        None => DiscoverySettings::new(),
    };

    merge_list(&mut settings.classes, extract_many(matches, "class"));
    merge_list(&mut settings.class_patterns, extract_many(matches, "pattern"));
    if let Some(entry_point) = matches.get_one::<String>("entry-point") {
        settings.entry_point = Some(entry_point.clone());
    }
    settings.automatic_entry_point |= matches.get_flag("auto-entry-point");
    settings
        .exclude_classes
        .extend(extract_many(matches, "exclude"));
    settings
        .exclude_class_patterns
        .extend(extract_many(matches, "exclude-pattern"));

    Ok(settings)
}

/// Load and merge every registry argument
fn load_registry(matches: &ArgMatches) -> Result<Registry, anyhow::Error> {
    let mut registry = Registry::new();
    for pattern in extract_many(matches, "registry") {
        registry.load_glob(&pattern)?;
    }
    Ok(registry)
}

/// Render discovered types as aligned `kind name` lines
fn render_text(input: &Input) -> String {
    let kind_style = Style::new().dim();
    let count_style = Style::new().bold();

    let mut out = String::new();
    for source_type in input.source_types() {
        let kind = format!("{:<10}", source_type.ty.kind.as_str());
        out.push_str(&format!("{} {}", kind_style.apply_to(kind), source_type.name()));
        if let Some(parent) = &source_type.used_in_type {
            out.push_str(&format!(" (via {parent})"));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{}\n",
        count_style.apply_to(format!("Total ({} types)", input.len()))
    ));
    out
}

fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let registry = load_registry(matches)?;
    let request = build_settings(matches)?.to_request();

    let input = discover(&request, &DiscoveryContext::from_provider(&registry))?;

    let output = match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => {
            let json = JsonOutput {
                count: input.len(),
                input: &input,
            };
            format!("{}\n", serde_json::to_string_pretty(&json)?)
        }
        _ => render_text(&input),
    };
    Ok(output)
}

/// Send diagnostics to stderr; RUST_LOG takes precedence over flags
fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        "warn"
    } else if matches.get_count("verbose") > 0 {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
