//! Command-line interface for idress
//! Converts idress sheets between formats and validates them.
//!
//! Usage:
//!   idress convert `<path>` [--from `<format>`] [--to `<format>`]     - Convert a sheet
//!   idress validate `<path>` [--from `<format>`] [--report text|json] - Validate a sheet
//!   idress list-formats                                           - List available formats
//!
//! `<path>` may be `-` to read from stdin. Settings are read from the built-in defaults, then
//! `./idress.toml` if present, then the file given with `--config`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use idress::idress::config::{IdressConfig, Loader, ReportFormat};
use idress::{validate, FormatRegistry, ParseOptions};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

const LOCAL_CONFIG: &str = "idress.toml";

fn main() {
    let matches = Command::new("idress")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert and validate idress entity sheets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a sheet to another format")
                .arg(path_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Output format (default: output.format from the configuration)"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a sheet and print the findings")
                .arg(path_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("report")
                        .long("report")
                        .short('r')
                        .help("Report layout (default: output.report from the configuration)")
                        .value_parser(["text", "json"]),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let config = load_config(matches.get_one::<String>("config")).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });
    let registry = FormatRegistry::with_options(ParseOptions::from(&config.parse));

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            handle_convert_command(&registry, &config, convert_matches);
        }
        Some(("validate", validate_matches)) => {
            handle_validate_command(&registry, &config, validate_matches);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command(&registry);
        }
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the sheet, or '-' for stdin")
        .required(true)
        .index(1)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .short('f')
        .help("Input format (default: by file extension, else text)")
}

/// `IDRESS_LOG` or `RUST_LOG` win over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("IDRESS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&String>) -> Result<IdressConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = path {
        debug!(path = %path, "layering configuration file");
        loader = loader.with_file(path);
    }
    loader.build()
}

fn read_source(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Explicit `--from`, else the format claiming the file extension, else text.
fn input_format<'a>(registry: &'a FormatRegistry, path: &str, from: Option<&'a String>) -> &'a str {
    if let Some(from) = from {
        return from;
    }
    registry
        .for_path(Path::new(path))
        .map(|format| format.name())
        .unwrap_or("text")
}

fn load_record(registry: &FormatRegistry, matches: &ArgMatches) -> idress::Record {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let from = input_format(registry, path, matches.get_one::<String>("from"));
    info!(path = %path, format = from, "reading sheet");

    let source = read_source(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(registry: &FormatRegistry, config: &IdressConfig, matches: &ArgMatches) {
    let record = load_record(registry, matches);
    let to = matches
        .get_one::<String>("to")
        .unwrap_or(&config.output.format);

    let output = registry.serialize(&record, to).unwrap_or_else(|e| {
        eprintln!("Conversion error: {}", e);
        std::process::exit(1);
    });

    print_output(&output);
}

/// Handle the validate command
fn handle_validate_command(registry: &FormatRegistry, config: &IdressConfig, matches: &ArgMatches) {
    let record = load_record(registry, matches);
    let result = validate(&record);

    let report = match matches.get_one::<String>("report").map(String::as_str) {
        Some("json") => ReportFormat::Json,
        Some(_) => ReportFormat::Text,
        None => config.output.report,
    };
    match report {
        ReportFormat::Text => print_output(&result.to_string()),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
                eprintln!("Error formatting report: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
    }

    let failed =
        !result.is_valid || (config.validate.fail_on_warnings && result.has_warnings());
    if failed {
        std::process::exit(1);
    }
}

/// Prints with exactly one trailing newline.
fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut directions = Vec::new();
            if format.supports_parsing() {
                directions.push("read");
            }
            if format.supports_serialization() {
                directions.push("write");
            }
            println!("  {} [{}]", name, directions.join("/"));
            println!("    {}", format.description());
        }
    }
}
