// Command-line interface for quire
//
// This binary converts documents between the JSON node tree and markdown, and
// applies paragraph edits to stored trees. All document logic lives in the
// quire-babel library; this crate only wires files, flags and configuration.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  quire <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  quire convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  quire export <tree.json> [--output <file>]    - JSON tree to markdown
//  quire import <notes.md> [--output <file>]     - Markdown to JSON tree
//  quire edit <input> --at <pos> --text <text>   - Insert or replace paragraphs
//  quire locate <offset> <length>...             - Map a flat offset onto segments
//  quire --list-formats                          - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  quire notes.json --to markdown --extra-list-indent 4

mod edit;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use quire_babel::common::locator::locate_signed;
use quire_babel::ir::nodes::Document;
use quire_babel::FormatRegistry;
use quire_config::{Loader, QuireConfig};
use std::collections::HashMap;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "export", "import", "edit", "locate", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich documents to markdown and apply paragraph edits")
        .long_about(
            "quire works with documents stored as a JSON node tree.\n\n\
            Commands:\n  \
            - convert: Transform between formats (json, markdown)\n  \
            - export / import: Shortcuts for json → markdown and markdown → json\n  \
            - edit: Insert or replace paragraphs at flat text positions\n  \
            - locate: Map a flat offset onto segment lengths\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire notes.json --to markdown                 # Convert to markdown (stdout)\n  \
            quire notes.md --to json --extra-pretty        # Import markdown as a pretty JSON tree\n  \
            quire edit notes.json --at 12 --text 'Hello'   # Insert a paragraph"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - json:     JSON node tree (.json)\n  \
                    - markdown: Markdown (.md, .markdown)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Markdown import is paragraph-only: headings and lists come back as text.\n\n\
                    Examples:\n  \
                    quire convert notes.json --to markdown\n  \
                    quire convert notes.md --to json -o notes.json\n  \
                    quire notes.json --to markdown                 # 'convert' is optional"
                )
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Export a JSON node tree to markdown")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import markdown as a JSON node tree")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(edit::command())
        .subcommand(
            Command::new("locate")
                .about("Map a flat character offset onto segment lengths")
                .long_about(
                    "Prints the segment index and the offset inside it.\n\n\
                    Offsets on a boundary resolve to the end of the earlier segment;\n\
                    offsets past the end clamp to the end of the last segment.\n\n\
                    Examples:\n  \
                    quire locate 4 3 4     # prints '1 1'\n  \
                    quire locate 99 2      # prints '0 2'"
                )
                .arg(
                    Arg::new("offset")
                        .help("Flat character offset")
                        .required(true)
                        .index(1)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("lengths")
                        .help("Segment lengths, in order")
                        .index(2)
                        .num_args(0..)
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path as the first argument means `convert`.
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("export", sub_matches)) => {
            let (input, output) = input_and_output(sub_matches);
            handle_convert_command(input, "json", "markdown", output, &extra_params, &config);
        }
        Some(("import", sub_matches)) => {
            let (input, output) = input_and_output(sub_matches);
            handle_convert_command(input, "markdown", "json", output, &extra_params, &config);
        }
        Some(("edit", sub_matches)) => {
            let registry = FormatRegistry::default();
            let (input, _) = input_and_output(sub_matches);
            let format = match sub_matches.get_one::<String>("format") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            let doc = read_document(&registry, input, &format);
            let request = edit::request_from_matches(sub_matches);
            let doc = edit::run(doc, &request, &config);
            let text = serialize_document(&registry, &doc, &format, &extra_params, &config);
            write_output(sub_matches.get_one::<String>("output").map(|s| s.as_str()), &text);
        }
        Some(("locate", sub_matches)) => {
            let offset = *sub_matches
                .get_one::<i64>("offset")
                .expect("offset is required");
            let lengths: Vec<usize> = sub_matches
                .get_many::<usize>("lengths")
                .map(|values| values.copied().collect())
                .unwrap_or_default();
            handle_locate_command(offset, &lengths);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the `tracing` subscriber. `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn input_and_output(matches: &ArgMatches) -> (&str, Option<&str>) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());
    (input, output)
}

fn detect_format(input: &str) -> String {
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Format options for `to`: configured defaults first, `--extra-*` values on top.
fn format_options(
    to: &str,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) -> HashMap<String, String> {
    let mut options = match to {
        "markdown" => config.export.rules.to_options(),
        "json" => HashMap::from([(
            "pretty".to_string(),
            config.convert.json.pretty.to_string(),
        )]),
        _ => HashMap::new(),
    };
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn serialize_document(
    registry: &FormatRegistry,
    doc: &Document,
    to: &str,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) -> String {
    let options = format_options(to, extra_params, config);
    debug!(format = to, ?options, "serializing");
    registry
        .serialize_with_options(doc, to, &options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => println!("{text}"),
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = read_document(&registry, input, from);
    let text = serialize_document(&registry, &doc, to, extra_params, config);
    write_output(output, &text);
}

/// Handle the locate command
fn handle_locate_command(offset: i64, lengths: &[usize]) {
    match locate_signed(lengths, offset) {
        Some(found) => println!("{} {}", found.segment_index, found.local_offset),
        None => {
            eprintln!("Offset {offset} cannot be located in {} segment(s)", lengths.len());
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            println!(
                "  {format_name:<10} {} [{}]",
                format.description(),
                format.file_extensions().join(", ")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> QuireConfig {
    let loader = Loader::new().with_optional_file("quire.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
