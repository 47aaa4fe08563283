//! The `edit` subcommand: apply one paragraph edit to a stored document.

use clap::{Arg, ArgGroup, ArgMatches, Command, ValueHint};
use quire_babel::edit::{find_text, ApplyMode, ApplyRequest, Selection};
use quire_babel::ir::nodes::Document;
use quire_config::QuireConfig;
use tracing::warn;

const MODES: &[&str] = &["insert", "insert-below", "replace"];

/// Where the edit lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Flat positions `from..to`.
    Range { from: usize, to: usize },
    /// The first occurrence of a piece of text.
    Needle(String),
}

/// A parsed `edit` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub mode: ApplyMode,
    pub target: Target,
    pub text: String,
}

pub fn command() -> Command {
    Command::new("edit")
        .about("Insert or replace paragraphs in a document")
        .long_about(
            "Applies one edit and writes the resulting document in its input format.\n\n\
            Modes:\n  \
            - insert:        Insert paragraphs at the end of the target (default)\n  \
            - insert-below:  Same, preceded by an empty paragraph\n  \
            - replace:       Replace the target range\n\n\
            Text is split into paragraphs on blank lines; single newlines become\n\
            hard breaks. The inserted range is reported on stderr.\n\n\
            Examples:\n  \
            quire edit notes.json --at 11 --text 'New paragraph'\n  \
            quire edit notes.json --find 'world' --mode replace --text 'planet'\n  \
            quire edit notes.md --at 0 --until 5 --mode replace --text 'Howdy'"
        )
        .arg(
            Arg::new("input")
                .help("Input file path")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .help("Plain text to insert")
                .required(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("How the text is applied")
                .default_value("insert")
                .value_parser(clap::builder::PossibleValuesParser::new(MODES)),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .value_name("POS")
                .help("Flat position where the target starts")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("until")
                .long("until")
                .value_name("POS")
                .help("Flat position where the target ends (defaults to --at)")
                .requires("at")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("find")
                .long("find")
                .value_name("TEXT")
                .help("Target the first occurrence of TEXT instead of a position"),
        )
        .group(
            ArgGroup::new("target")
                .args(["at", "find"])
                .required(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Document format (auto-detected from file extension if not specified)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (defaults to stdout)")
                .value_hint(ValueHint::FilePath),
        )
}

pub fn request_from_matches(matches: &ArgMatches) -> EditRequest {
    let mode = match matches.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("replace") => ApplyMode::Replace,
        Some("insert-below") => ApplyMode::Insert {
            leading_blank_line: true,
        },
        _ => ApplyMode::Insert {
            leading_blank_line: false,
        },
    };

    let target = match matches.get_one::<String>("find") {
        Some(needle) => Target::Needle(needle.clone()),
        None => {
            let from = matches.get_one::<usize>("at").copied().unwrap_or_default();
            let to = matches.get_one::<usize>("until").copied().unwrap_or(from);
            Target::Range { from, to }
        }
    };

    let text = matches
        .get_one::<String>("text")
        .cloned()
        .unwrap_or_default();

    EditRequest { mode, target, text }
}

/// Apply `request` to `doc` in a fresh editing session and return the result.
pub fn run(doc: Document, request: &EditRequest, config: &QuireConfig) -> Document {
    let selection = match &request.target {
        Target::Range { from, to } => Selection::new(*from, *to),
        Target::Needle(needle) => match find_text(&doc, needle) {
            Some(found) => Selection::new(found.from, found.to),
            None => {
                eprintln!("Error: '{needle}' does not occur in the document");
                std::process::exit(1);
            }
        },
    };

    let mut editor = config.editor.open(doc);
    let apply = ApplyRequest {
        mode: request.mode,
        selection,
        text: request.text.clone(),
    };
    match editor.apply(&apply) {
        Some(range) => eprintln!("inserted {}..{}", range.from, range.to),
        None => warn!("nothing to insert, document unchanged"),
    }
    editor.into_document()
}
