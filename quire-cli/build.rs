use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered by quire-babel's FormatRegistry::with_defaults.
// Build scripts can't depend on the crate they build, so this is duplicated here.
const AVAILABLE_FORMATS: &[&str] = &["json", "markdown"];

const EDIT_MODES: &[&str] = &["insert", "insert-below", "replace"];

fn input() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn format(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich documents to markdown and apply paragraph edits")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(input())
                .arg(format("from"))
                .arg(format("to"))
                .arg(output()),
        )
        .subcommand(
            Command::new("export")
                .about("Export a JSON node tree to markdown")
                .arg(input())
                .arg(output()),
        )
        .subcommand(
            Command::new("import")
                .about("Import markdown as a JSON node tree")
                .arg(input())
                .arg(output()),
        )
        .subcommand(
            Command::new("edit")
                .about("Insert or replace paragraphs in a document")
                .arg(input())
                .arg(Arg::new("text").long("text"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(clap::builder::PossibleValuesParser::new(EDIT_MODES)),
                )
                .arg(Arg::new("at").long("at"))
                .arg(Arg::new("until").long("until"))
                .arg(Arg::new("find").long("find"))
                .arg(format("format"))
                .arg(output()),
        )
        .subcommand(
            Command::new("locate")
                .about("Map a flat character offset onto segment lengths")
                .arg(Arg::new("offset").index(1))
                .arg(Arg::new("lengths").index(2).num_args(0..)),
        );

    generate_to(Bash, &mut cmd, "quire", &outdir)?;
    generate_to(Zsh, &mut cmd, "quire", &outdir)?;
    generate_to(Fish, &mut cmd, "quire", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
