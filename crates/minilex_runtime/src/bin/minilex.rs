//! minilex CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use minilex_runtime::{Repl, RuntimeConfig, serialize};
use minilex_sequence::ExpansionPolicy;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    debug: bool,
    source: Option<String>,
    extraction_tags: Vec<String>,
    collapse_tags: Vec<String>,
    collapse: bool,
    show_tree: bool,
    show_export: bool,
    save: Option<PathBuf>,
}

impl CliConfig {
    fn runtime(&self) -> RuntimeConfig {
        let mut config = if self.debug {
            RuntimeConfig::debug()
        } else {
            RuntimeConfig::default()
        };
        if let Some(source) = &self.source {
            config = config.with_source(source.clone());
        }
        if self.collapse {
            config = config.with_policy(ExpansionPolicy::Collapse);
        }
        let show_tree = config.show_tree || self.show_tree;
        let show_export = config.show_export || self.show_export;
        config
            .with_extraction_tags(self.extraction_tags.iter().cloned())
            .with_collapse_tags(self.collapse_tags.iter().cloned())
            .with_show_tree(show_tree)
            .with_show_export(show_export)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("MINILEX_LOG").unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn tag_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_uppercase)
        .collect()
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--debug" => config.debug = true,
            "--collapse" => config.collapse = true,
            "--tree" => config.show_tree = true,
            "--export" => config.show_export = true,
            flag @ ("-s" | "--source") => {
                i += 1;
                config.source = Some(value_of(&args, i, flag)?);
            }
            flag @ ("-x" | "--extract") => {
                i += 1;
                config.extraction_tags.extend(tag_list(&value_of(&args, i, flag)?));
            }
            flag @ "--collapse-tags" => {
                i += 1;
                config.collapse_tags.extend(tag_list(&value_of(&args, i, flag)?));
            }
            flag @ "--save" => {
                i += 1;
                config.save = Some(PathBuf::from(value_of(&args, i, flag)?));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("minilex {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.debug);

    let mut repl = Repl::new(config.runtime())?;

    for file in &config.files {
        let output = repl.eval_file(file)?;
        println!("\x1b[1;36m=== {} ===\x1b[0m", file.display());
        println!("{output}");
    }

    if let Some(path) = &config.save {
        serialize::save_to_file(&repl.session().archive(), path)?;
    }

    if config.batch_mode {
        return Ok(());
    }

    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mminilex\x1b[0m - Card text lexer, tree builder, and flattener

\x1b[1mUSAGE:\x1b[0m
    minilex [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Card texts to process, one per file, one text line per file line

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    -b, --batch             Process files and exit (no REPL)
    -s, --source NAME       Source tag texts are built under (default: card)
    -x, --extract TAGS      Extract nodes with these comma-separated tags
    --collapse-tags TAGS    Strip results from these extracted tags
    --collapse              Drop condition markers from linear output
    --tree                  Print the symbol tree before the sequence
    --export                Print exports instead of lines
    --save PATH             Save processed files as a MessagePack archive

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --debug                 Show trees and exports, log at debug level
    MINILEX_LOG=FILTER      Log filter, e.g. minilex_sequence=trace

\x1b[1mEXAMPLES:\x1b[0m
    minilex                             Start interactive REPL
    minilex -b card.txt                 Flatten card.txt and exit
    minilex -b -x GAIN,MAY card.txt     Extract GAIN and MAY nodes
    minilex -s ability --collapse       REPL for ability texts, no markers

\x1b[1mREPL COMMANDS:\x1b[0m
    :help                Show all commands
    :extract TAGS        Switch to extraction
    :save PATH           Save processed inputs
    Ctrl+D               Exit REPL
    Ctrl+C               Cancel current input"
    );
}
