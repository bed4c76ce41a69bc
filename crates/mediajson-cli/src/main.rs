//! `mediajson` CLI: check, normalise and inspect media JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document (stdin → "ok" on stdout, non-zero exit on failure)
//! echo '{"origin":"417798915:0"}' | mediajson check
//!
//! # Rewrite every media value in canonical form
//! mediajson normalize -i grain.json -o grain.canonical.json --pretty
//!
//! # List every media value with its JSON Pointer and type
//! mediajson inspect -i grain.json
//!
//! # More logging on stderr (or set RUST_LOG)
//! mediajson -vv check -i grain.json
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mediajson::{encode_leaf, MediaValue, Options, DEFAULT_MAX_DEPTH, MAX_DEPTH};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mediajson",
    version,
    about = "Check, normalise and inspect media JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Deepest container nesting accepted (at most 127)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = parse_max_depth
    )]
    max_depth: usize,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report whether every media value is valid
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse a document and write it back with canonical media values
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// List every media value as `pointer<TAB>type<TAB>canonical JSON`
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = Options::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Check { input } => {
            let value = parse_input(input.as_deref(), &options)?;
            let count = value.domain_leaves().len();
            println!("ok ({} media values)", count);
        }
        Commands::Normalize {
            input,
            output,
            pretty,
        } => {
            let value = parse_input(input.as_deref(), &options)?;
            let mut text = mediajson::dumps_with(&value, &options.with_pretty(pretty))
                .context("Failed to serialise media JSON")?;
            text.push('\n');
            write_output(output.as_deref(), &text)?;
        }
        Commands::Inspect { input } => {
            let value = parse_input(input.as_deref(), &options)?;
            for (pointer, leaf) in value.domain_leaves() {
                println!("{}\t{}\t{}", pointer, leaf.kind(), canonical(leaf));
            }
        }
    }

    Ok(())
}

fn parse_max_depth(arg: &str) -> std::result::Result<usize, String> {
    let depth: usize = arg.parse().map_err(|e| format!("{e}"))?;
    if depth > MAX_DEPTH {
        return Err(format!(
            "must be at most {MAX_DEPTH}, the deepest nesting serde_json parses"
        ));
    }
    Ok(depth)
}

/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_input(path: Option<&str>, options: &Options) -> Result<MediaValue> {
    let text = read_input(path)?;
    let value = mediajson::loads_with(&text, options).context("Failed to parse media JSON")?;
    tracing::debug!(depth = value.depth(), "document parsed");
    Ok(value)
}

fn canonical(leaf: &MediaValue) -> String {
    encode_leaf(leaf).map(|v| v.to_string()).unwrap_or_default()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
