//! Entity text codec command line
//!
//! Usage:
//!   entitext serialize person.json > person.pure
//!   entitext deserialize model.pure --many
//!   entitext check person.json firm.json
//!
//! Logs go to stderr so stdout stays pipeable.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use entitext_cli::{check_files, deserialize_file, load_codec, serialize_files};
use entitext_codec::EntityTextSerializer;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "entitext")]
#[command(about = "Convert entities to and from model text")]
struct Args {
    /// Codec config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write entity JSON files as model text
    Serialize {
        #[arg(required = true)]
        entities: Vec<PathBuf>,
    },
    /// Print the entities in a model text file as JSON
    Deserialize {
        file: PathBuf,

        /// Accept any number of entities and print a JSON array
        #[arg(short, long)]
        many: bool,
    },
    /// Report whether each entity survives a round trip
    Check {
        #[arg(required = true)]
        entities: Vec<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.as_str())),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let codec = load_codec(args.config.as_deref())?;
    debug!(serializer = codec.name(), "Codec ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Serialize { entities } => {
            serialize_files(&codec, &entities, &mut out)?;
        }
        Command::Deserialize { file, many } => {
            writeln!(out, "{}", deserialize_file(&codec, &file, many)?)?;
        }
        Command::Check { entities } => {
            let results = check_files(&codec, &entities)?;
            for (path, supported) in &results {
                writeln!(out, "{}\t{path}", if *supported { "ok" } else { "unsupported" })?;
            }
            if results.iter().any(|(_, supported)| !supported) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
