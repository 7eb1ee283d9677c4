mod errors;
mod render;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use errors::{CliError, Result};
use pqmeta::options::DEFAULT_MAX_DEPTH;
use pqmeta::{DecodeOptions, FieldIdEncoding, MetaDataLoader};
use tracing::info;

/// Upper bound for `--max-depth`, deeper recursion risks overflowing the
/// stack.
const MAX_DEPTH_LIMIT: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Summary of the file, schema, and row groups.
    Text,
    /// Full metadata as json.
    Json,
    /// Decoded value tree with field ids, without projecting onto records.
    Raw,
}

#[derive(Parser)]
#[clap(name = "pqmeta")]
struct Arguments {
    /// Parquet file to read metadata from.
    file: PathBuf,
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Max nesting depth of values in the metadata.
    #[clap(
        long,
        env = "PQMETA_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_DEPTH_LIMIT),
    )]
    max_depth: u64,
    /// Layout of absolute field ids (zigzag, le, be).
    #[clap(long, env = "PQMETA_FIELD_ID_ENCODING", default_value_t = FieldIdEncoding::default())]
    field_id_encoding: FieldIdEncoding,
    /// Log level to use if RUST_LOG isn't set.
    #[clap(long, default_value_t = tracing::Level::ERROR)]
    log_level: tracing::Level,
    /// Log as json.
    #[clap(long)]
    log_json: bool,
}

/// Print the footer metadata of a parquet file.
fn main() {
    let args = Arguments::parse();
    let log_format = if args.log_json {
        logutil::LogFormat::Json
    } else {
        logutil::LogFormat::HumanReadable
    };
    logutil::configure_global_logger(args.log_level, log_format, io::stderr);

    if let Err(err) = inner(args) {
        println!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn inner(args: Arguments) -> Result<()> {
    let file = std::fs::read(&args.file).map_err(|source| CliError::ReadFile {
        path: args.file.clone(),
        source,
    })?;
    info!(path = %args.file.display(), len = file.len(), "read file");

    let options = DecodeOptions::default()
        .with_max_depth(args.max_depth as usize)
        .with_field_id_encoding(args.field_id_encoding);
    let loader = MetaDataLoader::with_options(options);

    let mut out = BufWriter::new(io::stdout().lock());
    match args.format {
        OutputFormat::Text => {
            let meta = loader.load(&file)?;
            render::write_text(&mut out, &meta)?;
        }
        OutputFormat::Json => {
            let meta = loader.load(&file)?;
            serde_json::to_writer_pretty(&mut out, &meta)?;
            writeln!(out)?;
        }
        OutputFormat::Raw => {
            let root = loader.load_raw(&file)?;
            render::write_raw(&mut out, &root)?;
        }
    }
    out.flush()?;

    Ok(())
}
