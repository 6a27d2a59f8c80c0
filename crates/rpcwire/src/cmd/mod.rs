use clap::{Args, Subcommand};
use std::path::PathBuf;

use rpcwire_frame::DEFAULT_READ_CHUNK_SIZE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a byte stream into messages and print them.
    Decode(DecodeArgs),
    /// Frame one payload and write it to stdout.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file. Reads stdin when omitted.
    pub file: Option<PathBuf>,
    /// Bytes handed to the framer per read.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_READ_CHUNK_SIZE)]
    pub chunk_size: usize,
    /// Decode each body as a JSON-RPC command.
    #[arg(long)]
    pub commands: bool,
    /// Exit after printing N messages.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON payload.
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub json: Option<String>,
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["json", "file"])]
    pub data: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["json", "data"])]
    pub file: Option<PathBuf>,
    /// Emit a Content-Type header field.
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
