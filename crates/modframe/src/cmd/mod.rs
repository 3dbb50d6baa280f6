use clap::{Args, Subcommand, ValueEnum};
use modframe_pdu::Role;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod crc;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the CRC-16 of hex bytes.
    Crc(CrcArgs),
    /// Wrap a PDU in an RTU frame.
    Encode(EncodeArgs),
    /// Run the stream processor over captured bytes and print each frame.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Crc(args) => crc::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Which side of the link produced the captured bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Decode responses, as a client would.
    Client,
    /// Decode requests, as a server would.
    Server,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Client => Role::Client,
            RoleArg::Server => Role::Server,
        }
    }
}

#[derive(Args, Debug)]
pub struct CrcArgs {
    /// Bytes as hex (whitespace allowed).
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// PDU (function code + data) as hex.
    pub pdu: String,
    /// Device id (unit address).
    #[arg(long, short = 'd')]
    pub device: u8,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Captured bytes as hex.
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read captured bytes from a file (hex text unless --binary).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Treat --file contents as raw bytes.
    #[arg(long, requires = "file")]
    pub binary: bool,
    /// Only print frames from these devices (comma-separated, 0 = any).
    #[arg(long, value_delimiter = ',', env = "MODFRAME_DEVICES")]
    pub devices: Option<Vec<u8>>,
    /// Which side of the link sent the bytes.
    #[arg(long, value_enum, default_value = "client", env = "MODFRAME_ROLE")]
    pub role: RoleArg,
    /// Feed the processor in chunks of this many bytes.
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<NonZeroUsize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
