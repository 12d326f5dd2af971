//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

#[derive(Parser)]
#[command(name = "eeprom25")]
#[command(author, version, about = "25-series SPI EEPROM image tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Device/image options shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct DeviceArgs {
    /// EEPROM image file (created blank if missing)
    #[arg(short, long)]
    pub image: PathBuf,

    /// Device capacity in bytes
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x4000")]
    pub size: u32,

    /// Device page size in bytes
    #[arg(long, value_parser = parse_hex_u32, default_value = "64")]
    pub page_size: u32,

    /// Poll write-in-progress forever instead of timing out
    #[arg(long)]
    pub strict_wait: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a byte range from the image
    Read {
        #[command(flatten)]
        device: DeviceArgs,

        /// Start address
        #[arg(short, long, value_parser = parse_hex_u32)]
        addr: u32,

        /// Number of bytes to read
        #[arg(short, long, value_parser = parse_hex_u32)]
        len: u32,

        /// Output file (hexdump to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write bytes into the image at an address
    Write {
        #[command(flatten)]
        device: DeviceArgs,

        /// Start address
        #[arg(short, long, value_parser = parse_hex_u32)]
        addr: u32,

        /// Input file to write
        #[arg(short = 'f', long, conflicts_with = "data")]
        input: Option<PathBuf>,

        /// Inline hex bytes to write (e.g. "deadbeef")
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Dump the whole image
    Dump {
        #[command(flatten)]
        device: DeviceArgs,

        /// Output file (hexdump to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
