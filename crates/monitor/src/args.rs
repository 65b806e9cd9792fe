//! Args — command-line surface.

use clap::Parser;

/// Monitor a serial port and output detokenized trace messages.
#[derive(Debug, Parser, Clone)]
#[command(name = "tracetail", version)]
pub struct MonitorArgs {
    /// Serial device name (e.g. "COM1" or "/dev/ttyUSB0")
    #[arg(short, long, value_name = "DEV")]
    pub device: Option<String>,

    /// Baud rate (e.g. "115200")
    #[arg(short, long, value_name = "RATE")]
    pub baud: Option<u32>,

    /// Pass filter strings, comma delimited, case sensitive
    #[arg(short, long, value_name = "STR")]
    pub pass_filter: Option<String>,

    /// Filename and path of token files
    #[arg(value_name = "FILE")]
    pub token_files: Vec<String>,
}
