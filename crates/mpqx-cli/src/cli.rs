//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::ArgGroup;
use clap::Parser;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Package version plus the linked libmpq version, in the style of the
/// historical tool's version banner.
fn version_string() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| format!("{} (libmpq {})", env!("CARGO_PKG_VERSION"), libmpq::version()))
}

#[derive(Debug, Parser)]
#[command(name = "mpqx")]
#[command(author, about = "Lists and extracts files from MPQ (mopaq) archives", long_about = None)]
#[command(version = version_string())]
#[command(disable_version_flag = true)]
#[command(group(ArgGroup::new("action").required(true).args(["list", "extract"])))]
pub struct Cli {
    /// List the contents of the archive
    #[arg(short, long)]
    pub list: bool,

    /// Extract files from the archive
    #[arg(short, long)]
    pub extract: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Path to the MPQ archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// 1-based entry numbers to process (default: every entry)
    #[arg(value_name = "NUMBER", value_parser = parse_entry_number)]
    pub numbers: Vec<u32>,
}

/// Parses a 1-based entry number; `0` and non-numeric input are rejected
/// before any archive is opened.
fn parse_entry_number(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("invalid file number '{s}'")),
        Ok(number) => Ok(number),
    }
}
