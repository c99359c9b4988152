use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Query the under-voltage status once (default)
    #[command(alias = "get")]
    Status {
        /// Print the reading as JSON
        #[arg(short, long)]
        json: bool,

        /// Single-line JSON output
        #[arg(short, long, requires = "json")]
        compact: bool,

        /// Exit code reflects the result: 0 normal, 1 under-voltage,
        /// 2 no supported interface, 3 status could not be read
        #[arg(long)]
        check: bool,
    },

    /// Show discovery details for troubleshooting
    Debug,

    /// Show or reset the configuration file
    Config {
        /// Print the config file path
        #[arg(long)]
        path: bool,

        /// Overwrite the config file with defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Detect a bad power supply on Raspberry Pi boards.
#[derive(Debug, Parser)]
#[command(name = "undervolt", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// hwmon class directory to scan
    #[arg(long, global = true)]
    pub hwmon_dir: Option<PathBuf>,

    /// Legacy firmware throttled register
    #[arg(long, global = true)]
    pub legacy_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}
