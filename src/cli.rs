//! CLI arguments for host-audit.
//!
//! This module defines the command-line interface structure using the clap
//! library, including all flags and value enums.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Html,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "host-audit",
    about = "Point-in-time audit snapshot of a single Linux host",
    long_about = "Point-in-time audit snapshot of a single Linux host.\n\n\
                  Collects network identity, disk usage, logged-in users, recent shell \
                  history, listening ports, memory usage, and running service uptimes, \
                  then renders them as a plain-text or HTML report, optionally delivered \
                  by email.",
    version = "0.1.0"
)]
pub struct Args {
    /// Report output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Deliver the HTML report via the configured SMTP submission host
    #[arg(long)]
    pub send_email: bool,

    /// Suppress printing the report to stdout (useful with --send-email)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log level (overrides any config file setting)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Root directory scanned for per-user shell history files
    #[arg(long)]
    pub home_root: Option<PathBuf>,

    /// How many trailing history lines to keep per user
    #[arg(long)]
    pub history_lines: Option<usize>,
}
