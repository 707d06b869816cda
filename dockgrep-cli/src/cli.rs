//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// dockgrep -- incremental grep over command output and container logs.
///
/// Use `dockgrep <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "dockgrep", version, about, long_about = None)]
pub struct Cli {
    /// Path to the dockgrep.toml configuration file.
    #[arg(short, long, default_value = "dockgrep.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grep a file or stdin once.
    Grep(GrepArgs),

    /// Wait until a container logs a line matching a pattern.
    Watch(WatchArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- grep ----

#[derive(Args, Debug)]
pub struct GrepArgs {
    /// File to search, or `-` for stdin.
    pub input: PathBuf,

    /// Regular expression to search for.
    pub pattern: String,

    /// Print nothing; report the result through the exit code only.
    #[arg(short, long)]
    pub quiet: bool,
}

// ---- watch ----

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Container name or ID.
    pub container: String,

    /// Regular expression to wait for.
    pub pattern: String,

    /// Give up after this many seconds (overrides `watch.wait_timeout_secs`).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Poll interval in milliseconds (overrides `watch.poll_interval_ms`).
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Print nothing; report the result through the exit code only.
    #[arg(short, long)]
    pub quiet: bool,
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, watch).
        #[arg(long)]
        section: Option<String>,
    },
}
