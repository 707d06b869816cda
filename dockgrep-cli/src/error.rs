//! CLI-specific error types and exit code mapping

use dockgrep_container_logs::ContainerLogsError;
use dockgrep_core::error::DockgrepError;
use dockgrep_log_scanner::ScanError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// No line matched the pattern (grep) or the wait timed out (watch).
    #[error("no match: {reason}")]
    NoMatch { reason: String, quiet: bool },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from dockgrep-core.
    #[error("{0}")]
    Core(#[from] DockgrepError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                 |
    /// |------|-----------------------------------------|
    /// | 0    | Success (at least one match)            |
    /// | 1    | General / command error                 |
    /// | 2    | Configuration error                     |
    /// | 4    | No match, or wait timed out             |
    /// | 10   | IO error                                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(DockgrepError::Config(_)) => 2,
            Self::NoMatch { .. } => 4,
            Self::Io(_) | Self::Core(DockgrepError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }

    /// Quiet-mode misses report only through the exit code.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NoMatch { quiet: true, .. })
    }
}

impl From<ScanError> for CliError {
    fn from(e: ScanError) -> Self {
        Self::Command(e.to_string())
    }
}

impl From<ContainerLogsError> for CliError {
    fn from(e: ContainerLogsError) -> Self {
        match &e {
            ContainerLogsError::Config { .. } => Self::Config(e.to_string()),
            ContainerLogsError::WaitTimeout { .. } => Self::NoMatch {
                reason: e.to_string(),
                quiet: false,
            },
            _ => Self::Command(e.to_string()),
        }
    }
}
