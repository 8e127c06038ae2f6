use thiserror::Error;

use crate::{actions::CliActionError, exit_codes::LatticeExitCode};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] crate::format::FormattingError),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Error related to JSON serialization/deserialization
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> LatticeExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => LatticeExitCode::UsageError,
            CliError::ConfigurationError(_) => LatticeExitCode::ConfigError,
            CliError::FormattingError(_) => LatticeExitCode::DataError,
            CliError::MissingRequiredArgument(_) => LatticeExitCode::UsageError,
            CliError::JsonError(_) => LatticeExitCode::DataError,
            CliError::ActionError(e) => e.exit_code(),
        }
    }
}
