use clap::ArgMatches;
use thiserror::Error;

use crate::commands::params::{PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_PRETTY};
use crate::exit_codes::LatticeExitCode;
use crate::format::{OutputFormat, OutputFormatOptions};

pub mod auth;
pub mod config;
pub mod context;
pub mod replies;
pub mod sessions;
pub mod spaces;
pub mod threads;
pub mod vaults;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    AuthError(#[from] crate::session::AuthError),

    #[error("Device code flow error: {0}")]
    DeviceFlowError(#[from] crate::device_flow::DeviceFlowError),

    #[error("{0}")]
    ApiError(#[from] crate::client::ApiError),

    #[error("{0}")]
    StoreError(#[from] crate::credentials::CredentialStoreError),

    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    PromptError(#[from] inquire::InquireError),

    #[error("{0}")]
    BusinessLogicError(String),
}

impl CliActionError {
    /// Map each error kind to its process exit code
    pub fn exit_code(&self) -> LatticeExitCode {
        match self {
            CliActionError::AuthError(_) | CliActionError::DeviceFlowError(_) => {
                LatticeExitCode::AuthError
            }
            CliActionError::ApiError(inner) => match inner {
                crate::client::ApiError::Status { .. } => LatticeExitCode::ApiError,
                crate::client::ApiError::HttpError(_) => LatticeExitCode::NetworkError,
                crate::client::ApiError::JsonError(_) => LatticeExitCode::DataError,
                crate::client::ApiError::AuthError(_) => LatticeExitCode::AuthError,
                crate::client::ApiError::StoreError(_) => LatticeExitCode::ConfigError,
            },
            CliActionError::StoreError(_) | CliActionError::ConfigurationError(_) => {
                LatticeExitCode::ConfigError
            }
            CliActionError::FormattingError(_) | CliActionError::JsonError(_) => {
                LatticeExitCode::DataError
            }
            CliActionError::IoError(_) => LatticeExitCode::SoftwareError,
            CliActionError::PromptError(_) => LatticeExitCode::UsageError,
            CliActionError::BusinessLogicError(_) => LatticeExitCode::UsageError,
        }
    }
}

/// Read the shared format/pretty/headers parameters from the matches.
pub(crate) fn output_format(matches: &ArgMatches) -> Result<OutputFormat, CliActionError> {
    let format_str = matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(|s| s.as_str())
        .unwrap_or("json");
    let options = OutputFormatOptions {
        with_headers: matches.get_flag(PARAMETER_HEADERS),
        pretty: matches.get_flag(PARAMETER_PRETTY),
    };
    Ok(OutputFormat::from_string_with_options(format_str, options)?)
}

/// True when the user explicitly asked for machine-readable output, via the
/// command line or the environment, rather than falling back to the default.
pub(crate) fn format_requested(matches: &ArgMatches) -> bool {
    use clap::parser::ValueSource;
    matches!(
        matches.value_source(PARAMETER_FORMAT),
        Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
    )
}

/// Unwrap the `data` field of a response envelope.
pub(crate) fn unwrap_data<T>(
    data: Option<T>,
    what: &str,
) -> Result<T, CliActionError> {
    data.ok_or_else(|| {
        CliActionError::BusinessLogicError(format!("Malformed response: missing {}", what))
    })
}

/// Truncate long content for single-line display.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('\u{2026}');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_is_unchanged() {
        assert_eq!(truncate("hello", 200), "hello");
    }

    #[test]
    fn test_truncate_long_text_gets_ellipsis() {
        let long = "x".repeat(300);
        let truncated = truncate(&long, 200);
        assert_eq!(truncated.chars().count(), 201);
        assert!(truncated.ends_with('\u{2026}'));
    }
}
