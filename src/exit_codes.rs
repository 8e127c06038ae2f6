//! Custom exit codes for the Lattice CLI.
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

/// Custom exit codes for the `lattice` binary
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Command line usage error (64) - User input error
    UsageError = 64,

    /// Data format error (65) - Input or response data was incorrect
    DataError = 65,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = 70,

    /// Configuration error (78) - Application configuration issue
    ConfigError = 78,

    /// Authentication error (100) - Login, session, or token issues
    AuthError = 100,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error
    ApiError = 102,
}

impl LatticeExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            LatticeExitCode::Success => "Success",
            LatticeExitCode::UsageError => "Command line usage error",
            LatticeExitCode::DataError => "Data format error",
            LatticeExitCode::SoftwareError => "Internal software error",
            LatticeExitCode::ConfigError => "Configuration error",
            LatticeExitCode::AuthError => "Authentication error",
            LatticeExitCode::NetworkError => "Network communication error",
            LatticeExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<LatticeExitCode> for i32 {
    fn from(code: LatticeExitCode) -> Self {
        code.code()
    }
}
