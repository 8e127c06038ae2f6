//! Authentication command definitions.
//!
//! This module defines CLI commands related to authentication and session
//! management.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, format_with_headers_parameter, COMMAND_AUTH,
    COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_STATUS,
};
use clap::Command;

/// Create the authentication command with all its subcommands.
pub fn auth_command() -> Command {
    Command::new(COMMAND_AUTH)
        .about("Authentication operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LOGIN).about(
                "Log in to Lattice. Opens a browser URL for consent, then polls until authentication is complete",
            ),
        )
        .subcommand(Command::new(COMMAND_LOGOUT).about("Log out and remove stored credentials"))
        .subcommand(
            Command::new(COMMAND_STATUS)
                .about("Check whether you are currently authenticated with Lattice")
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
}
