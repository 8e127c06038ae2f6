//! Context command definitions.
//!
//! This module defines CLI commands related to context management.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, format_with_headers_parameter, COMMAND_CLEAR,
    COMMAND_CONTEXT, COMMAND_GET,
};
use clap::Command;

/// Create the context command with all its subcommands.
pub fn context_command() -> Command {
    Command::new(COMMAND_CONTEXT)
        .about("Context management")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get the active space/vault context")
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(Command::new(COMMAND_CLEAR).about("Clear the active space/vault context"))
}
