//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the
//! clap crate. Each command group lives in its own file; this module
//! assembles them into the top-level command.

use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod params;

pub mod auth;
pub mod config;
pub mod context;
pub mod reply;
pub mod session;
pub mod space;
pub mod thread;
pub mod vault;

/// Create and configure all CLI commands and their arguments.
///
/// # Returns
///
/// An `ArgMatches` instance containing the parsed command-line arguments.
pub fn create_cli_commands() -> ArgMatches {
    Command::new("lattice")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output for debugging"),
        )
        .subcommand(auth::auth_command())
        .subcommand(space::space_command())
        .subcommand(thread::thread_command())
        .subcommand(reply::reply_command())
        .subcommand(session::session_command())
        .subcommand(vault::vault_command())
        .subcommand(context::context_command())
        .subcommand(config::config_command())
        .get_matches()
}
