//! Space command definitions.

use crate::commands::params::{COMMAND_LIST, COMMAND_SPACE, COMMAND_USE, PARAMETER_SLUG};
use clap::{Arg, Command};

/// Create the space command with all its subcommands.
pub fn space_command() -> Command {
    Command::new(COMMAND_SPACE)
        .about("Space operations")
        .subcommand_required(true)
        .subcommand(Command::new(COMMAND_LIST).about("List the spaces you are a member of"))
        .subcommand(
            Command::new(COMMAND_USE)
                .about("Select the active space")
                .arg(
                    Arg::new(PARAMETER_SLUG)
                        .long(PARAMETER_SLUG)
                        .num_args(1)
                        .required(false)
                        .help("Space slug to activate without prompting"),
                ),
        )
}
