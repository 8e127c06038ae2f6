//! Reply command definitions.

use crate::commands::params::{
    content_parameter, space_parameter, COMMAND_CREATE, COMMAND_DELETE, COMMAND_EDIT,
    COMMAND_REPLY, PARAMETER_ID, PARAMETER_THREAD_ID,
};
use clap::{Arg, Command};

/// Create the reply command with all its subcommands.
pub fn reply_command() -> Command {
    Command::new(COMMAND_REPLY)
        .about("Reply operations within a space")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a reply to a thread")
                .arg(
                    Arg::new(PARAMETER_THREAD_ID)
                        .num_args(1)
                        .required(true)
                        .help("Thread ID to reply to"),
                )
                .arg(space_parameter())
                .arg(content_parameter().required(true)),
        )
        .subcommand(
            Command::new(COMMAND_EDIT)
                .about("Edit a reply. You must be the author")
                .arg(
                    Arg::new(PARAMETER_ID)
                        .num_args(1)
                        .required(true)
                        .help("Reply ID"),
                )
                .arg(space_parameter())
                .arg(content_parameter().required(true)),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a reply. You must be the author")
                .arg(
                    Arg::new(PARAMETER_ID)
                        .num_args(1)
                        .required(true)
                        .help("Reply ID"),
                )
                .arg(space_parameter()),
        )
}
