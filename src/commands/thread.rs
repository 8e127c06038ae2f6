//! Thread command definitions.

use crate::commands::params::{
    content_parameter, limit_parameter, offset_parameter, space_parameter, title_parameter,
    COMMAND_CREATE, COMMAND_DELETE, COMMAND_EDIT, COMMAND_GET, COMMAND_LIST, COMMAND_THREAD,
    PARAMETER_ID,
};
use clap::{Arg, Command};

fn thread_id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .num_args(1)
        .required(true)
        .help("Thread ID")
}

/// Create the thread command with all its subcommands.
pub fn thread_command() -> Command {
    Command::new(COMMAND_THREAD)
        .about("Thread operations within a space")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List threads in a space (paginated)")
                .arg(space_parameter())
                .arg(limit_parameter())
                .arg(offset_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a thread and its replies (paginated)")
                .arg(thread_id_parameter())
                .arg(space_parameter())
                .arg(limit_parameter())
                .arg(offset_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a thread in a space")
                .arg(space_parameter())
                .arg(title_parameter().required(true))
                .arg(content_parameter().required(true)),
        )
        .subcommand(
            Command::new(COMMAND_EDIT)
                .about("Edit a thread. You must be the author")
                .arg(thread_id_parameter())
                .arg(space_parameter())
                .arg(title_parameter())
                .arg(content_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a thread. You must be the author")
                .arg(thread_id_parameter())
                .arg(space_parameter()),
        )
}
