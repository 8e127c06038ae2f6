//! Session command definitions.

use crate::commands::params::{
    content_parameter, cursor_parameter, limit_parameter, space_parameter, COMMAND_GET,
    COMMAND_LIST, COMMAND_REPLY, COMMAND_SESSION, PARAMETER_ID,
};
use clap::{Arg, Command};

fn session_id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .num_args(1)
        .required(true)
        .help("Session ID")
}

/// Create the session command with all its subcommands.
pub fn session_command() -> Command {
    Command::new(COMMAND_SESSION)
        .about("Session operations (get, list, reply)")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the sessions you are part of, sorted by most recent activity")
                .arg(space_parameter())
                .arg(limit_parameter())
                .arg(cursor_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a session and its messages (paginated)")
                .arg(session_id_parameter())
                .arg(limit_parameter())
                .arg(cursor_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_REPLY)
                .about("Send a reply to a session you are a member of")
                .arg(session_id_parameter())
                .arg(content_parameter().required(true)),
        )
}
