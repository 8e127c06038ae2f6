//! Vault command definitions.

use crate::commands::params::{
    content_parameter, limit_parameter, offset_parameter, space_parameter, title_parameter,
    vault_parameter, COMMAND_ASK, COMMAND_CREATE, COMMAND_DELETE, COMMAND_EDIT, COMMAND_LIST,
    COMMAND_POST, COMMAND_PUBLISH, COMMAND_SEARCH, COMMAND_UNPUBLISH, COMMAND_UPDATE,
    COMMAND_USE, COMMAND_VAULT, PARAMETER_ID, PARAMETER_MINE, PARAMETER_MODE, PARAMETER_NAME,
    PARAMETER_QUERY, PARAMETER_QUESTION,
};
use clap::{Arg, ArgAction, Command};

fn update_id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .num_args(1)
        .required(true)
        .help("Update ID")
}

/// Create the vault command with all its subcommands.
pub fn vault_command() -> Command {
    Command::new(COMMAND_VAULT)
        .about("Vault operations (use, create, search, ask, publish, updates)")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_USE)
                .about("Select the active vault")
                .arg(
                    Arg::new(PARAMETER_ID)
                        .long(PARAMETER_ID)
                        .num_args(1)
                        .required(false)
                        .help("Vault ID to activate without prompting"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a new vault and make it active")
                .arg(
                    Arg::new(PARAMETER_ID)
                        .long(PARAMETER_ID)
                        .num_args(1)
                        .required(false)
                        .help("Unique vault ID"),
                )
                .arg(
                    Arg::new(PARAMETER_NAME)
                        .long(PARAMETER_NAME)
                        .num_args(1)
                        .required(false)
                        .help("Vault display name"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_SEARCH)
                .about("Search public vaults by text and semantic similarity")
                .arg(
                    Arg::new(PARAMETER_QUERY)
                        .long(PARAMETER_QUERY)
                        .num_args(1)
                        .required(true)
                        .help("Search query"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_ASK)
                .about("Ask a vault a question. Creates a targeted 1:1 session")
                .arg(vault_parameter())
                .arg(space_parameter())
                .arg(
                    Arg::new(PARAMETER_QUESTION)
                        .long(PARAMETER_QUESTION)
                        .num_args(1)
                        .required(true)
                        .help("The question to ask (markdown supported)"),
                )
                .arg(
                    Arg::new(PARAMETER_MODE)
                        .long(PARAMETER_MODE)
                        .num_args(1)
                        .required(false)
                        .value_parser(["auto", "manual"])
                        .help("Session mode"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_PUBLISH)
                .about("Upload VAULT.md from the current directory to the vault on the drive service")
                .arg(vault_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UNPUBLISH)
                .about("Delete VAULT.md from the vault on the drive service")
                .arg(vault_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Vault update feed operations")
                .subcommand_required(true)
                .subcommand(
                    Command::new(COMMAND_LIST)
                        .about("List recent vault updates (paginated)")
                        .arg(vault_parameter())
                        .arg(
                            Arg::new(PARAMETER_MINE)
                                .long(PARAMETER_MINE)
                                .action(ArgAction::SetTrue)
                                .help("List only my own updates"),
                        )
                        .arg(limit_parameter())
                        .arg(offset_parameter()),
                )
                .subcommand(
                    Command::new(COMMAND_POST)
                        .about("Post an update for a vault")
                        .arg(vault_parameter())
                        .arg(title_parameter().required(true))
                        .arg(content_parameter().required(true)),
                )
                .subcommand(
                    Command::new(COMMAND_EDIT)
                        .about("Edit a posted update. You must be the author")
                        .arg(update_id_parameter())
                        .arg(title_parameter())
                        .arg(content_parameter()),
                )
                .subcommand(
                    Command::new(COMMAND_DELETE)
                        .about("Delete a posted update. You must be the author")
                        .arg(update_id_parameter()),
                ),
        )
}
