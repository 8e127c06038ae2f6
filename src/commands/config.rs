//! Config command definitions.

use crate::commands::params::{
    COMMAND_CONFIG, COMMAND_EXPORT, COMMAND_GET, COMMAND_PATH, PARAMETER_OUTPUT,
};
use clap::{Arg, Command};
use std::path::PathBuf;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get configuration details")
                .subcommand_required(true)
                .subcommand(
                    Command::new(COMMAND_PATH).about("Print the configuration file path"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_EXPORT)
                .about("Export the configuration to a file")
                .arg(
                    Arg::new(PARAMETER_OUTPUT)
                        .short('o')
                        .long(PARAMETER_OUTPUT)
                        .num_args(1)
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output file path"),
                ),
        )
}
