use clap::ArgMatches;
use std::path::PathBuf;

use lattice_cli::actions;
use lattice_cli::banner;
use lattice_cli::commands::create_cli_commands;
use lattice_cli::commands::params::{
    COMMAND_ASK, COMMAND_AUTH, COMMAND_CLEAR, COMMAND_CONFIG, COMMAND_CONTEXT, COMMAND_CREATE,
    COMMAND_DELETE, COMMAND_EDIT, COMMAND_EXPORT, COMMAND_GET, COMMAND_LIST, COMMAND_LOGIN,
    COMMAND_LOGOUT, COMMAND_PATH, COMMAND_POST, COMMAND_PUBLISH, COMMAND_REPLY, COMMAND_SEARCH,
    COMMAND_SESSION, COMMAND_SPACE, COMMAND_STATUS, COMMAND_THREAD, COMMAND_UNPUBLISH,
    COMMAND_UPDATE, COMMAND_USE, COMMAND_VAULT, PARAMETER_OUTPUT,
};
use lattice_cli::configuration::Configuration;
use lattice_cli::context::ExecutionContext;
use lattice_cli::error::CliError;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

pub async fn execute_command(mut configuration: Configuration) -> Result<(), CliError> {
    let matches = create_cli_commands();

    // auth, context and config manage the context themselves
    if let Some((name, _)) = matches.subcommand() {
        if name != COMMAND_AUTH && name != COMMAND_CONFIG && name != COMMAND_CONTEXT {
            banner::print_context(&configuration);
            println!();
        }
    }

    match matches.subcommand() {
        // Authentication
        Some((COMMAND_AUTH, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LOGIN, _)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::auth::login(&mut ctx).await?;
                Ok(())
            }
            Some((COMMAND_LOGOUT, _)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::auth::logout(&mut ctx)?;
                Ok(())
            }
            Some((COMMAND_STATUS, sub_matches)) => {
                let ctx = ExecutionContext::new(configuration)?;
                actions::auth::status(&ctx, sub_matches)?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Spaces
        Some((COMMAND_SPACE, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, _)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::spaces::list_spaces(&mut ctx).await?;
                Ok(())
            }
            Some((COMMAND_USE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::spaces::use_space(&mut ctx, sub_matches).await?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Threads
        Some((COMMAND_THREAD, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::threads::list_threads(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_GET, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::threads::get_thread(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_CREATE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::threads::create_thread(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_EDIT, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::threads::edit_thread(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_DELETE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::threads::delete_thread(&mut ctx, sub_matches).await?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Replies
        Some((COMMAND_REPLY, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::replies::create_reply(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_EDIT, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::replies::edit_reply(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_DELETE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::replies::delete_reply(&mut ctx, sub_matches).await?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Sessions
        Some((COMMAND_SESSION, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::sessions::list_sessions(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_GET, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::sessions::get_session(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_REPLY, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::sessions::reply_session(&mut ctx, sub_matches).await?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Vaults
        Some((COMMAND_VAULT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_USE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::use_vault(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_CREATE, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::create_vault(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_SEARCH, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::search_vaults(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_ASK, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::ask_vault(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_PUBLISH, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::publish(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_UNPUBLISH, sub_matches)) => {
                let mut ctx = ExecutionContext::new(configuration)?;
                actions::vaults::unpublish(&mut ctx, sub_matches).await?;
                Ok(())
            }
            Some((COMMAND_UPDATE, sub_matches)) => match sub_matches.subcommand() {
                Some((COMMAND_LIST, sub_matches)) => {
                    let mut ctx = ExecutionContext::new(configuration)?;
                    actions::vaults::list_updates(&mut ctx, sub_matches).await?;
                    Ok(())
                }
                Some((COMMAND_POST, sub_matches)) => {
                    let mut ctx = ExecutionContext::new(configuration)?;
                    actions::vaults::post_update(&mut ctx, sub_matches).await?;
                    Ok(())
                }
                Some((COMMAND_EDIT, sub_matches)) => {
                    let mut ctx = ExecutionContext::new(configuration)?;
                    actions::vaults::edit_update(&mut ctx, sub_matches).await?;
                    Ok(())
                }
                Some((COMMAND_DELETE, sub_matches)) => {
                    let mut ctx = ExecutionContext::new(configuration)?;
                    actions::vaults::delete_update(&mut ctx, sub_matches).await?;
                    Ok(())
                }
                None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                    sub_matches,
                ))),
                _ => unreachable!(),
            },
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Context
        Some((COMMAND_CONTEXT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => {
                actions::context::get_context(&configuration, sub_matches)?;
                Ok(())
            }
            Some((COMMAND_CLEAR, _)) => {
                actions::context::clear_context(&mut configuration)?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        // Configuration
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => match sub_matches.subcommand() {
                Some((COMMAND_PATH, _)) => {
                    actions::config::print_path()?;
                    Ok(())
                }
                None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                    sub_matches,
                ))),
                _ => unreachable!(),
            },
            Some((COMMAND_EXPORT, sub_matches)) => {
                let path = sub_matches.get_one::<PathBuf>(PARAMETER_OUTPUT).unwrap();
                actions::config::export(&configuration, path)?;
                Ok(())
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
            _ => unreachable!(),
        },
        None => Err(CliError::UnsupportedSubcommand(String::from("unknown"))),
        _ => unreachable!(),
    }
}
