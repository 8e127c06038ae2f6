//! Space action implementations.

use clap::ArgMatches;
use inquire::Select;

use crate::actions::CliActionError;
use crate::commands::params::PARAMETER_SLUG;
use crate::context::ExecutionContext;
use crate::model::{coerce_list, Space};

/// List the spaces the user is a member of.
pub async fn list_spaces(ctx: &mut ExecutionContext) -> Result<(), CliActionError> {
    let value: serde_json::Value = ctx.api.get("/spaces", &[]).await?;
    let spaces: Vec<Space> = coerce_list(value);

    if spaces.is_empty() {
        println!("You are not a member of any spaces.");
        return Ok(());
    }
    println!("Spaces ({} items):", spaces.len());
    for space in &spaces {
        println!("- {} ({})", space.name, space.slug);
    }
    Ok(())
}

/// Select the active space, interactively unless `--slug` was given.
pub async fn use_space(
    ctx: &mut ExecutionContext,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let slug = match matches.get_one::<String>(PARAMETER_SLUG) {
        Some(slug) => slug.clone(),
        None => {
            let value: serde_json::Value = ctx.api.get("/spaces", &[]).await?;
            let spaces: Vec<Space> = coerce_list(value);
            if spaces.is_empty() {
                return Err(CliActionError::BusinessLogicError(
                    "You are not a member of any spaces. Join or create a space first."
                        .to_string(),
                ));
            }
            let selected = Select::new("Select a space:", spaces).prompt()?;
            selected.slug
        }
    };

    ctx.configuration.set_active_space(&slug);
    ctx.configuration.save_to_default()?;
    println!("Active space set to \"{}\"", slug);
    Ok(())
}
