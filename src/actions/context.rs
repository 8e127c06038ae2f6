//! Context action implementations.

use clap::ArgMatches;

use crate::actions::{format_requested, output_format, CliActionError};
use crate::banner;
use crate::configuration::Configuration;
use crate::format::Formattable;

/// Print the active space/vault context.
pub fn get_context(
    configuration: &Configuration,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    if format_requested(matches) {
        let format = output_format(matches)?;
        println!("{}", configuration.format(&format)?);
        return Ok(());
    }
    banner::print_context(configuration);
    Ok(())
}

/// Clear the active space/vault context.
pub fn clear_context(configuration: &mut Configuration) -> Result<(), CliActionError> {
    configuration.clear_context();
    configuration.save_to_default()?;
    println!("Context cleared.");
    Ok(())
}
