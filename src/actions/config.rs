//! Config action implementations.

use std::path::PathBuf;

use crate::actions::CliActionError;
use crate::configuration::Configuration;

/// Print the path of the configuration file.
pub fn print_path() -> Result<(), CliActionError> {
    let path = Configuration::get_default_configuration_file_path()?;
    println!("{}", path.display());
    Ok(())
}

/// Export the configuration to the given file.
pub fn export(configuration: &Configuration, path: &PathBuf) -> Result<(), CliActionError> {
    configuration.save(path)?;
    println!("Configuration exported to {}", path.display());
    Ok(())
}
