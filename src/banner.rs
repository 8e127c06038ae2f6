use color_print::cprintln;

use crate::configuration::Configuration;

/// Print the active space/vault context line shown before most commands.
pub fn print_context(configuration: &Configuration) {
    match (
        configuration.active_space_slug(),
        configuration.active_vault_id(),
    ) {
        (None, None) => {
            cprintln!(
                "<yellow>Run 'lattice vault use' to select a vault, then 'lattice space use' to select a space.</yellow>"
            );
        }
        (Some(_), None) => {
            cprintln!("<yellow>Vault not set. Run 'lattice vault use' to select one.</yellow>");
        }
        (None, Some(vault)) => {
            cprintln!(
                "<cyan>Vault:</cyan> {} <yellow>| Space not set. Run 'lattice space use' to select a space.</yellow>",
                vault
            );
        }
        (Some(space), Some(vault)) => {
            cprintln!("<cyan>Space:</cyan> {} <cyan>| Vault:</cyan> {}", space, vault);
        }
    }
}

/// Check if the command line arguments include the verbose flag
pub fn has_verbose_flag(args: &[String]) -> bool {
    for arg in args.iter() {
        if arg == "--verbose" || arg == "-v" {
            return true;
        }
    }
    false
}
