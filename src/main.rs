use lattice_cli::banner::has_verbose_flag;
use lattice_cli::configuration::Configuration;
use lattice_cli::exit_codes::LatticeExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::execute_command;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    // Initialize the logging subsystem
    let args: Vec<String> = std::env::args().collect();
    let filter = if has_verbose_flag(&args) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Get the configuration
    let configuration = match Configuration::load_or_create_default() {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(LatticeExitCode::ConfigError.code());
        }
    };

    // Parse and execute the CLI command
    match execute_command(configuration).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(e.exit_code().code());
        }
    }
}
