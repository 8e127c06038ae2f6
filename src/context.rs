//! Execution context builder for the Lattice CLI.
//!
//! This module provides a centralized way to initialize the common execution
//! context most CLI commands need: the loaded configuration and an API client
//! whose session has been populated from the credential store. The context is
//! created once per process run and handed to the action functions, so there
//! is exactly one session per invocation.

use crate::{actions::CliActionError, client::ApiClient, configuration::Configuration};

/// Execution context containing common resources needed by CLI commands.
pub struct ExecutionContext {
    pub configuration: Configuration,
    pub api: ApiClient,
}

impl ExecutionContext {
    /// Create a new execution context from an already-loaded configuration.
    pub fn new(configuration: Configuration) -> Result<Self, CliActionError> {
        let api = ApiClient::new(&configuration)?;
        Ok(ExecutionContext { configuration, api })
    }

    /// Resolve the space slug to operate on: an explicit flag wins, otherwise
    /// the active space from the configuration.
    pub fn resolve_space_slug(&self, explicit: Option<&String>) -> Result<String, CliActionError> {
        if let Some(slug) = explicit {
            return Ok(slug.clone());
        }
        match self.configuration.active_space_slug() {
            Some(slug) => Ok(slug.to_string()),
            None => Err(CliActionError::BusinessLogicError(
                "No active space. Pass --space or run 'lattice space use' first.".to_string(),
            )),
        }
    }

    /// Resolve the vault to operate on: an explicit flag wins, otherwise the
    /// active vault from the configuration.
    pub fn resolve_vault_id(&self, explicit: Option<&String>) -> Result<String, CliActionError> {
        if let Some(vault_id) = explicit {
            return Ok(vault_id.clone());
        }
        match self.configuration.active_vault_id() {
            Some(vault_id) => Ok(vault_id.to_string()),
            None => Err(CliActionError::BusinessLogicError(
                "No active vault. Pass --vault or run 'lattice vault use' first.".to_string(),
            )),
        }
    }
}
