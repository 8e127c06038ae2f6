use crate::format::{Formattable, FormattingError, OutputFormat};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use serde_yaml;
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "lattice";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "LATTICE_CONFIG_DIR";
/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "LATTICE_API_URL";
/// Environment variable overriding the drive service base URL
pub const DRIVE_URL_ENV: &str = "LATTICE_DRIVE_URL";

const DEFAULT_API_BASE_URL: &str = "https://api.lattice.team";
const DEFAULT_DRIVE_BASE_URL: &str = "https://drive.lattice.team";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("failed to write configuration data to file, because of: {cause:?}")]
    FailedToWriteData { cause: Box<dyn std::error::Error> },
    #[error("{cause:?}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

/// Persistent per-user configuration for the Lattice CLI.
///
/// Stored as YAML in the per-user configuration directory. Holds the base
/// URLs of the platform services and the active space/vault context that
/// commands fall back to when no explicit flag is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drive_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_space_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_vault_id: Option<String>,
}

impl Configuration {
    /// Resolve the directory holding the configuration and credential files.
    ///
    /// The `LATTICE_CONFIG_DIR` environment variable takes precedence over
    /// the platform configuration directory.
    pub fn get_default_configuration_directory() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(config_dir_str));
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut directory = configuration_directory;
                directory.push(DEFAULT_APPLICATION_ID);
                Ok(directory)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::get_default_configuration_directory()?;
        path.push(DEFAULT_CONFIGURATION_FILE_NAME);
        Ok(path)
    }

    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {:?}...", default_file_path);
        Configuration::load_from_file(default_file_path)
    }

    /// Load the default configuration, creating one if none exists.
    /// This is more user-friendly for first-time users.
    pub fn load_or_create_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;

        match Configuration::load_from_file(default_file_path.clone()) {
            Ok(configuration) => Ok(configuration),
            Err(ConfigurationError::FailedToLoadData { cause })
                if cause
                    .downcast_ref::<std::io::Error>()
                    .map(|e| e.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false) =>
            {
                debug!("Configuration file not found, creating default configuration");
                let default_configuration = Configuration::default();
                default_configuration.save(&default_file_path)?;
                Ok(default_configuration)
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        match fs::read_to_string(path) {
            Ok(configuration) => match serde_yaml::from_str(&configuration) {
                Ok(configuration) => Ok(configuration),
                Err(cause) => Err(ConfigurationError::FailedToLoadData {
                    cause: Box::new(cause),
                }),
            },
            Err(cause) => Err(ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }),
        }
    }

    pub fn write(&self, writer: Box<dyn Write>) -> Result<(), ConfigurationError> {
        match serde_yaml::to_writer(writer, self) {
            Ok(()) => Ok(()),
            Err(e) => Err(ConfigurationError::FailedToWriteData { cause: Box::new(e) }),
        }
    }

    pub fn save(&self, path: &PathBuf) -> Result<(), ConfigurationError> {
        match path.parent() {
            Some(directory) => {
                if fs::create_dir_all(directory).is_err() {
                    return Err(ConfigurationError::FailedToFindConfigurationDirectory);
                }
            }
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        match File::create(path) {
            Ok(file) => {
                let writer: Box<dyn Write> = Box::new(file);
                self.write(writer)
            }
            Err(e) => Err(ConfigurationError::FailedToWriteData { cause: Box::new(e) }),
        }
    }

    pub fn save_to_default(&self) -> Result<(), ConfigurationError> {
        self.save(&Self::get_default_configuration_file_path()?)
    }

    /// Base URL of the platform API, without a trailing slash.
    ///
    /// Resolution order: `LATTICE_API_URL`, the configured `api_url`, the
    /// built-in default.
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            return url.trim_end_matches('/').to_string();
        }
        match &self.api_url {
            Some(url) => url.to_string().trim_end_matches('/').to_string(),
            None => DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Base URL of the drive service, without a trailing slash.
    pub fn drive_base_url(&self) -> String {
        if let Ok(url) = std::env::var(DRIVE_URL_ENV) {
            return url.trim_end_matches('/').to_string();
        }
        match &self.drive_url {
            Some(url) => url.to_string().trim_end_matches('/').to_string(),
            None => DEFAULT_DRIVE_BASE_URL.to_string(),
        }
    }

    // Context management methods

    pub fn active_space_slug(&self) -> Option<&str> {
        self.active_space_slug.as_deref()
    }

    pub fn set_active_space(&mut self, slug: &str) {
        self.active_space_slug = Some(slug.to_string());
    }

    pub fn active_vault_id(&self) -> Option<&str> {
        self.active_vault_id.as_deref()
    }

    pub fn set_active_vault(&mut self, vault_id: &str) {
        self.active_vault_id = Some(vault_id.to_string());
    }

    pub fn clear_context(&mut self) {
        self.active_space_slug = None;
        self.active_vault_id = None;
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.serialize(("ACTIVE_SPACE_SLUG", "ACTIVE_VAULT_ID"))?;
                }
                wtr.serialize((
                    self.active_space_slug.as_deref().unwrap_or_default(),
                    self.active_vault_id.as_deref().unwrap_or_default(),
                ))?;
                let data = wtr.into_inner()?;
                String::from_utf8(data).map_err(FormattingError::Utf8Error)
            }
        }
    }
}
