//! Durable credential persistence for the Lattice CLI.
//!
//! A single credential record is stored as JSON in the per-user
//! configuration directory, owner-readable only. Absence and corruption both
//! read as "never logged in"; the record is only ever replaced whole.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::configuration::Configuration;

pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to write credentials: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to serialize credentials: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Identity snapshot captured at login and carried through refreshes.
///
/// Not re-validated locally; trusted as of the last login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: Option<String>,
}

/// The persisted access/refresh token pair plus the user identity snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    /// Epoch milliseconds after which the access token must not be used.
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
    pub user: UserIdentity,
}

impl Credential {
    /// Build a credential from a freshly issued token pair.
    ///
    /// `expires_at` is derived from the wall clock at the moment of issue,
    /// never from the token contents.
    pub fn from_grant(
        access_token: String,
        refresh_token: String,
        expires_in_secs: i64,
        user: UserIdentity,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now().timestamp_millis() + expires_in_secs * 1000,
            user,
        }
    }
}

/// Single-record credential store, one file per OS user.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default per-user location, next to the configuration file.
    pub fn from_default_location() -> Result<Self, CredentialStoreError> {
        let mut path = Configuration::get_default_configuration_directory()
            .map_err(|_| CredentialStoreError::FailedToFindConfigurationDirectory)?;
        path.push(CREDENTIALS_FILE_NAME);
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted credential, if any.
    ///
    /// A missing or unparseable file reads as `None` rather than an error.
    pub fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No credentials at {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!("Ignoring unparseable credentials file {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Write the full record, replacing any prior content.
    ///
    /// The containing directory is created owner-only (0700) and the file is
    /// written owner-only (0600). The write goes through a temporary file in
    /// the same directory and is renamed over the target, so readers never
    /// observe a partial record.
    pub fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let directory = self
            .path
            .parent()
            .ok_or(CredentialStoreError::FailedToFindConfigurationDirectory)?;
        fs::create_dir_all(directory)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(directory, fs::Permissions::from_mode(0o700))?;
        }

        let contents = serde_json::to_string_pretty(credential)?;
        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        file.write_all(contents.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Saved credentials to {:?}", self.path);
        Ok(())
    }

    /// Delete the record. Absence of a record to delete is not an error.
    pub fn clear(&self) -> Result<(), CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialStoreError::IoError(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_credential() -> Credential {
        Credential {
            access_token: "access-123".to_string(),
            refresh_token: "refresh-456".to_string(),
            expires_at: 1_900_000_000_000,
            user: UserIdentity {
                id: 42,
                email: "ada@example.com".to_string(),
                name: "Ada Lovelace".to_string(),
                picture_url: None,
            },
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let directory = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));

        let credential = sample_credential();
        store.save(&credential).unwrap();

        let loaded = store.load().expect("credential should load back");
        assert_eq!(loaded, credential);
    }

    #[test]
    fn test_load_from_missing_file_is_absent() {
        let directory = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_from_corrupt_file_is_absent() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join(CREDENTIALS_FILE_NAME);
        fs::write(&path, "not json at all {").unwrap();
        let store = CredentialStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let directory = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));

        store.save(&sample_credential()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        // clearing an already-empty store succeeds too
        store.clear().unwrap();
    }

    #[test]
    fn test_save_overwrites_prior_record() {
        let directory = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));

        store.save(&sample_credential()).unwrap();
        let mut updated = sample_credential();
        updated.access_token = "access-789".to_string();
        store.save(&updated).unwrap();

        assert_eq!(store.load().unwrap().access_token, "access-789");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let directory = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));
        store.save(&sample_credential()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_from_grant_derives_expiry_from_clock() {
        let before = Utc::now().timestamp_millis();
        let credential = Credential::from_grant(
            "a".to_string(),
            "r".to_string(),
            3600,
            sample_credential().user,
        );
        let after = Utc::now().timestamp_millis();

        assert!(credential.expires_at >= before + 3_600_000);
        assert!(credential.expires_at <= after + 3_600_000);
    }
}
