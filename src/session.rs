//! The authentication session for the current process.
//!
//! A `Session` is created once at process start, loads the persisted
//! credential, and is the single source of truth for "am I logged in" and
//! "what is my access token right now". Token renewal is transparent:
//! callers ask for a valid token and the session refreshes it first when it
//! is about to expire.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::credentials::{Credential, CredentialStore, CredentialStoreError, UserIdentity};

/// Refresh the access token when less than this many milliseconds remain.
///
/// The margin guarantees a token handed to a caller cannot expire mid-request.
pub const TOKEN_REFRESH_BUFFER_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated. Run 'lattice auth login' to begin the login flow")]
    NotAuthenticated,
    #[error(
        "failed to refresh access token: HTTP {status}: {body}. Run 'lattice auth login' to re-authenticate"
    )]
    RefreshFailed { status: u16, body: String },
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{0}")]
    StoreError(#[from] CredentialStoreError),
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
    #[serde(rename = "expiresIn")]
    expires_in: i64,
}

/// Process-wide single-slot holder of the current credential.
pub struct Session {
    store: CredentialStore,
    http: reqwest::Client,
    base_url: String,
    current: Option<Credential>,
}

impl Session {
    /// Create an empty session. Call [`Session::init`] to populate the slot
    /// from the credential store.
    pub fn new(store: CredentialStore, http: reqwest::Client, base_url: String) -> Self {
        Self {
            store,
            http,
            base_url,
            current: None,
        }
    }

    /// Populate the slot from the credential store. Calling this again simply
    /// reloads from the store.
    pub fn init(&mut self) {
        self.current = self.store.load();
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.current.as_ref().map(|credential| &credential.user)
    }

    pub fn current_credential(&self) -> Option<&Credential> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Update the slot in memory only. Durability is the caller's
    /// responsibility; pair this with a store write.
    pub fn replace(&mut self, credential: Credential) {
        self.current = Some(credential);
    }

    /// Persist a credential and make it current. The store is written before
    /// the in-memory slot so the two never disagree past a failed write.
    pub fn install(&mut self, credential: Credential) -> Result<(), CredentialStoreError> {
        self.store.save(&credential)?;
        self.replace(credential);
        Ok(())
    }

    /// Remove the stored record and empty the slot. Idempotent.
    pub fn clear(&mut self) -> Result<(), CredentialStoreError> {
        self.store.clear()?;
        self.current = None;
        Ok(())
    }

    fn is_expiring_soon(credential: &Credential) -> bool {
        Utc::now().timestamp_millis() >= credential.expires_at - TOKEN_REFRESH_BUFFER_MS
    }

    /// Return an access token valid for at least the refresh buffer,
    /// renewing it first if needed.
    ///
    /// On refresh failure the stale credential is left untouched in both the
    /// slot and the store, so a later manual login can proceed normally.
    pub async fn get_valid_token(&mut self) -> Result<String, AuthError> {
        let current = self.current.as_ref().ok_or(AuthError::NotAuthenticated)?;

        if !Self::is_expiring_soon(current) {
            return Ok(current.access_token.clone());
        }

        debug!("Access token is expiring soon, refreshing");
        let refreshed = self.perform_refresh(current.clone()).await?;
        let access_token = refreshed.access_token.clone();
        self.install(refreshed)?;
        Ok(access_token)
    }

    async fn perform_refresh(&self, credential: Credential) -> Result<Credential, AuthError> {
        let url = format!("{}/auth/refresh", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": credential.refresh_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = if body.is_empty() {
                "(no body)".to_string()
            } else {
                body
            };
            return Err(AuthError::RefreshFailed {
                status: status.as_u16(),
                body,
            });
        }

        let grant: RefreshResponse = response.json().await?;
        debug!("Access token refreshed");
        Ok(Credential {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: Utc::now().timestamp_millis() + grant.expires_in * 1000,
            user: credential.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CREDENTIALS_FILE_NAME;
    use std::fs;

    fn credential_expiring_in(millis: i64) -> Credential {
        Credential {
            access_token: "cached-token".to_string(),
            refresh_token: "cached-refresh".to_string(),
            expires_at: Utc::now().timestamp_millis() + millis,
            user: UserIdentity {
                id: 7,
                email: "grace@example.com".to_string(),
                name: "Grace Hopper".to_string(),
                picture_url: Some("https://cdn.example.com/grace.png".to_string()),
            },
        }
    }

    fn session_with(base_url: String, directory: &tempfile::TempDir) -> Session {
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));
        Session::new(store, reqwest::Client::new(), base_url)
    }

    #[tokio::test]
    async fn test_fresh_token_is_returned_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let refresh_mock = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with(server.url(), &directory);
        session
            .install(credential_expiring_in(10 * 60 * 1000))
            .unwrap();

        let token = session.get_valid_token().await.unwrap();
        assert_eq!(token, "cached-token");
        refresh_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_expiring_token_triggers_exactly_one_refresh() {
        let mut server = mockito::Server::new_async().await;
        let refresh_mock = server
            .mock("POST", "/auth/refresh")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "refreshToken": "cached-refresh"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"accessToken":"new","refreshToken":"new-r","expiresIn":3600}"#)
            .expect(1)
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with(server.url(), &directory);
        let stale = credential_expiring_in(60 * 1000);
        let stale_expiry = stale.expires_at;
        session.install(stale).unwrap();

        let before = Utc::now().timestamp_millis();
        let token = session.get_valid_token().await.unwrap();
        assert_eq!(token, "new");
        refresh_mock.assert_async().await;

        // both the cache and the store carry the new pair and a later expiry
        let cached = session.current_credential().unwrap().clone();
        let stored = session.store().load().unwrap();
        assert_eq!(cached, stored);
        assert_eq!(stored.access_token, "new");
        assert_eq!(stored.refresh_token, "new-r");
        assert!(stored.expires_at > stale_expiry);
        assert!(stored.expires_at >= before + 3_600_000);
        assert!(stored.expires_at <= Utc::now().timestamp_millis() + 3_600_000);
        // identity is carried over unchanged
        assert_eq!(stored.user.email, "grace@example.com");
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_state_untouched() {
        let mut server = mockito::Server::new_async().await;
        let refresh_mock = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_body("refresh token revoked")
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with(server.url(), &directory);
        session.install(credential_expiring_in(60 * 1000)).unwrap();

        let stored_before =
            fs::read(directory.path().join(CREDENTIALS_FILE_NAME)).unwrap();
        let cached_before = session.current_credential().unwrap().clone();

        let error = session.get_valid_token().await.unwrap_err();
        match error {
            AuthError::RefreshFailed { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("revoked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        refresh_mock.assert_async().await;

        let stored_after = fs::read(directory.path().join(CREDENTIALS_FILE_NAME)).unwrap();
        assert_eq!(stored_before, stored_after);
        assert_eq!(session.current_credential().unwrap(), &cached_before);
    }

    #[tokio::test]
    async fn test_empty_session_reports_not_authenticated() {
        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with("http://localhost:1".to_string(), &directory);
        session.init();

        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(matches!(
            session.get_valid_token().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with("http://localhost:1".to_string(), &directory);
        session.install(credential_expiring_in(60 * 60 * 1000)).unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        session.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_init_reloads_from_store() {
        let directory = tempfile::tempdir().unwrap();
        let mut session = session_with("http://localhost:1".to_string(), &directory);
        session.install(credential_expiring_in(60 * 60 * 1000)).unwrap();

        let mut second = session_with("http://localhost:1".to_string(), &directory);
        second.init();
        assert!(second.is_authenticated());
        assert_eq!(second.current_user().unwrap().name, "Grace Hopper");
    }
}
