//! Authenticated HTTP client for the Lattice platform API.
//!
//! Every request obtains its bearer token from the session's refresh engine,
//! so callers never see an access token that is about to expire. Errors carry
//! the HTTP status and a best-effort message extracted from the response body.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, trace};

use crate::configuration::Configuration;
use crate::credentials::{CredentialStore, CredentialStoreError};
use crate::session::{AuthError, Session};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error (HTTP {status}): {message}")]
    Status {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    AuthError(#[from] AuthError),
    #[error("{0}")]
    StoreError(#[from] CredentialStoreError),
}

impl ApiError {
    /// Build a status error, extracting the JSON body's `message` field when
    /// present and falling back to the raw body text.
    pub fn from_status(status: u16, endpoint: &str, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(parsed) => parsed
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
                .unwrap_or_else(|| body.to_string()),
            Err(_) => body.to_string(),
        };
        let message = if message.is_empty() {
            "(no body)".to_string()
        } else {
            message
        };
        ApiError::Status {
            status,
            endpoint: endpoint.to_string(),
            message,
        }
    }
}

/// Authenticated request issuer for the platform and drive services.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    drive_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client from the configuration and initialize its session from
    /// the credential store.
    pub fn new(configuration: &Configuration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lattice-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let store = CredentialStore::from_default_location()?;
        let mut session = Session::new(store, http.clone(), configuration.api_base_url());
        session.init();

        Ok(Self {
            http,
            base_url: configuration.api_base_url(),
            drive_url: configuration.drive_base_url(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.get(&url).query(query);
        self.execute(request, path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.post(&url).json(body);
        self.execute(request, path).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.patch(&url).json(body);
        self.execute(request, path).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.delete(&url);
        self.execute_no_content(request, path).await
    }

    /// URL of the vault summary file on the drive service
    pub fn drive_file_url(&self, vault_id: &str, file_name: &str) -> String {
        format!(
            "{}/api/v1/vaults/{}/files/{}",
            self.drive_url, vault_id, file_name
        )
    }

    /// Upload a markdown document to the drive service
    pub async fn put_markdown(&mut self, url: &str, content: String) -> Result<(), ApiError> {
        let request = self
            .http
            .put(url)
            .header(CONTENT_TYPE, "text/markdown")
            .body(content);
        self.execute_no_content(request, url).await
    }

    /// Delete a document from the drive service
    pub async fn delete_absolute(&mut self, url: &str) -> Result<(), ApiError> {
        let request = self.http.delete(url);
        self.execute_no_content(request, url).await
    }

    async fn send_authorized(
        &mut self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let token = self.session.get_valid_token().await?;
        Ok(request.bearer_auth(token).send().await?)
    }

    async fn execute<T: DeserializeOwned>(
        &mut self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = self.send_authorized(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request to {} failed with HTTP {}", endpoint, status);
            return Err(ApiError::from_status(status.as_u16(), endpoint, &body));
        }

        let text = response.text().await?;
        trace!("Raw response from {}: {}", endpoint, text);
        match serde_json::from_str::<T>(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("Failed to deserialize response from {}: {}", endpoint, e);
                Err(ApiError::JsonError(e))
            }
        }
    }

    async fn execute_no_content(
        &mut self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<(), ApiError> {
        let response = self.send_authorized(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request to {} failed with HTTP {}", endpoint, status);
            return Err(ApiError::from_status(status.as_u16(), endpoint, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_extracted_from_json_body() {
        let error = ApiError::from_status(400, "/threads", r#"{"message":"bad request"}"#);
        match error {
            ApiError::Status {
                status,
                endpoint,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(endpoint, "/threads");
                assert_eq!(message, "bad request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_raw_body_is_kept_when_not_json() {
        let error = ApiError::from_status(500, "/threads", "plain text error");
        match error {
            ApiError::Status { message, .. } => assert_eq!(message, "plain text error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_reads_as_no_body() {
        let error = ApiError::from_status(502, "/threads", "");
        match error {
            ApiError::Status { message, .. } => assert_eq!(message, "(no body)"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
