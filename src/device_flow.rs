//! Device authorization login flow.
//!
//! The client never sees the user's password: it requests a device code,
//! shows the user a verification URL and a short code, and polls the token
//! endpoint until the browser-side consent completes. The polling step is an
//! explicit state machine with a pure transition function so the terminal
//! states (grant, expiry, timeout) are testable with synthetic responses.

use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::credentials::{Credential, CredentialStoreError, UserIdentity};
use crate::session::Session;

/// Max polling duration before giving up - 10 minutes
pub const POLL_MAX_DURATION: Duration = Duration::from_secs(10 * 60);

/// Poll interval used when the server does not specify one
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum DeviceFlowError {
    #[error("failed to initiate login: HTTP {status}: {body}")]
    InitiateFailed { status: u16, body: String },
    #[error("token poll failed: HTTP {status}: {body}")]
    PollFailed { status: u16, body: String },
    #[error("login session expired. Run 'lattice auth login' to try again")]
    Expired,
    #[error("login timed out. Run 'lattice auth login' to try again")]
    TimedOut,
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{0}")]
    StoreError(#[from] CredentialStoreError),
}

#[derive(Debug, Deserialize)]
struct DeviceAuthorization {
    #[serde(rename = "deviceCode")]
    device_code: String,
    #[serde(rename = "userCode")]
    user_code: String,
    #[serde(rename = "verificationUri")]
    verification_uri: Url,
    interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DeviceTokenResponse {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(rename = "refreshToken")]
    refresh_token: Option<String>,
    #[serde(rename = "expiresIn")]
    expires_in: Option<i64>,
    user: Option<UserIdentity>,
    status: Option<String>,
}

/// A completed consent: the token pair and the user it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserIdentity,
}

/// What a single poll of the token endpoint told us.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PollSignal {
    Granted(TokenGrant),
    Expired,
    Pending,
}

/// State of the flow after a poll. Everything but `Waiting` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FlowState {
    Waiting,
    Granted(TokenGrant),
    Expired,
    TimedOut,
}

/// Pure transition function of the polling state machine.
///
/// A grant or an expiry signal always wins; a pending signal keeps the flow
/// waiting until the elapsed wall-clock time crosses the ceiling.
pub(crate) fn advance(signal: PollSignal, elapsed: Duration) -> FlowState {
    match signal {
        PollSignal::Granted(grant) => FlowState::Granted(grant),
        PollSignal::Expired => FlowState::Expired,
        PollSignal::Pending => {
            if elapsed >= POLL_MAX_DURATION {
                FlowState::TimedOut
            } else {
                FlowState::Waiting
            }
        }
    }
}

/// Classify a token endpoint response body.
///
/// A body carrying the full grant completes the flow; `status == "expired"`
/// ends it; anything else means consent is still pending.
fn classify(response: DeviceTokenResponse) -> PollSignal {
    if let (Some(access_token), Some(refresh_token), Some(expires_in), Some(user)) = (
        response.access_token,
        response.refresh_token,
        response.expires_in,
        response.user,
    ) {
        return PollSignal::Granted(TokenGrant {
            access_token,
            refresh_token,
            expires_in,
            user,
        });
    }
    if response.status.as_deref() == Some("expired") {
        return PollSignal::Expired;
    }
    PollSignal::Pending
}

async fn initiate(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<DeviceAuthorization, DeviceFlowError> {
    let url = format!("{}/auth/device", base_url);
    debug!("Initiating device authorization at {}", url);
    let response = http.post(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = if body.is_empty() {
            "(no body)".to_string()
        } else {
            body
        };
        return Err(DeviceFlowError::InitiateFailed {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<DeviceAuthorization>().await?)
}

async fn poll(
    http: &reqwest::Client,
    base_url: &str,
    device_code: &str,
) -> Result<PollSignal, DeviceFlowError> {
    let url = format!("{}/auth/device/token", base_url);
    let response = http
        .post(&url)
        .json(&serde_json::json!({ "deviceCode": device_code }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        // a single failed poll ends the flow; transient errors are not retried
        let body = response.text().await.unwrap_or_default();
        let body = if body.is_empty() {
            "(no body)".to_string()
        } else {
            body
        };
        return Err(DeviceFlowError::PollFailed {
            status: status.as_u16(),
            body,
        });
    }
    Ok(classify(response.json::<DeviceTokenResponse>().await?))
}

/// Run the interactive login flow and install the resulting credential into
/// the session (store first, then cache).
pub async fn run_login_flow(
    http: &reqwest::Client,
    base_url: &str,
    session: &mut Session,
) -> Result<(), DeviceFlowError> {
    let authorization = initiate(http, base_url).await?;
    let interval = Duration::from_secs(
        authorization
            .interval
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
    );

    println!(
        "Open this URL in your browser to log in:\n  {}",
        authorization.verification_uri
    );
    println!("Your user code: {}", authorization.user_code);
    println!("Waiting for authentication...");

    let started = Instant::now();
    loop {
        if started.elapsed() >= POLL_MAX_DURATION {
            return Err(DeviceFlowError::TimedOut);
        }
        tokio::time::sleep(interval).await;

        let signal = poll(http, base_url, &authorization.device_code).await?;
        match advance(signal, started.elapsed()) {
            FlowState::Waiting => continue,
            FlowState::Granted(grant) => {
                println!(
                    "Successfully logged in as {} ({}).",
                    grant.user.name, grant.user.email
                );
                let credential = Credential::from_grant(
                    grant.access_token,
                    grant.refresh_token,
                    grant.expires_in,
                    grant.user,
                );
                session.install(credential)?;
                return Ok(());
            }
            FlowState::Expired => return Err(DeviceFlowError::Expired),
            FlowState::TimedOut => return Err(DeviceFlowError::TimedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialStore, CREDENTIALS_FILE_NAME};

    fn sample_grant() -> TokenGrant {
        TokenGrant {
            access_token: "granted".to_string(),
            refresh_token: "granted-r".to_string(),
            expires_in: 3600,
            user: UserIdentity {
                id: 5,
                email: "alan@example.com".to_string(),
                name: "Alan Turing".to_string(),
                picture_url: None,
            },
        }
    }

    #[test]
    fn test_pending_keeps_waiting_before_the_ceiling() {
        assert_eq!(
            advance(PollSignal::Pending, Duration::from_secs(1)),
            FlowState::Waiting
        );
    }

    #[test]
    fn test_pending_past_the_ceiling_times_out() {
        assert_eq!(
            advance(PollSignal::Pending, POLL_MAX_DURATION),
            FlowState::TimedOut
        );
        assert_eq!(
            advance(PollSignal::Pending, Duration::from_secs(11 * 60)),
            FlowState::TimedOut
        );
    }

    #[test]
    fn test_grant_wins_over_elapsed_time() {
        let grant = sample_grant();
        assert_eq!(
            advance(PollSignal::Granted(grant.clone()), Duration::from_secs(11 * 60)),
            FlowState::Granted(grant)
        );
    }

    #[test]
    fn test_expiry_is_terminal() {
        assert_eq!(advance(PollSignal::Expired, Duration::ZERO), FlowState::Expired);
    }

    #[test]
    fn test_expiry_on_third_poll_after_exactly_three_polls() {
        let signals = vec![PollSignal::Pending, PollSignal::Pending, PollSignal::Expired];
        let mut polls = 0;
        let mut state = FlowState::Waiting;
        for signal in signals {
            polls += 1;
            state = advance(signal, Duration::from_secs(polls * 5));
            if state != FlowState::Waiting {
                break;
            }
        }
        assert_eq!(polls, 3);
        assert_eq!(state, FlowState::Expired);
    }

    #[test]
    fn test_classify_grant_body() {
        let response: DeviceTokenResponse = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","expiresIn":3600,
                "user":{"id":5,"email":"alan@example.com","name":"Alan Turing","pictureUrl":null}}"#,
        )
        .unwrap();
        assert!(matches!(classify(response), PollSignal::Granted(_)));
    }

    #[test]
    fn test_classify_expired_body() {
        let response: DeviceTokenResponse =
            serde_json::from_str(r#"{"status":"expired"}"#).unwrap();
        assert_eq!(classify(response), PollSignal::Expired);
    }

    #[test]
    fn test_classify_empty_and_partial_bodies_as_pending() {
        let empty: DeviceTokenResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(classify(empty), PollSignal::Pending);

        // a grant missing its pieces is not a grant
        let partial: DeviceTokenResponse =
            serde_json::from_str(r#"{"accessToken":"a"}"#).unwrap();
        assert_eq!(classify(partial), PollSignal::Pending);
    }

    fn session_in(directory: &tempfile::TempDir, base_url: String) -> Session {
        let store = CredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME));
        Session::new(store, reqwest::Client::new(), base_url)
    }

    #[tokio::test]
    async fn test_login_flow_installs_credential_on_grant() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/device")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"deviceCode":"dev-1","userCode":"WDJB-MJHT",
                    "verificationUri":"https://lattice.team/activate","interval":0}"#,
            )
            .create_async()
            .await;
        server
            .mock("POST", "/auth/device/token")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "deviceCode": "dev-1"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"accessToken":"a","refreshToken":"r","expiresIn":3600,
                    "user":{"id":5,"email":"alan@example.com","name":"Alan Turing","pictureUrl":null}}"#,
            )
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_in(&directory, server.url());
        let http = reqwest::Client::new();

        run_login_flow(&http, &server.url(), &mut session)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().email, "alan@example.com");
        // the credential was persisted, not just cached
        assert!(directory.path().join(CREDENTIALS_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_failed_initiate_aborts_the_flow() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/device")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_in(&directory, server.url());
        let http = reqwest::Client::new();

        let error = run_login_flow(&http, &server.url(), &mut session)
            .await
            .unwrap_err();
        match error {
            DeviceFlowError::InitiateFailed { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_poll_aborts_the_flow() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/device")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"deviceCode":"dev-1","userCode":"WDJB-MJHT",
                    "verificationUri":"https://lattice.team/activate","interval":0}"#,
            )
            .create_async()
            .await;
        server
            .mock("POST", "/auth/device/token")
            .with_status(500)
            .create_async()
            .await;

        let directory = tempfile::tempdir().unwrap();
        let mut session = session_in(&directory, server.url());
        let http = reqwest::Client::new();

        let error = run_login_flow(&http, &server.url(), &mut session)
            .await
            .unwrap_err();
        assert!(matches!(error, DeviceFlowError::PollFailed { status: 500, .. }));
        assert!(!session.is_authenticated());
    }
}
