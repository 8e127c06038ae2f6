//! End-to-end tests of the authentication commands against a mock platform.

#[cfg(test)]
mod auth_cli_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;

    fn lattice_command(config_dir: &std::path::Path) -> Command {
        let mut cmd = Command::cargo_bin("lattice").unwrap();
        cmd.env("LATTICE_CONFIG_DIR", config_dir);
        cmd
    }

    #[test]
    fn test_auth_status_without_credentials() {
        let config_dir = tempfile::tempdir().unwrap();
        lattice_command(config_dir.path())
            .arg("auth")
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("not authenticated"));
    }

    #[test]
    fn test_auth_logout_is_idempotent() {
        let config_dir = tempfile::tempdir().unwrap();
        for _ in 0..2 {
            lattice_command(config_dir.path())
                .arg("auth")
                .arg("logout")
                .assert()
                .success()
                .stdout(predicate::str::contains("Logged out"));
        }
    }

    #[test]
    fn test_auth_login_fails_when_initiate_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/auth/device")
            .with_status(503)
            .with_body("maintenance")
            .create();

        let config_dir = tempfile::tempdir().unwrap();
        lattice_command(config_dir.path())
            .env("LATTICE_API_URL", server.url())
            .arg("auth")
            .arg("login")
            .assert()
            .failure()
            .code(100)
            .stderr(predicate::str::contains("Device code flow error"));
    }

    #[test]
    fn test_auth_login_fails_when_consent_expires() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/auth/device")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"deviceCode":"dev-1","userCode":"WDJB-MJHT",
                    "verificationUri":"https://lattice.team/activate","interval":0}"#,
            )
            .create();
        server
            .mock("POST", "/auth/device/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"expired"}"#)
            .create();

        let config_dir = tempfile::tempdir().unwrap();
        lattice_command(config_dir.path())
            .env("LATTICE_API_URL", server.url())
            .arg("auth")
            .arg("login")
            .assert()
            .failure()
            .code(100)
            .stderr(predicate::str::contains("expired"));
    }

    #[test]
    fn test_auth_login_persists_credentials_and_status_reports_them() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/auth/device")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"deviceCode":"dev-1","userCode":"WDJB-MJHT",
                    "verificationUri":"https://lattice.team/activate","interval":0}"#,
            )
            .create();
        server
            .mock("POST", "/auth/device/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"accessToken":"a","refreshToken":"r","expiresIn":3600,
                    "user":{"id":5,"email":"alan@example.com","name":"Alan Turing","pictureUrl":null}}"#,
            )
            .create();

        let config_dir = tempfile::tempdir().unwrap();
        lattice_command(config_dir.path())
            .env("LATTICE_API_URL", server.url())
            .arg("auth")
            .arg("login")
            .assert()
            .success()
            .stdout(predicate::str::contains("Successfully logged in as Alan Turing"));

        let credentials_path = config_dir.path().join("credentials.json");
        assert!(credentials_path.exists());
        let raw = std::fs::read_to_string(&credentials_path).unwrap();
        assert!(raw.contains("\"accessToken\""));
        assert!(raw.contains("alan@example.com"));

        // a second invocation sees the persisted session without any network
        lattice_command(config_dir.path())
            .arg("auth")
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Authenticated as Alan Turing"));

        // machine-readable status
        lattice_command(config_dir.path())
            .arg("auth")
            .arg("status")
            .arg("--format")
            .arg("csv")
            .arg("--headers")
            .assert()
            .success()
            .stdout(predicate::str::contains("NAME,EMAIL,USER_ID,TOKEN_EXPIRES_AT"));
    }

    #[test]
    fn test_config_get_path_points_at_override_directory() {
        let config_dir = tempfile::tempdir().unwrap();
        lattice_command(config_dir.path())
            .arg("config")
            .arg("get")
            .arg("path")
            .assert()
            .success()
            .stdout(predicate::str::contains("config.yml"));
    }
}
