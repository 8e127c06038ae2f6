#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use std::process::Command;

    // keep the test runs away from the user's real configuration
    fn config_dir() -> &'static std::path::Path {
        static DIR: std::sync::OnceLock<tempfile::TempDir> = std::sync::OnceLock::new();
        DIR.get_or_init(|| tempfile::tempdir().unwrap()).path()
    }

    fn lattice_command() -> Command {
        let mut cmd = Command::cargo_bin("lattice").unwrap();
        cmd.env("LATTICE_CONFIG_DIR", config_dir());
        cmd
    }

    #[test]
    fn test_cli_help_output() {
        let mut cmd = lattice_command();

        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Options:"));
        assert!(help_output.contains("Commands:"));

        // Verify that major command groups are present
        assert!(help_output.contains("auth"));
        assert!(help_output.contains("space"));
        assert!(help_output.contains("thread"));
        assert!(help_output.contains("reply"));
        assert!(help_output.contains("session"));
        assert!(help_output.contains("vault"));
        assert!(help_output.contains("context"));
        assert!(help_output.contains("config"));

        // Verify that help flags are present
        assert!(help_output.contains("-h, --help"));
        assert!(help_output.contains("-V, --version"));

        assert!(help_output.contains("lattice"));
    }

    #[test]
    fn test_cli_subcommand_help_outputs() {
        let subcommands = vec![
            "auth", "space", "thread", "reply", "session", "vault", "context", "config",
        ];

        for subcommand in subcommands {
            let mut cmd = lattice_command();
            let assert_result = cmd.arg(subcommand).arg("--help").assert().success();
            let output = assert_result.get_output();
            let help_output = String::from_utf8_lossy(&output.stdout);

            assert!(help_output.contains("Usage:"));
            assert!(help_output.contains(subcommand));

            // Each subcommand should list its own subcommands
            if subcommand == "auth" {
                assert!(help_output.contains("login"));
                assert!(help_output.contains("logout"));
                assert!(help_output.contains("status"));
            } else if subcommand == "space" {
                assert!(help_output.contains("list"));
                assert!(help_output.contains("use"));
            } else if subcommand == "thread" {
                assert!(help_output.contains("list"));
                assert!(help_output.contains("get"));
                assert!(help_output.contains("create"));
                assert!(help_output.contains("edit"));
                assert!(help_output.contains("delete"));
            } else if subcommand == "reply" {
                assert!(help_output.contains("create"));
                assert!(help_output.contains("edit"));
                assert!(help_output.contains("delete"));
            } else if subcommand == "session" {
                assert!(help_output.contains("list"));
                assert!(help_output.contains("get"));
                assert!(help_output.contains("reply"));
            } else if subcommand == "vault" {
                assert!(help_output.contains("use"));
                assert!(help_output.contains("create"));
                assert!(help_output.contains("search"));
                assert!(help_output.contains("ask"));
                assert!(help_output.contains("publish"));
                assert!(help_output.contains("unpublish"));
                assert!(help_output.contains("update"));
            } else if subcommand == "context" {
                assert!(help_output.contains("get"));
                assert!(help_output.contains("clear"));
            } else if subcommand == "config" {
                assert!(help_output.contains("get"));
                assert!(help_output.contains("export"));
            }
        }
    }

    #[test]
    fn test_cli_version_output() {
        let mut cmd = lattice_command();

        let assert_result = cmd.arg("--version").assert().success();
        let output = assert_result.get_output();
        let version_output = String::from_utf8_lossy(&output.stdout);

        assert!(version_output.contains("lattice"));
        assert!(version_output.contains('.'));
    }

    #[test]
    fn test_nested_subcommand_help() {
        let nested_commands = vec![
            ("auth", "login"),
            ("auth", "logout"),
            ("auth", "status"),
            ("space", "list"),
            ("space", "use"),
            ("thread", "list"),
            ("thread", "get"),
            ("thread", "create"),
            ("thread", "edit"),
            ("thread", "delete"),
            ("reply", "create"),
            ("reply", "edit"),
            ("reply", "delete"),
            ("session", "list"),
            ("session", "get"),
            ("session", "reply"),
            ("vault", "use"),
            ("vault", "create"),
            ("vault", "search"),
            ("vault", "ask"),
            ("vault", "publish"),
            ("vault", "unpublish"),
            ("context", "get"),
            ("context", "clear"),
            ("config", "export"),
        ];

        for (parent_cmd, sub_cmd) in nested_commands {
            let mut cmd = lattice_command();
            let assert_result = cmd
                .arg(parent_cmd)
                .arg(sub_cmd)
                .arg("--help")
                .assert()
                .success();
            let output = assert_result.get_output();
            let help_output = String::from_utf8_lossy(&output.stdout);

            assert!(help_output.contains("Usage:"));
            assert!(help_output.contains(parent_cmd));
            assert!(help_output.contains(sub_cmd));
        }
    }

    #[test]
    fn test_deeply_nested_subcommand_help() {
        let deeply_nested_commands = vec![
            ("vault", "update", "list"),
            ("vault", "update", "post"),
            ("vault", "update", "edit"),
            ("vault", "update", "delete"),
            ("config", "get", "path"),
        ];

        for (parent_cmd, sub_cmd, sub_sub_cmd) in deeply_nested_commands {
            let mut cmd = lattice_command();
            let assert_result = cmd
                .arg(parent_cmd)
                .arg(sub_cmd)
                .arg(sub_sub_cmd)
                .arg("--help")
                .assert()
                .success();
            let output = assert_result.get_output();
            let help_output = String::from_utf8_lossy(&output.stdout);

            assert!(help_output.contains("Usage:"));
            assert!(help_output.contains(sub_cmd));
            assert!(help_output.contains(sub_sub_cmd));
        }
    }
}
