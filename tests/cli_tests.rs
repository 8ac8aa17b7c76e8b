//! CLI-level tests that run without network access.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command with config and token resolution isolated from the host.
fn notedown(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("notedown").unwrap();
    cmd.env_remove("NOTION_TOKEN");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn help_lists_subcommands() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("frontmatter"));
}

#[test]
fn version_flag_works() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("notedown"));
}

#[test]
fn export_without_token_fails_with_remediation() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API token not found"))
        .stderr(predicate::str::contains("NOTION_TOKEN"));
}

#[test]
fn export_rejects_implausible_token() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .arg("export")
        .env("NOTION_TOKEN", "nonsense")
        .assert()
        .failure()
        .stderr(predicate::str::contains("appears to be invalid"));
}

#[test]
fn frontmatter_requires_existing_directory() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .args(["frontmatter", "/definitely/not/a/real/path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn token_is_read_from_config_file() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("notedown");
    std::fs::create_dir_all(&config_dir).unwrap();
    // plausible token shape, but pointing nowhere useful
    std::fs::write(
        config_dir.join("config.toml"),
        "token = \"nonsense_not_a_token\"\n",
    )
    .unwrap();

    // resolution finds the token, validation rejects its shape - proving
    // the config file was read
    notedown(&config_home)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("appears to be invalid"));
}

#[test]
fn completions_generate_for_bash() {
    let config_home = TempDir::new().unwrap();
    notedown(&config_home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notedown"));
}
