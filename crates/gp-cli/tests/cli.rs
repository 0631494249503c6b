// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use assert_cmd::Command;
use tempfile::TempDir;

/// `gitpulse` isolated from the host's user, project and environment config
fn gitpulse(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gitpulse").expect("binary is built");
    cmd.current_dir(workdir.path())
        .env("GITPULSE_HOME", workdir.path().join("home"))
        .env_remove("GITPULSE_PROVIDER__ACCESS_TOKEN")
        .env_remove("GITPULSE_PROVIDER__ORGANIZATION_ID")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[gp_test_utils::logged_test]
fn help_lists_every_command() {
    let dir = TempDir::new().unwrap();
    let output = gitpulse(&dir).arg("--help").output().unwrap();
    assert!(output.status.success());

    let help = stdout_of(&output);
    for command in ["repos", "repo", "branches", "commits", "commit", "diff", "report", "tools", "serve", "config"] {
        assert!(help.contains(command), "missing {command} in:\n{help}");
    }
}

#[gp_test_utils::logged_test]
fn tools_list_needs_no_credentials() {
    let dir = TempDir::new().unwrap();
    let output = gitpulse(&dir).args(["tools", "list"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let descriptors: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = descriptors
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "list_repositories",
            "get_repository_info",
            "get_repository_commits",
            "get_commit_details",
            "get_commit_changes",
            "list_branches",
        ]
    );
}

#[gp_test_utils::logged_test]
fn config_show_reports_origins_and_hides_the_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gitpulse.toml"),
        "[general]\nproject-name = \"Pulse\"\n",
    )
    .unwrap();

    let output = gitpulse(&dir)
        .args(["config", "show", "--show-origin", "--days", "3"])
        .args(["--set", "provider.access-token=pt-very-secret"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("general.project-name=\"Pulse\" (from project)"), "{stdout}");
    assert!(stdout.contains("general.time-range=3 (from flags)"), "{stdout}");
    assert!(stdout.contains("provider.access-token=[REDACTED] (from flags)"), "{stdout}");
    assert!(!stdout.contains("pt-very-secret"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("pt-very-secret"));
}

#[gp_test_utils::logged_test]
fn token_from_environment_is_layered_above_files() {
    let dir = TempDir::new().unwrap();
    let output = gitpulse(&dir)
        .env("GITPULSE_PROVIDER__ORGANIZATION_ID", "org-env")
        .args(["config", "explain", "provider.organization-id"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Winning scope: env"));
}

#[gp_test_utils::logged_test]
fn provider_commands_fail_without_credentials() {
    let dir = TempDir::new().unwrap();
    let output = gitpulse(&dir).arg("repos").output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[gp_test_utils::logged_test]
fn zero_day_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    gitpulse(&dir).args(["repos", "--days", "0"]).assert().failure();
}

#[gp_test_utils::logged_test]
fn unrepresentable_window_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let output = gitpulse(&dir)
        .env("GITPULSE_PROVIDER__ORGANIZATION_ID", "org-1")
        .env("GITPULSE_PROVIDER__ACCESS_TOKEN", "pt-test")
        .env("GITPULSE_PROVIDER__BASE_URL", "http://127.0.0.1:9")
        .args(["repos", "--days", "4000000000"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("earliest representable date"));
}
