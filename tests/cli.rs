use assert_cmd::Command;
use predicates::str::contains;

const BINARY_NAME: &str = "projectdash";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Unknown subcommands should be rejected with an error.
fn cli_rejects_unknown_subcommands() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("frobnicate");
    cmd.assert().failure();
}

#[test]
#[ignore] // Issues a real request against the local host environment.
fn fetch_against_an_unreachable_host_prints_the_reset_snapshot() {
    // Load failure is non-fatal: the command still prints the empty
    // defaults and exits cleanly.
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("fetch").arg("--environment").arg("local");
    cmd.assert()
        .success()
        .stdout(contains("total_projects: 0"))
        .stdout(contains("Projects (0):"));
}
