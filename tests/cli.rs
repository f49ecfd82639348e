//! Integration tests for the `kb-color` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("kb-color")
}

#[test]
fn list_prints_colors() {
    cli()
        .arg("--list")
        .assert()
        .success()
        .stdout("red\ngreen\nyellow\nblue\norange\npurple\nwhite\n");
}

#[test]
fn no_arguments_prints_usage() {
    cli().assert().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_succeeds() {
    cli().arg("--help").assert().success().stdout(predicate::str::contains("--brightness"));
}

#[test]
fn help_lists_colors() {
    cli().arg("--help").assert().success().stdout(
        predicate::str::contains("possible values: red")
            .and(predicate::str::contains("purple"))
            .and(predicate::str::contains("white")),
    );
}

#[test]
fn unknown_option_is_named() {
    cli().arg("--bogus").assert().code(1).stderr(predicate::str::contains("--bogus"));
}

#[test]
fn unknown_color_is_rejected() {
    cli()
        .args(["--color", "pink"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value 'pink'"));
}

#[test]
fn color_names_are_case_sensitive() {
    cli().args(["-c", "Red"]).assert().code(1);
}

#[test]
fn brightness_out_of_range_is_rejected() {
    cli()
        .args(["--brightness", "101"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Brightness must be 0-100"));
}

#[test]
fn missing_brightness_value_is_rejected() {
    cli().arg("-b").assert().code(1);
}

#[test]
fn list_conflicts_with_setting() {
    cli().args(["--list", "-c", "red"]).assert().code(1);
}

// Assumes the test host has no Aorus 15P keyboard attached.
#[test]
fn device_failure_keeps_state() {
    let config = TempDir::new().unwrap();

    cli()
        .args(["-c", "red", "-b", "40"])
        .env("XDG_CONFIG_HOME", config.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed. Try running as root or check udev rules."));

    assert!(!config.path().join("kb-color").join("state").exists());
}
