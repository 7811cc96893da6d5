//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn typecfg() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("typecfg"));
    cmd.env_remove("TYPECFG_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn fixture(dir: &Path) {
    fs::write(
        dir.join("config.cfg"),
        "use \"shared.cfg\"\n\
         string HOST = \"example.com\"\n\
         string URL = \"http://$HOST/path\"\n\
         int PORT = 8080\n\
         char SEP = '\\t'\n",
    )
    .expect("write");
    fs::write(dir.join("shared.cfg"), "string HOST = \"localhost\"\nbool FAST = true\n")
        .expect("write");
}

#[test]
fn test_cli_version() {
    let mut cmd = typecfg();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("typecfg"));
}

#[test]
fn test_cli_help() {
    let mut cmd = typecfg();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("typed configuration files"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_get_uses_default_file_in_current_dir() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["get", "URL"]);
    cmd.assert().success().stdout("http://example.com/path\n");
}

#[test]
fn test_get_from_env_config() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.env("TYPECFG_CONFIG", tmp.path().join("config.cfg")).args(["get", "PORT"]);
    cmd.assert().success().stdout("8080\n");
}

#[test]
fn test_get_with_type_mismatch_fails() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["get", "PORT", "--type", "string"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("looked for string, but found int"));
}

#[test]
fn test_get_missing_variable_fails() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["get", "NOPE"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not find configuration variable NOPE"));
}

#[test]
fn test_defines_and_added_files_override() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());
    fs::write(tmp.path().join("local.cfg"), "int PORT = 9090\n").expect("write");

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["--add-config", "local.cfg", "get", "PORT"]);
    cmd.assert().success().stdout("9090\n");

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args([
        "--add-config",
        "local.cfg",
        "-D",
        "PORT",
        "int",
        "-1",
        "get",
        "PORT",
    ]);
    cmd.assert().success().stdout("-1\n");
}

#[test]
fn test_define_with_attached_name() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["-DPORT", "int", "5", "get", "PORT"]);
    cmd.assert().success().stdout("5\n");
}

#[test]
fn test_define_with_bad_value_fails() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["-D", "PORT", "int", "eighty", "get", "PORT"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "user-set configuration variable PORT: invalid value format",
    ));
}

#[test]
fn test_dump_lines_are_sorted() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).arg("dump");
    cmd.assert().success().stdout(
        "bool FAST = true\n\
         string HOST = \"example.com\"\n\
         int PORT = 8080\n\
         char SEP = '\\t'\n\
         string URL = \"http://$HOST/path\"\n",
    );
}

#[test]
fn test_dump_json_expanded() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let output = typecfg()
        .current_dir(tmp.path())
        .args(["dump", "--json", "--expand"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["URL"]["type"], "string");
    assert_eq!(json["URL"]["value"], "http://example.com/path");
    assert_eq!(json["PORT"]["type"], "int");
    assert_eq!(json["PORT"]["value"], 8080);
    assert_eq!(json["FAST"]["value"], true);
}

#[test]
fn test_check_reports_redefinitions() {
    let tmp = TempDir::new().expect("tmp");
    fixture(tmp.path());

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).arg("check");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("configuration variable HOST is already bound"))
        .stdout(predicate::str::contains("5 entries, 1 warnings"));
}

#[test]
fn test_missing_config_file_fails() {
    let tmp = TempDir::new().expect("tmp");

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).args(["--use-config", "absent.cfg", "check"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not find configuration file absent.cfg"));
}

#[test]
fn test_syntax_error_reports_line() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.cfg"), "int A = 1\nint B 2\n").expect("write");

    let mut cmd = typecfg();
    cmd.current_dir(tmp.path()).arg("check");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config.cfg at line 2: unexpected end of line"));
}
