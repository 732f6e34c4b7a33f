//! Integration tests for the Sherlock CLI.
//!
//! These exercise the binary end-to-end using `assert_cmd`. Passphrases
//! come from `SHERLOCK_PASSPHRASE` and secret values from piped stdin, so
//! no test needs a terminal.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const KEY: &str = "correct-passphrase";

/// Helper: a `sherlock` command rooted in `root` with `KEY` as passphrase.
fn sherlock(root: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sherlock").expect("binary should exist");
    cmd.env("SHERLOCK_ROOT", root.path())
        .env("SHERLOCK_PASSPHRASE", KEY)
        .env_remove("SHERLOCK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: root with `setup` done and an empty `team` group.
fn with_team() -> TempDir {
    let root = TempDir::new().unwrap();
    sherlock(&root).arg("setup").assert().success();
    sherlock(&root)
        .args(["add", "group", "team", "--insecure"])
        .assert()
        .success();
    root
}

#[test]
fn help_flag_shows_usage() {
    #[allow(deprecated)]
    Command::cargo_bin("sherlock")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("del"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("update"));
}

#[test]
fn commands_require_setup() {
    let root = TempDir::new().unwrap();
    sherlock(&root)
        .args(["list", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sherlock setup"));
}

#[test]
fn setup_creates_default_vault_and_is_idempotent() {
    let root = TempDir::new().unwrap();
    sherlock(&root).arg("setup").assert().success();
    root.child("groups/default/.vault")
        .assert(predicate::path::is_file());

    sherlock(&root)
        .arg("setup")
        .assert()
        .success()
        .stdout(predicate::str::contains("already set up"));
}

#[test]
fn add_get_and_delete_account() {
    let root = with_team();

    sherlock(&root)
        .args(["add", "account", "team@svc", "--tag", "prod"])
        .write_stdin("S3cr3t!9$\n")
        .assert()
        .success();

    sherlock(&root)
        .args(["get", "team@svc", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S3cr3t!9$"))
        .stdout(predicate::str::contains("prod"));

    sherlock(&root)
        .args(["del", "account", "team@svc", "--force"])
        .assert()
        .success();

    sherlock(&root)
        .args(["get", "team@svc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn wrong_passphrase_is_reported() {
    let root = with_team();
    sherlock(&root)
        .args(["add", "account", "team@svc"])
        .write_stdin("S3cr3t!9$\n")
        .assert()
        .success();

    sherlock(&root)
        .env("SHERLOCK_PASSPHRASE", "wrong-passphrase")
        .args(["get", "team@svc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong group key"));
}

#[test]
fn weak_password_needs_insecure() {
    let root = with_team();
    sherlock(&root)
        .args(["add", "account", "team@weak"])
        .write_stdin("abcdefghij\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("insecure"));

    sherlock(&root)
        .args(["add", "account", "team@weak", "--insecure"])
        .write_stdin("abcdefghij\n")
        .assert()
        .success();
}

#[test]
fn generated_password_is_stored() {
    let root = with_team();
    sherlock(&root)
        .args(["add", "account", "team@gen", "--gen", "24"])
        .assert()
        .success();

    sherlock(&root)
        .args(["list", "team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gen"));
}

#[test]
fn malformed_query_is_rejected() {
    let root = with_team();
    sherlock(&root)
        .args(["get", "teamsvc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("group@account"));
}

#[test]
fn list_all_and_tag_filter() {
    let root = with_team();
    sherlock(&root)
        .args(["add", "account", "team@api", "--tag", "prod"])
        .write_stdin("fsdf$35dfg0-43563sdf34\n")
        .assert()
        .success();
    sherlock(&root)
        .args(["add", "account", "team@ci", "--tag", "build"])
        .write_stdin("fsdf$35dfg0-43563sdf34\n")
        .assert()
        .success();

    sherlock(&root)
        .args(["list", "--all"])
        .env_remove("SHERLOCK_PASSPHRASE")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("team"));

    sherlock(&root)
        .args(["list", "team", "--tag", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("ci").not());
}

#[test]
fn update_name_and_tag_from_stdin() {
    let root = with_team();
    sherlock(&root)
        .args(["add", "account", "team@old"])
        .write_stdin("S3cr3t!9$\n")
        .assert()
        .success();

    sherlock(&root)
        .args(["update", "name", "team@old"])
        .write_stdin("renamed\n")
        .assert()
        .success();
    sherlock(&root)
        .args(["update", "tag", "team@renamed"])
        .write_stdin("staging\n")
        .assert()
        .success();

    sherlock(&root)
        .args(["get", "team@renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging"));
}

#[test]
fn completions_work_without_setup() {
    let root = TempDir::new().unwrap();
    sherlock(&root)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sherlock"));
}
