use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bbscope(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bbscope").unwrap();
    cmd.env("BBSCOPE_PATH", data_dir);
    cmd
}

#[test]
fn help_mentions_every_subcommand() {
    let mut cmd = Command::cargo_bin("bbscope").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("poll"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("changes"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("ignore"));
}

#[test]
fn stats_on_a_fresh_store_is_all_zero() {
    // assert_cmd captures stdout through a pipe, so `Output` always falls
    // back to its non-TTY branch here: newline-delimited JSON.
    let dir = TempDir::new().unwrap();
    bbscope(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active_programs\":0"));
}

#[test]
fn list_on_a_fresh_store_prints_nothing() {
    let dir = TempDir::new().unwrap();
    bbscope(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn ignore_on_a_fresh_store_matches_nothing() {
    let dir = TempDir::new().unwrap();
    bbscope(dir.path())
        .args(["ignore", "nothing-matches-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored 0 program(s)"));
}

#[test]
fn no_subcommand_prints_help_and_succeeds() {
    let dir = TempDir::new().unwrap();
    bbscope(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bbscope"));
}
