use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("clipscribe")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("languages"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn languages_lists_translation_targets() {
    Command::cargo_bin("clipscribe")
        .unwrap()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("es"))
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("ja"));
}

#[test]
fn process_requires_a_url() {
    Command::cargo_bin("clipscribe")
        .unwrap()
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn process_rejects_unknown_target_language() {
    Command::cargo_bin("clipscribe")
        .unwrap()
        .args(["process", "https://youtu.be/abc123", "--translate-to", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
