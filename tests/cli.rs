//

use assert_cmd::Command;
use predicates::prelude::*;

fn handoff() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("handoff").unwrap()
}

#[test]
fn test_example_total() {
    handoff()
        .args(&["2", "0"])
        .write_stdin("3 1 4 1 5\n")
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_empty_input_prints_zero() {
    handoff()
        .args(&["3", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_more_consumers_than_values() {
    handoff()
        .args(&["5", "0"])
        .write_stdin("7")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_malformed_token_ends_input() {
    handoff()
        .args(&["2", "0"])
        .write_stdin("10 20 oops 30\n")
        .assert()
        .success()
        .stdout("30\n");
}

#[test]
fn test_debug_trace_on_stderr() {
    handoff()
        .args(&["1", "0", "debug"])
        .write_stdin("3 1 4\n")
        .assert()
        .success()
        .stdout("8\n")
        .stderr(predicate::str::is_match(r"\(\d+, 3\)\n\(\d+, 4\)\n\(\d+, 8\)\n").unwrap());
}

#[test]
fn test_too_few_arguments() {
    handoff().arg("2").assert().code(1).stdout("");
    handoff().assert().code(1).stdout("");
}

#[test]
fn test_too_many_arguments() {
    handoff()
        .args(&["2", "0", "debug", "extra"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn test_help_and_version_are_argument_errors() {
    handoff().arg("--help").assert().code(1);
    handoff().arg("--version").assert().code(1);
}

#[test]
fn test_zero_consumers_rejected() {
    handoff()
        .args(&["0", "0"])
        .write_stdin("1 2 3")
        .assert()
        .code(1)
        .stdout("");
}
