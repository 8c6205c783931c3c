//! End-to-end tests of the `tern` binary.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn tern(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tern"))
        .args(args)
        .env_remove("TERN_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tern")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

const FACT: &str = "; factorial\n\
                    (define (fact x)\n  (if (== x 0) 1 (* x (fact (- x 1)))))\n\
                    (fact 6)\n";

#[test]
fn run_single_file_prints_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "fact.tern", FACT);
    let output = tern(&["run", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "720\n");
}

#[test]
fn run_many_files_prints_paths_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.tern", "(< 1 2)");
    let b = write(&dir, "b.tern", "(- 1 2)");
    let (a, b) = (a.to_str().unwrap(), b.to_str().unwrap());
    let output = tern(&["run", a, b]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), format!("{a}: true\n{b}: -1\n"));
}

#[test]
fn run_reports_evaluation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.tern", "(if 45 1 2)");
    let output = tern(&["run", "--no-parallel", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: type error: expected boolean, found integer `45`\n"
    );
}

#[test]
fn run_reports_parse_error_with_excerpt() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "broken.tern", "(define (f x x) x)\n(f 1)\n");
    let output = tern(&["run", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("parameter `x` appears more than once in `f`"), "{err}");
    assert!(err.contains("(define (f x x) x)"), "{err}");
}

#[test]
fn run_applies_depth_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "spin.tern", "(define (spin) (spin)) (spin)");
    let output = tern(&["run", "--max-depth=50", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: maximum call depth exceeded (limit: 50)\n"
    );
}

#[test]
fn eval_from_command_line() {
    let output = tern(&["eval", "(let x 3 (* x x))"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "9\n");
}

#[test]
fn eval_with_budget() {
    let output = tern(&["eval", "--budget=3", &FACT.replace("(fact 6)", "(fact 3)")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: call budget exhausted (budget: 3 calls)\n"
    );
}

#[test]
fn parse_prints_surface_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "fact.tern", FACT);
    let output = tern(&["parse", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "fact(x) = (==(x, 0) ? 1 : *(x, fact(-(x, 1))))\nfact(6)\n"
    );
}

#[test]
fn bad_option_is_rejected() {
    let output = tern(&["run", "--budget=lots", "x.tern"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid value `lots` for `--budget`"));
}

#[test]
fn unknown_command_fails() {
    let output = tern(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown command `frobnicate`"));
}

#[test]
fn no_arguments_prints_usage() {
    let output = tern(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage: tern <command>"));
}
