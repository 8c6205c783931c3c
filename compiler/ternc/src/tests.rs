#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;
use std::time::Duration;

use super::*;
use pretty_assertions::assert_eq;
use tern_eval::EvalLimits;

fn write_program(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    path
}

#[test]
fn test_evaluate_source() {
    assert_eq!(evaluate_source("(+ 1 2)"), Ok(Value::Int(3)));
}

#[test]
fn test_evaluate_source_deeply_nested() {
    let depth = 200_000;
    let source = format!("{}true{}", "(not ".repeat(depth), ")".repeat(depth));
    assert_eq!(evaluate_source(&source), Ok(Value::Bool(true)));
    let odd = format!("(not {source})");
    assert_eq!(evaluate_source(&odd), Ok(Value::Bool(false)));
}

#[test]
fn test_evaluate_source_wraps_both_error_families() {
    assert!(matches!(evaluate_source("(+ 1"), Err(RunError::Parse(_))));
    assert_eq!(
        evaluate_source("(mod 1 0)"),
        Err(RunError::Eval(EvalError::ModuloByZero))
    );
}

#[test]
fn test_evaluate_source_with_limits() {
    let config = RunConfig {
        limits: EvalLimits::default().with_max_call_depth(10),
        parallel: false,
    };
    assert_eq!(
        evaluate_source_with("(define (f) (f)) (f)", &config),
        Err(RunError::Eval(EvalError::RecursionLimitExceeded { limit: 10 }))
    );
    let config = RunConfig {
        limits: EvalLimits::default().with_timeout(Duration::from_secs(30)),
        parallel: false,
    };
    assert_eq!(
        evaluate_source_with("(define (f x) (* x 2)) (f 21)", &config),
        Ok(Value::Int(42))
    );
}

#[test]
fn test_run_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_file(&dir.path().join("absent.tern"), &RunConfig::default()).unwrap_err();
    assert!(matches!(err, FileError::Io { .. }));
    assert!(err.render().starts_with("error: cannot read"));
}

#[test]
fn test_run_files_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| write_program(&dir, &format!("p{i}.tern"), &format!("(* {i} {i})")))
        .collect();

    for parallel in [true, false] {
        let config = RunConfig {
            parallel,
            ..RunConfig::default()
        };
        let values: Vec<Value> = run_files(&paths, &config)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        let expected: Vec<Value> = (0..8).map(|i| Value::Int(i * i)).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn test_run_files_reports_each_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_program(&dir, "good.tern", "(not false)");
    let bad = write_program(&dir, "bad.tern", "(/ 1 0)");
    let results = run_files(&[good, bad], &RunConfig::default());
    assert_eq!(results[0].as_ref().unwrap(), &Value::Bool(true));
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.render(), "error: division by zero\n");
}
