//! Tern driver.
//!
//! Glue between the front end (`tern_parse`) and the evaluator
//! (`tern_eval`), used by the `tern` binary and by embedders that start from
//! source text:
//!
//! ```text
//! assert_eq!(ternc::evaluate_source("(+ 1 2)")?, Value::Int(3));
//! ```

mod config;
mod diagnostic;
mod logging;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tern_eval::{EvalError, Value};
use tern_parse::ParseError;
use thiserror::Error;

pub use config::{ConfigError, RunConfig};
pub use diagnostic::{render_error, render_parse_error};
pub use logging::init_tracing;

/// Failure to evaluate source text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Parse a program and evaluate it with no limits.
pub fn evaluate_source(source: &str) -> Result<Value, RunError> {
    evaluate_source_with(source, &RunConfig::default())
}

/// Parse a program and evaluate it under `config`'s limits.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn evaluate_source_with(source: &str, config: &RunConfig) -> Result<Value, RunError> {
    let program = tern_parse::parse_program(source)?;
    tracing::debug!(definitions = program.definitions.len(), "parsed");
    Ok(tern_eval::evaluate_with(program, config.limits)?)
}

/// Failure to run one file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{error}")]
    Run {
        path: PathBuf,
        text: String,
        error: RunError,
    },
}

impl FileError {
    /// Terminal rendering, with a source excerpt for parse failures.
    pub fn render(&self) -> String {
        match self {
            FileError::Io { .. } => format!("error: {self}\n"),
            FileError::Run { path, text, error } => {
                render_error(&path.display().to_string(), text, error)
            }
        }
    }
}

/// Read and evaluate one program file.
pub fn run_file(path: &Path, config: &RunConfig) -> Result<Value, FileError> {
    let text = std::fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    evaluate_source_with(&text, config).map_err(|error| FileError::Run {
        path: path.to_path_buf(),
        text,
        error,
    })
}

/// Run every file, in parallel unless `config.parallel` is off. Results come
/// back in the order of `paths`.
pub fn run_files(paths: &[PathBuf], config: &RunConfig) -> Vec<Result<Value, FileError>> {
    if !config.parallel || paths.len() < 2 {
        return paths.iter().map(|path| run_file(path, config)).collect();
    }

    // Deep programs grow their stack on demand; a larger initial stack
    // makes that rarer on worker threads.
    rayon::ThreadPoolBuilder::new()
        .stack_size(16 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                paths
                    .par_iter()
                    .map(|path| run_file(path, config))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            paths.iter().map(|path| run_file(path, config)).collect()
        })
}

#[cfg(test)]
mod tests;
