//! Rendering failures for the terminal.
//!
//! Parse failures carry a span and are shown as an annotated source excerpt.
//! Evaluation failures have no location and are shown as a single
//! `error: <message>` line.

use ariadne::{Config, Label, Report, ReportKind, Source};
use tern_parse::ParseError;

use crate::RunError;

/// Render `error` for the program `source` read from `origin`.
pub fn render_error(origin: &str, source: &str, error: &RunError) -> String {
    match error {
        RunError::Parse(error) => render_parse_error(origin, source, error),
        RunError::Eval(error) => format!("error: {error}\n"),
    }
}

/// Annotated excerpt of `source` underlining the error's span. Never colored,
/// so output is the same on every terminal.
pub fn render_parse_error(origin: &str, source: &str, error: &ParseError) -> String {
    let range = clamp(error.span().to_range(), source.len());
    let message = error.to_string();

    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, origin, range.start)
        .with_config(Config::default().with_color(false))
        .with_message(&message)
        .with_label(Label::new((origin, range)).with_message(&message))
        .finish()
        .write((origin, Source::from(source.to_string())), &mut out);

    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("error: {message}\n"),
    }
}

/// Keep a span inside the source so end-of-input spans still render.
fn clamp(range: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = range.start.min(len);
    start..range.end.clamp(start, len)
}
