//! Tern front end.
//!
//! Turns source text into the AST defined in `tern_ir`. Three stages:
//!
//! - [`read`]: tokens to s-expressions (`reader`)
//! - [`parse_expression`] / [`parse_program`]: s-expressions to `Expr` /
//!   `Program` (`lower`)
//! - [`parse_surface`]: the infix rendering produced by `Display` back to an
//!   `Expr` (`surface`), so that rendering round-trips
//!
//! # Program format
//!
//! ```text
//! ; factorial
//! (define (fact x)
//!   (if (== x 0) 1 (* x (fact (- x 1)))))
//! (fact 6)
//! ```
//!
//! Any number of `define` forms, in any order, and exactly one other form:
//! the expression to evaluate.

mod error;
mod lower;
mod reader;
mod surface;

pub use error::ParseError;
pub use lower::{lower_expr, lower_program, RESERVED_WORDS};
pub use reader::{read, Sexp, SexpKind};
pub use surface::parse_surface;

use tern_ir::{Expr, Program, Span};

/// Parse source text holding exactly one s-expression into an `Expr`.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    let forms = read(source)?;
    match forms.as_slice() {
        [form] => lower_expr(form),
        [] => Err(ParseError::MissingExpression {
            span: end_of(source),
        }),
        [_, extra, ..] => Err(ParseError::ExtraExpression { span: extra.span }),
    }
}

/// Parse a whole program: `define` forms plus one entry expression.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let forms = read(source)?;
    lower_program(&forms, end_of(source))
}

/// Point span at the end of `source`, for errors about missing input.
fn end_of(source: &str) -> Span {
    Span::point(u32::try_from(source.len()).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests;
