#![deny(clippy::arithmetic_side_effects)]
//! Tern Eval - tree-walking evaluator for Tern programs.
//!
//! # Architecture
//!
//! - [`Value`]: integers and booleans, narrowed explicitly, never coerced
//! - [`Environment`]: persistent, shareable `name -> T` bindings
//! - [`PrimitiveTable`]: the built-in operators, shared read-only
//! - [`Evaluator`]: walks an `Expr` against fixed definitions and base
//!   variables, under optional [`EvalLimits`]
//! - [`EvalError`]: every way an evaluation can fail
//!
//! ```text
//! let program = tern_parse::parse_program("(define (sq x) (* x x)) (sq 7)")?;
//! assert_eq!(tern_eval::evaluate(program)?, Value::Int(49));
//! ```

mod environment;
pub mod errors;
mod evaluator;
mod limits;
mod primitives;
mod value;

pub use environment::{Environment, Iter};
pub use errors::{EvalError, EvalResult};
pub use evaluator::{evaluate, evaluate_with, Evaluator, EvaluatorBuilder};
pub use limits::EvalLimits;
pub use primitives::{Primitive, PrimitiveFn, PrimitiveTable};
pub use value::{Value, ValueKind};
