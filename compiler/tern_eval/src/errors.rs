//! Evaluation errors.
//!
//! Every failure aborts the whole evaluation and reaches the caller
//! unchanged. Constructors are `#[cold]` so the happy path stays tight.

use std::time::Duration;

use tern_ir::Name;
use thiserror::Error;

use crate::value::{Value, ValueKind};

pub type EvalResult<T = Value> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("type error: expected {expected}, found {} `{actual}`", .actual.kind())]
    TypeError { expected: ValueKind, actual: Value },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: Name },

    #[error("undefined function `{name}`")]
    UndefinedFunction { name: Name },

    #[error("`{name}` expects {expected} {}, got {actual}", arguments_word(.expected))]
    ArityMismatch {
        name: Name,
        expected: usize,
        actual: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("integer overflow in `{operator}`")]
    IntegerOverflow { operator: &'static str },

    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: usize },

    #[error("call budget exhausted (budget: {budget} calls)")]
    CallBudgetExceeded { budget: u64 },

    #[error("evaluation exceeded its deadline of {timeout:?}")]
    DeadlineExceeded { timeout: Duration },
}

#[allow(clippy::trivially_copy_pass_by_ref, reason = "thiserror passes fields by reference")]
fn arguments_word(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

#[cold]
pub fn type_error(expected: ValueKind, actual: Value) -> EvalError {
    EvalError::TypeError { expected, actual }
}

#[cold]
pub fn undefined_variable(name: &Name) -> EvalError {
    EvalError::UndefinedVariable { name: name.clone() }
}

#[cold]
pub fn undefined_function(name: &Name) -> EvalError {
    EvalError::UndefinedFunction { name: name.clone() }
}

#[cold]
pub fn arity_mismatch(name: impl Into<Name>, expected: usize, actual: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: name.into(),
        expected,
        actual,
    }
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::ModuloByZero
}

#[cold]
pub fn integer_overflow(operator: &'static str) -> EvalError {
    EvalError::IntegerOverflow { operator }
}
