//! Runtime values.

use std::fmt;

use crate::errors::{type_error, EvalResult};

/// A runtime value. Compared structurally; there is no identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

/// The kind of a [`Value`], as named in type errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Boolean,
}

impl Value {
    #[inline]
    pub fn kind(self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Integer,
            Value::Bool(_) => ValueKind::Boolean,
        }
    }

    /// Narrow to an integer. No coercion: a boolean is a type error.
    #[inline]
    pub fn as_integer(self) -> EvalResult<i64> {
        match self {
            Value::Int(value) => Ok(value),
            Value::Bool(_) => Err(type_error(ValueKind::Integer, self)),
        }
    }

    /// Narrow to a boolean. No coercion: an integer is a type error.
    #[inline]
    pub fn as_boolean(self) -> EvalResult<bool> {
        match self {
            Value::Bool(value) => Ok(value),
            Value::Int(_) => Err(type_error(ValueKind::Boolean, self)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
        })
    }
}
