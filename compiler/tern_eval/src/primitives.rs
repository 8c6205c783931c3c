//! Built-in operators.
//!
//! The table is built once and shared read-only by every evaluator. Each
//! entry checks its argument count before narrowing any argument, so a call
//! with the wrong number of arguments reports `ArityMismatch` even when the
//! arguments are also of the wrong kind.
//!
//! Integer arithmetic is checked: overflow is an error, never a wrap.

use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, division_by_zero, integer_overflow, modulo_by_zero, EvalResult};
use crate::Value;

/// Implementation of a primitive, by arity.
#[derive(Clone, Copy)]
pub enum PrimitiveFn {
    Unary(fn(Value) -> EvalResult),
    Binary(fn(Value, Value) -> EvalResult),
}

impl PrimitiveFn {
    pub const fn arity(self) -> usize {
        match self {
            PrimitiveFn::Unary(_) => 1,
            PrimitiveFn::Binary(_) => 2,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    apply: PrimitiveFn,
}

impl Primitive {
    pub const fn new(name: &'static str, apply: PrimitiveFn) -> Self {
        Primitive { name, apply }
    }

    pub const fn unary(name: &'static str, apply: fn(Value) -> EvalResult) -> Self {
        Self::new(name, PrimitiveFn::Unary(apply))
    }

    pub const fn binary(name: &'static str, apply: fn(Value, Value) -> EvalResult) -> Self {
        Self::new(name, PrimitiveFn::Binary(apply))
    }

    pub const fn arity(&self) -> usize {
        self.apply.arity()
    }

    /// Check the argument count, then apply.
    pub fn apply(&self, arguments: &[Value]) -> EvalResult {
        match (self.apply, arguments) {
            (PrimitiveFn::Unary(apply), &[a]) => {
                tracing::trace!(primitive = self.name, ?a, "apply primitive");
                apply(a)
            }
            (PrimitiveFn::Binary(apply), &[a, b]) => {
                tracing::trace!(primitive = self.name, ?a, ?b, "apply primitive");
                apply(a, b)
            }
            _ => Err(arity_mismatch(self.name, self.arity(), arguments.len())),
        }
    }
}

impl std::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// Read-only `name -> Primitive` table.
#[derive(Clone, Debug)]
pub struct PrimitiveTable {
    entries: FxHashMap<&'static str, Primitive>,
}

impl PrimitiveTable {
    /// An empty table. Useful only for tests and embedders that supply
    /// every operator themselves.
    pub fn empty() -> Self {
        PrimitiveTable {
            entries: FxHashMap::default(),
        }
    }

    /// The standard operators: `+ - * / mod == != < <= > >= not`.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for primitive in STANDARD {
            table.insert(primitive);
        }
        table
    }

    /// The standard table, built on first use and shared thereafter.
    pub fn shared() -> Arc<PrimitiveTable> {
        static SHARED: LazyLock<Arc<PrimitiveTable>> =
            LazyLock::new(|| Arc::new(PrimitiveTable::standard()));
        Arc::clone(&SHARED)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, primitive: Primitive) {
        self.entries.insert(primitive.name, primitive);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Primitive> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::standard()
    }
}

const STANDARD: [Primitive; 12] = [
    Primitive::binary("+", add),
    Primitive::binary("-", sub),
    Primitive::binary("*", mul),
    Primitive::binary("/", div),
    Primitive::binary("mod", rem),
    Primitive::binary("==", eq),
    Primitive::binary("!=", ne),
    Primitive::binary("<", lt),
    Primitive::binary("<=", le),
    Primitive::binary(">", gt),
    Primitive::binary(">=", ge),
    Primitive::unary("not", not),
];

/// Both operands of a binary integer primitive, narrowed left to right.
#[inline]
fn ints(a: Value, b: Value) -> EvalResult<(i64, i64)> {
    Ok((a.as_integer()?, b.as_integer()?))
}

#[inline]
fn checked(result: Option<i64>, operator: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(operator))
}

fn add(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    checked(a.checked_add(b), "+")
}

fn sub(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    checked(a.checked_sub(b), "-")
}

fn mul(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    checked(a.checked_mul(b), "*")
}

/// Truncates toward zero.
fn div(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    if b == 0 {
        return Err(division_by_zero());
    }
    checked(a.checked_div(b), "/")
}

/// Result takes the sign of the dividend.
fn rem(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    if b == 0 {
        return Err(modulo_by_zero());
    }
    checked(a.checked_rem(b), "mod")
}

fn eq(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a == b))
}

fn ne(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a != b))
}

fn lt(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a < b))
}

fn le(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a <= b))
}

fn gt(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a > b))
}

fn ge(a: Value, b: Value) -> EvalResult {
    let (a, b) = ints(a, b)?;
    Ok(Value::Bool(a >= b))
}

fn not(a: Value) -> EvalResult {
    Ok(Value::Bool(!a.as_boolean()?))
}
