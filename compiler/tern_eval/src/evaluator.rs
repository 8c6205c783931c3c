//! The tree-walking evaluator.
//!
//! An [`Evaluator`] holds two environments fixed at construction: the
//! definitions (function name to [`Definition`]) and the base variables.
//! Every user call evaluates its body in the base variables extended with
//! the parameters, never in the caller's environment, so a callee sees the
//! base bindings and its own parameters and nothing else.
//!
//! # Call resolution
//!
//! 1. Arguments are evaluated left to right in the caller's environment.
//! 2. A primitive with the callee's name wins, even over a definition.
//! 3. Otherwise the newest definition with that name, or `UndefinedFunction`.
//! 4. Parameter count must equal argument count, or `ArityMismatch`.
//! 5. Limits are checked, then the body runs.

mod builder;

use std::sync::Arc;

use smallvec::SmallVec;
use tern_ir::{Definition, Expr, Name, Program};
use tern_stack::ensure_sufficient_stack;

use crate::errors::{arity_mismatch, undefined_function, undefined_variable, EvalResult};
use crate::limits::CallTracker;
use crate::{Environment, EvalLimits, PrimitiveTable, Value};

pub use builder::EvaluatorBuilder;

/// Evaluated call arguments; most calls take at most four.
type Arguments = SmallVec<[Value; 4]>;

/// Evaluates expressions against fixed definitions and base variables.
///
/// Immutable once built: one evaluator can serve any number of `eval`
/// calls, from any number of threads.
#[derive(Clone, Debug)]
pub struct Evaluator {
    definitions: Environment<Definition>,
    variables: Environment<Value>,
    primitives: Arc<PrimitiveTable>,
    limits: EvalLimits,
}

impl Evaluator {
    /// An evaluator over the standard primitives with no limits.
    pub fn new(definitions: Environment<Definition>, variables: Environment<Value>) -> Self {
        Evaluator {
            definitions,
            variables,
            primitives: PrimitiveTable::shared(),
            limits: EvalLimits::UNLIMITED,
        }
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// Evaluate `expr` in the base variables.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = expr.node_count()))]
    pub fn eval(&self, expr: &Expr) -> EvalResult {
        let machine = Machine {
            definitions: &self.definitions,
            base: &self.variables,
            primitives: &self.primitives,
            tracker: CallTracker::start(self.limits),
        };
        let result = machine.eval(expr, &self.variables);
        tracing::debug!(calls = machine.tracker.calls(), ?result, "evaluation finished");
        result
    }

    pub fn definitions(&self) -> &Environment<Definition> {
        &self.definitions
    }

    pub fn variables(&self) -> &Environment<Value> {
        &self.variables
    }

    pub fn primitives(&self) -> &PrimitiveTable {
        &self.primitives
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }
}

/// Evaluate a whole program with no variables in scope and no limits.
pub fn evaluate(program: Program) -> EvalResult {
    evaluate_with(program, EvalLimits::UNLIMITED)
}

/// Evaluate a whole program with no variables in scope under `limits`.
#[tracing::instrument(level = "debug", skip_all, fields(definitions = program.definitions.len()))]
pub fn evaluate_with(program: Program, limits: EvalLimits) -> EvalResult {
    let Program {
        definitions,
        expression,
    } = program;
    Evaluator::builder()
        .definitions(definitions)
        .limits(limits)
        .build()
        .eval(&expression)
}

/// State of one `Evaluator::eval` call.
struct Machine<'e> {
    definitions: &'e Environment<Definition>,
    base: &'e Environment<Value>,
    primitives: &'e PrimitiveTable,
    tracker: CallTracker,
}

impl Machine<'_> {
    fn eval(&self, expr: &Expr, env: &Environment<Value>) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, env))
    }

    fn eval_inner(&self, expr: &Expr, env: &Environment<Value>) -> EvalResult {
        match expr {
            Expr::Int(value) => Ok(Value::Int(*value)),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Var(name) => env
                .lookup(name)
                .copied()
                .ok_or_else(|| undefined_variable(name)),
            Expr::And(left, right) => {
                if !self.eval(left, env)?.as_boolean()? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right, env)?.as_boolean()?))
            }
            Expr::Or(left, right) => {
                if self.eval(left, env)?.as_boolean()? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right, env)?.as_boolean()?))
            }
            Expr::If {
                condition,
                consequent,
                alternative,
            } => {
                let branch = if self.eval(condition, env)?.as_boolean()? {
                    consequent
                } else {
                    alternative
                };
                self.eval(branch, env)
            }
            Expr::Let { name, rhs, body } => {
                let value = self.eval(rhs, env)?;
                self.eval(body, &env.extend(name.clone(), value))
            }
            Expr::Call {
                function,
                arguments,
            } => self.call(function, arguments, env),
        }
    }

    fn call(&self, function: &Name, arguments: &[Expr], env: &Environment<Value>) -> EvalResult {
        let values = arguments
            .iter()
            .map(|argument| self.eval(argument, env))
            .collect::<EvalResult<Arguments>>()?;

        if let Some(primitive) = self.primitives.get(function) {
            return primitive.apply(&values);
        }

        let definition = self
            .definitions
            .lookup(function)
            .ok_or_else(|| undefined_function(function))?;
        if definition.arity() != values.len() {
            return Err(arity_mismatch(
                function.clone(),
                definition.arity(),
                values.len(),
            ));
        }

        let _call = self.tracker.enter()?;
        self.call_definition(definition, &values)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = %definition.name, depth = self.tracker.depth())
    )]
    fn call_definition(&self, definition: &Definition, arguments: &[Value]) -> EvalResult {
        tracing::trace!(
            ?arguments,
            remaining_stack = ?tern_stack::remaining_stack(),
            "enter"
        );
        let env = definition
            .parameters
            .iter()
            .zip(arguments)
            .fold(self.base.clone(), |env, (parameter, value)| {
                env.extend(parameter.clone(), *value)
            });
        let result = self.eval(&definition.body, &env);
        tracing::trace!(?result, "return");
        result
    }
}
