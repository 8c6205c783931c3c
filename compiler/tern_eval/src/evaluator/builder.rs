//! `EvaluatorBuilder` for evaluators with non-default primitives or limits.

use std::sync::Arc;

use tern_ir::{Definition, Name};

use super::Evaluator;
use crate::{Environment, EvalLimits, PrimitiveTable, Value};

/// Builder for [`Evaluator`].
///
/// Unset parts default to: no definitions, no variables, the shared standard
/// primitive table, no limits.
#[derive(Default)]
pub struct EvaluatorBuilder {
    definitions: Option<Environment<Definition>>,
    variables: Option<Environment<Value>>,
    primitives: Option<Arc<PrimitiveTable>>,
    limits: EvalLimits,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definitions from a list; a later definition shadows an earlier one
    /// with the same name.
    #[must_use]
    pub fn definitions(mut self, definitions: impl IntoIterator<Item = Definition>) -> Self {
        self.definitions = Some(Environment::from_bindings(
            definitions
                .into_iter()
                .map(|definition| (definition.name.clone(), definition)),
        ));
        self
    }

    /// Use an existing definitions environment as is.
    #[must_use]
    pub fn definitions_env(mut self, definitions: Environment<Definition>) -> Self {
        self.definitions = Some(definitions);
        self
    }

    /// Base variables; same shadowing rule as [`definitions`](Self::definitions).
    #[must_use]
    pub fn variables<N: Into<Name>>(mut self, variables: impl IntoIterator<Item = (N, Value)>) -> Self {
        self.variables = Some(Environment::from_bindings(variables));
        self
    }

    #[must_use]
    pub fn variables_env(mut self, variables: Environment<Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn primitives(mut self, primitives: Arc<PrimitiveTable>) -> Self {
        self.primitives = Some(primitives);
        self
    }

    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            definitions: self.definitions.unwrap_or_default(),
            variables: self.variables.unwrap_or_default(),
            primitives: self.primitives.unwrap_or_else(PrimitiveTable::shared),
            limits: self.limits,
        }
    }
}
