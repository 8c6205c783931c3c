//! Resource limits for a single evaluation.
//!
//! The language has no loops, so the only way an evaluation runs long or
//! deep is through user calls. All limits are therefore checked at call
//! dispatch, after the callee's arity has been checked and before its
//! environment is built. An evaluation that stays within its limits
//! produces exactly the result it would produce without them.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::errors::EvalResult;
use crate::EvalError;

/// Limits for one evaluation. Every limit defaults to unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalLimits {
    /// Deepest allowed nesting of user calls.
    pub max_call_depth: Option<usize>,
    /// Total user calls allowed.
    pub call_budget: Option<u64>,
    /// Wall-clock time allowed, measured from the start of evaluation.
    pub timeout: Option<Duration>,
}

impl EvalLimits {
    pub const UNLIMITED: EvalLimits = EvalLimits {
        max_call_depth: None,
        call_budget: None,
        timeout: None,
    };

    #[must_use]
    pub fn with_max_call_depth(mut self, limit: usize) -> Self {
        self.max_call_depth = Some(limit);
        self
    }

    #[must_use]
    pub fn with_call_budget(mut self, budget: u64) -> Self {
        self.call_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_unlimited(&self) -> bool {
        *self == Self::UNLIMITED
    }
}

/// Per-evaluation counters behind [`EvalLimits`].
///
/// Lives for one call to `Evaluator::eval`; single-threaded by construction.
pub(crate) struct CallTracker {
    limits: EvalLimits,
    deadline: Option<Instant>,
    depth: Cell<usize>,
    calls: Cell<u64>,
}

impl CallTracker {
    pub(crate) fn start(limits: EvalLimits) -> Self {
        CallTracker {
            limits,
            deadline: limits
                .timeout
                .and_then(|timeout| Instant::now().checked_add(timeout)),
            depth: Cell::new(0),
            calls: Cell::new(0),
        }
    }

    /// Account for entering a user call. The returned guard leaves the call
    /// when dropped, including on early return through `?`.
    pub(crate) fn enter(&self) -> EvalResult<CallGuard<'_>> {
        let depth = self.depth.get().saturating_add(1);
        if let Some(limit) = self.limits.max_call_depth {
            if depth > limit {
                return Err(EvalError::RecursionLimitExceeded { limit });
            }
        }

        let calls = self.calls.get().saturating_add(1);
        if let Some(budget) = self.limits.call_budget {
            if calls > budget {
                return Err(EvalError::CallBudgetExceeded { budget });
            }
        }

        if let (Some(deadline), Some(timeout)) = (self.deadline, self.limits.timeout) {
            if Instant::now() >= deadline {
                return Err(EvalError::DeadlineExceeded { timeout });
            }
        }

        self.depth.set(depth);
        self.calls.set(calls);
        Ok(CallGuard { tracker: self })
    }

    /// Current user-call nesting.
    pub(crate) fn depth(&self) -> usize {
        self.depth.get()
    }

    /// User calls made so far.
    pub(crate) fn calls(&self) -> u64 {
        self.calls.get()
    }
}

/// Leaves a user call on drop.
pub(crate) struct CallGuard<'a> {
    tracker: &'a CallTracker,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        let depth = &self.tracker.depth;
        depth.set(depth.get().saturating_sub(1));
    }
}
