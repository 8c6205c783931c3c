//! Stack growth for recursive tree walks.
//!
//! The s-expression reader, the AST lowering, the surface parser and the
//! evaluator all recurse once per nesting level, and the evaluator once more
//! per user call. A deeply nested program or a deep (but terminating)
//! recursion would otherwise hit the host stack guard page. Each recursive
//! step is wrapped in [`ensure_sufficient_stack`], which moves evaluation onto
//! a freshly allocated segment when the current one runs low.
//!
//! Non-terminating recursion is not caught here; bound it with the
//! evaluator's call-depth limit instead.

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// within the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes left on the current stack segment, when the platform can tell.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
