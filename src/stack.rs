//! Stack headroom for the recursive passes.
//!
//! Parser, resolver and interpreter all recurse on the shape of the program.
//! Their recursive entry points run through [`ensure_sufficient_stack`], which
//! switches to a freshly allocated segment when the current one runs low, so
//! nesting is bounded by the explicit limits in those passes rather than by
//! the host thread's stack size.

/// Headroom that must remain before a recursive step runs.
const RED_ZONE: usize = 128 * 1024;

/// Size of each segment allocated once the red zone is reached.
const SEGMENT: usize = 1024 * 1024;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}
