//! The middleware contract and the continuation handed to each step.
//!
//! Each middleware receives the shared context and a [`Next`] bound to the
//! following chain position. It can:
//! - do work before delegating, then call `next.run(ctx)`
//! - short-circuit by returning without calling `next`
//! - inspect the inner result (or fault) after `next` settles

use onion_types::{DispatchResult, Outcome, WasmBoxedFuture, WasmCompatSend, WasmCompatSync};

use crate::dispatch::Dispatch;

/// One step of a composed chain.
///
/// `C` is the context threaded through every step, `T` the value a step
/// produces and `E` the middleware authors' error type.
///
/// Returns an [`Outcome`] rather than a future so synchronous steps do not
/// need to allocate; the dispatcher normalizes both shapes.
pub trait Middleware<C, T, E>: WasmCompatSend + WasmCompatSync {
    /// Handle the context, optionally delegating through `next`.
    fn handle<'a>(&'a self, ctx: &'a mut C, next: Next<'a, C, T, E>) -> Outcome<'a, T, E>;
}

/// Continuation bound to one chain position.
///
/// Cheap to copy. Every copy shares the execution's cursor, so only the
/// first `run` of a given position succeeds; later ones fail with
/// [`DispatchError::DoubleInvocation`](onion_types::DispatchError::DoubleInvocation).
pub struct Next<'a, C, T, E> {
    pub(crate) dispatch: &'a Dispatch<'a, C, T, E>,
    pub(crate) position: usize,
}

impl<'a, C, T, E> Next<'a, C, T, E> {
    /// The chain position this continuation resumes at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, C, T, E> Next<'a, C, T, E>
where
    C: WasmCompatSend,
    T: Default + WasmCompatSend,
    E: WasmCompatSend,
{
    /// Resume the chain at this continuation's position.
    ///
    /// The cursor is checked when `run` is called, not when the returned
    /// future is first polled.
    pub fn run<'b>(&self, ctx: &'b mut C) -> WasmBoxedFuture<'b, DispatchResult<T, E>>
    where
        'a: 'b,
    {
        self.dispatch.step(self.position, ctx)
    }
}

impl<C, T, E> Clone for Next<'_, C, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T, E> Copy for Next<'_, C, T, E> {}

impl<C, T, E> std::fmt::Debug for Next<'_, C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Wrapper that implements `Middleware` for a closure returning a boxed future.
struct MiddlewareFn<F> {
    f: F,
}

impl<C, T, E, F> Middleware<C, T, E> for MiddlewareFn<F>
where
    F: for<'a> Fn(&'a mut C, Next<'a, C, T, E>) -> WasmBoxedFuture<'a, DispatchResult<T, E>>
        + WasmCompatSend
        + WasmCompatSync,
{
    fn handle<'a>(&'a self, ctx: &'a mut C, next: Next<'a, C, T, E>) -> Outcome<'a, T, E> {
        Outcome::Pending((self.f)(ctx, next))
    }
}

/// Create async middleware from a closure (like axum's `from_fn`).
///
/// The closure must return a `Box::pin(async move { ... })` future.
///
/// # Example
///
/// ```ignore
/// use onion_compose::*;
///
/// let timing = middleware_fn(|ctx: &mut Request, next| {
///     Box::pin(async move {
///         let started = std::time::Instant::now();
///         let result = next.run(ctx).await;
///         ctx.elapsed = started.elapsed();
///         result
///     })
/// });
/// ```
#[must_use]
pub fn middleware_fn<C, T, E, F>(f: F) -> impl Middleware<C, T, E>
where
    F: for<'a> Fn(&'a mut C, Next<'a, C, T, E>) -> WasmBoxedFuture<'a, DispatchResult<T, E>>
        + WasmCompatSend
        + WasmCompatSync,
{
    MiddlewareFn { f }
}

/// Wrapper that implements `Middleware` for a closure returning an [`Outcome`].
struct SyncMiddlewareFn<F> {
    f: F,
}

impl<C, T, E, F> Middleware<C, T, E> for SyncMiddlewareFn<F>
where
    F: for<'a> Fn(&'a mut C, Next<'a, C, T, E>) -> Outcome<'a, T, E>
        + WasmCompatSend
        + WasmCompatSync,
{
    fn handle<'a>(&'a self, ctx: &'a mut C, next: Next<'a, C, T, E>) -> Outcome<'a, T, E> {
        (self.f)(ctx, next)
    }
}

/// Create middleware from a closure that answers without an async block.
///
/// Useful for guards and terminal handlers. The closure can still delegate
/// by returning `Outcome::Pending(next.run(ctx))`.
#[must_use]
pub fn sync_middleware_fn<C, T, E, F>(f: F) -> impl Middleware<C, T, E>
where
    F: for<'a> Fn(&'a mut C, Next<'a, C, T, E>) -> Outcome<'a, T, E>
        + WasmCompatSend
        + WasmCompatSync,
{
    SyncMiddlewareFn { f }
}
