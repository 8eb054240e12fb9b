//! The raw return of a middleware, before normalization.
//!
//! A middleware may finish on the spot (`Ready`) or hand back work that is
//! still in flight (`Pending`). [`Outcome::into_future`] is the single place
//! where both shapes become the one future type the dispatcher deals with.

use std::future::Future;

use futures::future;

use crate::error::DispatchError;
use crate::wasm::{WasmBoxedFuture, WasmCompatSend};

/// Result of one dispatch: the middleware's value or a dispatch fault.
pub type DispatchResult<T, E> = Result<T, DispatchError<E>>;

/// What a middleware returns.
pub enum Outcome<'a, T, E> {
    /// The middleware completed synchronously, successfully or not.
    Ready(DispatchResult<T, E>),
    /// The middleware returned asynchronous work.
    Pending(WasmBoxedFuture<'a, DispatchResult<T, E>>),
}

impl<'a, T, E> Outcome<'a, T, E>
where
    T: WasmCompatSend + 'a,
    E: WasmCompatSend + 'a,
{
    /// A synchronous success.
    pub fn ok(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    /// A synchronous middleware fault.
    pub fn fail(err: E) -> Self {
        Self::Ready(Err(DispatchError::Middleware(err)))
    }

    /// Box a future as a pending outcome.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = DispatchResult<T, E>> + WasmCompatSend + 'a,
    {
        Self::Pending(Box::pin(fut))
    }

    /// Whether the outcome is already settled.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Normalize into a future.
    ///
    /// A ready success resolves immediately, a ready fault rejects
    /// immediately, and pending work is returned as is.
    pub fn into_future(self) -> WasmBoxedFuture<'a, DispatchResult<T, E>> {
        match self {
            Self::Ready(result) => Box::pin(future::ready(result)),
            Self::Pending(fut) => fut,
        }
    }
}

impl<'a, T, E> From<DispatchResult<T, E>> for Outcome<'a, T, E> {
    fn from(result: DispatchResult<T, E>) -> Self {
        Self::Ready(result)
    }
}

impl<'a, T, E> From<WasmBoxedFuture<'a, DispatchResult<T, E>>> for Outcome<'a, T, E> {
    fn from(fut: WasmBoxedFuture<'a, DispatchResult<T, E>>) -> Self {
        Self::Pending(fut)
    }
}

impl<T, E> std::fmt::Debug for Outcome<'_, T, E>
where
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
