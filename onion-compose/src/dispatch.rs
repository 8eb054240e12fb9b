//! Per-execution dispatch state.

use std::future::ready;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use onion_types::{DispatchError, DispatchResult, WasmBoxedFuture, WasmCompatSend};

use crate::middleware::{Middleware, Next};

/// Highest position reached in one execution.
///
/// Stores `position + 1` so that zero means "nothing dispatched yet".
/// Strictly increases; never shared between executions.
pub(crate) struct Cursor {
    reached: AtomicUsize,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            reached: AtomicUsize::new(0),
        }
    }

    /// Claim `position`, or return the highest position already reached.
    pub(crate) fn advance(&self, position: usize) -> Result<(), usize> {
        self.reached
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |reached| {
                (position >= reached).then_some(position + 1)
            })
            .map(|_| ())
            .map_err(|reached| reached - 1)
    }

    #[cfg(test)]
    pub(crate) fn reached(&self) -> Option<usize> {
        self.reached.load(Ordering::Acquire).checked_sub(1)
    }
}

/// What runs once the chain itself is exhausted.
pub(crate) enum Tail<'a, C, T, E> {
    /// Resolve with `T::default()`.
    Empty,
    /// A caller-supplied final continuation.
    Final(&'a dyn Middleware<C, T, E>),
    /// The enclosing chain's continuation, when a composed chain is nested.
    Next(Next<'a, C, T, E>),
}

/// Chain reference plus cursor, created fresh for every execution.
pub(crate) struct Dispatch<'a, C, T, E> {
    chain: &'a [Arc<dyn Middleware<C, T, E>>],
    tail: Tail<'a, C, T, E>,
    cursor: Cursor,
}

impl<'a, C, T, E> Dispatch<'a, C, T, E>
where
    C: WasmCompatSend,
    T: Default + WasmCompatSend,
    E: WasmCompatSend,
{
    pub(crate) fn new(chain: &'a [Arc<dyn Middleware<C, T, E>>], tail: Tail<'a, C, T, E>) -> Self {
        Self {
            chain,
            tail,
            cursor: Cursor::new(),
        }
    }

    /// Run the step at `position`, handing it a continuation for `position + 1`.
    pub(crate) fn step<'b>(
        &'b self,
        position: usize,
        ctx: &'b mut C,
    ) -> WasmBoxedFuture<'b, DispatchResult<T, E>> {
        if let Err(reached) = self.cursor.advance(position) {
            return Box::pin(ready(Err(DispatchError::DoubleInvocation { position, reached })));
        }
        tracing::trace!(position, chain_len = self.chain.len(), "dispatching middleware");

        let next = Next {
            dispatch: self,
            position: position + 1,
        };
        if let Some(middleware) = self.chain.get(position) {
            return middleware.handle(ctx, next).into_future();
        }
        if position > self.chain.len() {
            return Box::pin(ready(Ok(T::default())));
        }
        match &self.tail {
            Tail::Empty => Box::pin(ready(Ok(T::default()))),
            Tail::Final(last) => last.handle(ctx, next).into_future(),
            Tail::Next(outer) => outer.run(ctx),
        }
    }
}

#[cfg(test)]
impl<C, T, E> Dispatch<'_, C, T, E> {
    pub(crate) fn cursor(&self) -> &Cursor {
        &self.cursor
    }
}
