//! Composition: turn an ordered list of middleware into one executor.

use std::sync::Arc;

use onion_types::{ComposeError, DispatchResult, Outcome, WasmBoxedFuture, WasmCompatSend};

use crate::dispatch::{Dispatch, Tail};
use crate::erased::{AnyMiddleware, downcast};
use crate::middleware::{Middleware, Next};

/// A composed middleware chain.
///
/// The chain is fixed at composition time and shared by clones. Each call to
/// [`execute`](Self::execute) gets its own cursor, so one `Composed` can run
/// any number of executions concurrently.
///
/// `Composed` is itself a [`Middleware`]: nested inside another chain, the
/// outer continuation runs once the inner chain is exhausted.
pub struct Composed<C, T, E> {
    chain: Arc<[Arc<dyn Middleware<C, T, E>>]>,
}

/// Compose middleware into an executor.
///
/// Typed entries always satisfy the middleware contract, so this cannot
/// fail. Use [`try_compose`] for type-erased entries.
pub fn compose<C, T, E, I>(middleware: I) -> Composed<C, T, E>
where
    I: IntoIterator<Item = Arc<dyn Middleware<C, T, E>>>,
{
    let chain: Arc<[Arc<dyn Middleware<C, T, E>>]> = middleware.into_iter().collect();
    tracing::debug!(chain_len = chain.len(), "composed middleware chain");
    Composed { chain }
}

/// Compose type-erased middleware, checking every entry up front.
///
/// Fails with [`ComposeError::NotMiddleware`] at the first entry that was
/// not erased from a `Middleware<C, T, E>`. Nothing is executed.
pub fn try_compose<C, T, E, I>(middleware: I) -> Result<Composed<C, T, E>, ComposeError>
where
    C: 'static,
    T: 'static,
    E: 'static,
    I: IntoIterator<Item = AnyMiddleware>,
{
    let chain = middleware
        .into_iter()
        .enumerate()
        .map(|(position, entry)| downcast::<C, T, E>(&entry, position))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(compose(chain))
}

impl<C, T, E> Composed<C, T, E> {
    /// Number of middleware in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the chain has no middleware.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<C, T, E> Composed<C, T, E>
where
    C: WasmCompatSend,
    T: Default + WasmCompatSend,
    E: WasmCompatSend,
{
    /// Run the chain against `ctx`.
    ///
    /// Resolves with the first middleware's value, or `T::default()` when
    /// the chain is empty.
    pub fn execute<'a>(&'a self, ctx: &'a mut C) -> WasmBoxedFuture<'a, DispatchResult<T, E>> {
        self.run(ctx, Tail::Empty)
    }

    /// Run the chain against `ctx`, then `last` once the chain is exhausted.
    ///
    /// `last` is handed a continuation of its own, which resolves with
    /// `T::default()`.
    pub fn execute_with<'a>(
        &'a self,
        ctx: &'a mut C,
        last: &'a dyn Middleware<C, T, E>,
    ) -> WasmBoxedFuture<'a, DispatchResult<T, E>> {
        self.run(ctx, Tail::Final(last))
    }

    fn run<'a>(
        &'a self,
        ctx: &'a mut C,
        tail: Tail<'a, C, T, E>,
    ) -> WasmBoxedFuture<'a, DispatchResult<T, E>> {
        Box::pin(async move {
            let dispatch = Dispatch::new(&self.chain, tail);
            dispatch.step(0, ctx).await
        })
    }
}

impl<C, T, E> Middleware<C, T, E> for Composed<C, T, E>
where
    C: WasmCompatSend,
    T: Default + WasmCompatSend,
    E: WasmCompatSend,
{
    fn handle<'a>(&'a self, ctx: &'a mut C, next: Next<'a, C, T, E>) -> Outcome<'a, T, E> {
        Outcome::Pending(self.run(ctx, Tail::Next(next)))
    }
}

impl<C, T, E> Clone for Composed<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<C, T, E> std::fmt::Debug for Composed<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composed")
            .field("len", &self.chain.len())
            .finish()
    }
}
