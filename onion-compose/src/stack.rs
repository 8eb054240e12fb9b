//! Builder that collects middleware before freezing them into a chain.

use std::sync::Arc;

use onion_types::ComposeError;

use crate::compose::{Composed, compose};
use crate::erased::{AnyMiddleware, downcast};
use crate::middleware::Middleware;

enum Entry<C, T, E> {
    Typed(Arc<dyn Middleware<C, T, E>>),
    Erased(AnyMiddleware),
}

/// An ordered, growable list of middleware.
///
/// Middleware run in the order they were pushed. Typed and erased entries
/// can be mixed; erased entries are checked when [`compose`](Self::compose)
/// is called.
pub struct MiddlewareStack<C, T, E> {
    entries: Vec<Entry<C, T, E>>,
}

impl<C, T, E> MiddlewareStack<C, T, E>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a middleware.
    pub fn push(&mut self, middleware: impl Middleware<C, T, E> + 'static) -> &mut Self {
        self.entries.push(Entry::Typed(Arc::new(middleware)));
        self
    }

    /// Append a middleware that is already shared.
    pub fn push_arc(&mut self, middleware: Arc<dyn Middleware<C, T, E>>) -> &mut Self {
        self.entries.push(Entry::Typed(middleware));
        self
    }

    /// Append a type-erased middleware. Its types are checked by [`compose`](Self::compose).
    pub fn push_erased(&mut self, middleware: AnyMiddleware) -> &mut Self {
        self.entries.push(Entry::Erased(middleware));
        self
    }

    /// Number of entries pushed so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the stack into an executor.
    ///
    /// The stack is left intact and can be extended and composed again.
    pub fn compose(&self) -> Result<Composed<C, T, E>, ComposeError> {
        let chain = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| match entry {
                Entry::Typed(middleware) => Ok(Arc::clone(middleware)),
                Entry::Erased(erased) => downcast::<C, T, E>(erased, position),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(compose(chain))
    }
}

impl<C, T, E> Default for MiddlewareStack<C, T, E>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
