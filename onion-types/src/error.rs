//! Error types for composition and dispatch.

use thiserror::Error;

/// Composition-time faults.
///
/// These are programmer errors: they are reported synchronously by
/// `try_compose` (or `MiddlewareStack::compose`) before anything runs,
/// never through an execution future.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// An erased entry is not a middleware for the chain's
    /// context, output, and error types.
    #[error("entry {position} is not a middleware for {expected}")]
    NotMiddleware {
        /// Zero-based position of the offending entry.
        position: usize,
        /// The middleware type the chain expected at that position.
        expected: &'static str,
    },
}

/// Execution-time faults, delivered through the execution's result future.
///
/// `E` is the middleware authors' own error type. It is carried unchanged:
/// whatever value a middleware fails with is the value the caller receives.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// A continuation was invoked at or before the highest position
    /// already reached in this execution, i.e. `next` was called twice.
    #[error("next() called multiple times: position {position} requested after reaching {reached}")]
    DoubleInvocation {
        /// The position the offending continuation was bound to.
        position: usize,
        /// The highest position reached before the call.
        reached: usize,
    },

    /// A middleware failed, synchronously or asynchronously.
    #[error("{0}")]
    Middleware(E),
}

impl<E> DispatchError<E> {
    /// Wrap a middleware fault.
    pub fn from_middleware(err: E) -> Self {
        Self::Middleware(err)
    }

    /// Whether this is a double-invocation fault.
    #[must_use]
    pub fn is_double_invocation(&self) -> bool {
        matches!(self, Self::DoubleInvocation { .. })
    }

    /// Borrow the middleware fault, if this is one.
    #[must_use]
    pub fn as_middleware(&self) -> Option<&E> {
        match self {
            Self::Middleware(err) => Some(err),
            _ => None,
        }
    }

    /// Take the middleware fault, if this is one.
    pub fn into_middleware(self) -> Option<E> {
        match self {
            Self::Middleware(err) => Some(err),
            _ => None,
        }
    }
}
