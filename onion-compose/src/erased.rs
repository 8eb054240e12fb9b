//! Type-erased middleware entries.
//!
//! Plugin systems often hold middleware in heterogeneous collections where
//! the context type is not known statically. [`erase`] hides the types;
//! [`try_compose`](crate::try_compose) and
//! [`MiddlewareStack::compose`](crate::MiddlewareStack::compose) check each
//! entry back against the chain's types when the chain is built.

use std::any::{Any, type_name};
use std::sync::Arc;

use onion_types::ComposeError;

use crate::middleware::Middleware;

/// A middleware with its context, output and error types erased.
#[cfg(not(target_arch = "wasm32"))]
pub type AnyMiddleware = Arc<dyn Any + Send + Sync>;

/// A middleware with its context, output and error types erased.
#[cfg(target_arch = "wasm32")]
pub type AnyMiddleware = Arc<dyn Any>;

/// Erase a middleware for `(C, T, E)`.
pub fn erase<C, T, E, M>(middleware: M) -> AnyMiddleware
where
    C: 'static,
    T: 'static,
    E: 'static,
    M: Middleware<C, T, E> + 'static,
{
    let typed: Arc<dyn Middleware<C, T, E>> = Arc::new(middleware);
    Arc::new(typed)
}

/// Recover the typed middleware from an erased entry at `position`.
pub(crate) fn downcast<C, T, E>(
    entry: &AnyMiddleware,
    position: usize,
) -> Result<Arc<dyn Middleware<C, T, E>>, ComposeError>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    entry
        .downcast_ref::<Arc<dyn Middleware<C, T, E>>>()
        .cloned()
        .ok_or_else(|| ComposeError::NotMiddleware {
            position,
            expected: type_name::<dyn Middleware<C, T, E>>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::sync_middleware_fn;
    use onion_types::Outcome;

    #[test]
    fn downcast_recovers_matching_types() {
        let entry = erase::<u8, (), String, _>(sync_middleware_fn::<u8, (), String, _>(
            |_ctx, _next| Outcome::ok(()),
        ));
        assert!(downcast::<u8, (), String>(&entry, 0).is_ok());
    }

    #[test]
    fn downcast_rejects_other_context_type() {
        let entry = erase::<u8, (), String, _>(sync_middleware_fn::<u8, (), String, _>(
            |_ctx, _next| Outcome::ok(()),
        ));
        match downcast::<u16, (), String>(&entry, 4) {
            Err(ComposeError::NotMiddleware { position, expected }) => {
                assert_eq!(position, 4);
                assert!(expected.contains("u16"), "{expected}");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("u8 middleware accepted for a u16 chain"),
        }
    }

    #[test]
    fn downcast_rejects_values_that_are_not_middleware() {
        let entry: AnyMiddleware = Arc::new("not a middleware");
        assert!(downcast::<u8, (), String>(&entry, 0).is_err());
    }
}
