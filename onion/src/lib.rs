#![deny(missing_docs)]
//! # onion: umbrella crate
//!
//! Provides a single import surface for composing async middleware in the
//! onion model. Re-exports the member crates behind feature flags, plus a
//! `prelude` for the happy path.

#[cfg(feature = "compose")]
pub use onion_compose;
pub use onion_types;

/// Happy-path imports for building and running middleware chains.
pub mod prelude {
    pub use onion_types::{ComposeError, DispatchError, DispatchResult, Outcome, WasmBoxedFuture};

    #[cfg(feature = "compose")]
    pub use onion_compose::{
        AnyMiddleware, Composed, Middleware, MiddlewareStack, Next, compose, erase,
        middleware_fn, sync_middleware_fn, try_compose,
    };
}
