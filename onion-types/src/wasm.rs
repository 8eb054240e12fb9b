//! `Send`/`Sync` bounds that relax on wasm32.
//!
//! Middleware futures cross threads on native runtimes. On wasm32 everything
//! runs on one thread and many host types are `!Send`, so the same bounds
//! are dropped there.

use std::future::Future;
use std::pin::Pin;

/// `Send` on native targets, no bound on wasm32.
#[cfg(not(target_arch = "wasm32"))]
pub trait WasmCompatSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + ?Sized> WasmCompatSend for T {}

/// `Send` on native targets, no bound on wasm32.
#[cfg(target_arch = "wasm32")]
pub trait WasmCompatSend {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> WasmCompatSend for T {}

/// `Sync` on native targets, no bound on wasm32.
#[cfg(not(target_arch = "wasm32"))]
pub trait WasmCompatSync: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync + ?Sized> WasmCompatSync for T {}

/// `Sync` on native targets, no bound on wasm32.
#[cfg(target_arch = "wasm32")]
pub trait WasmCompatSync {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> WasmCompatSync for T {}

/// The future every dispatch step resolves through.
#[cfg(not(target_arch = "wasm32"))]
pub type WasmBoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The future every dispatch step resolves through.
#[cfg(target_arch = "wasm32")]
pub type WasmBoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
