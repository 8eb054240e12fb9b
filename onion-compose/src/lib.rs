#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod compose;
mod dispatch;
pub mod erased;
pub mod middleware;
pub mod stack;

pub use compose::*;
pub use erased::*;
pub use middleware::*;
pub use stack::*;

pub use onion_types::{
    ComposeError, DispatchError, DispatchResult, Outcome, WasmBoxedFuture, WasmCompatSend,
    WasmCompatSync,
};
