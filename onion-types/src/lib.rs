#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod outcome;
pub mod wasm;

pub use error::*;
pub use outcome::*;
pub use wasm::*;
