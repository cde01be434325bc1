//! Focusboard persistence gateway.
//!
//! Every mutating engine operation writes through this layer before returning,
//! so at most the in-flight operation can be lost on interruption.

mod trait_;
mod json_storage;
mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
