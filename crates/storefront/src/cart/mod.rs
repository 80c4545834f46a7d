//! Shopping cart: grouped quantity view over a flat persisted log.
//!
//! # Architecture
//!
//! - The flat `"cart"` entry in the key-value store is the source of truth;
//!   the grouped [`CartLine`] view is derived from it on every load
//! - Mutations update the grouped view, re-flatten, and overwrite the store
//! - A watch channel carries unit-count change notifications to subscribers
//!   (the storage-event analog for badge displays)

pub mod storage;
pub mod store;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartLine, CartStore, CART_KEY};

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The underlying key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the flat representation failed.
    #[error("failed to encode cart payload: {0}")]
    Encode(#[from] serde_json::Error),
}
