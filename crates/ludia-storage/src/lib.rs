//! Object-storage interface for game bundles.
//!
//! Durable blob storage is an external collaborator; this crate defines the
//! trait the rest of the system programs against, the game-scoped key
//! layout, and an in-memory backend for tests and local runs.

pub mod keys;
pub mod memory;
pub mod traits;

pub use keys::{bundle_key, content_type_for, validate_key};
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
