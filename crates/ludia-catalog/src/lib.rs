//! In-process catalog state.
//!
//! The catalog is an immutable snapshot replaced atomically on every
//! mutation and published to subscribers over a watch channel. Consumers
//! hold a snapshot and read it without locking; render-side code subscribes
//! and re-renders per snapshot instead of reaching into shared globals.
//! Durable persistence of the records lives with an external collaborator.

pub mod comments;
pub mod snapshot;
pub mod store;
pub mod users;

pub use comments::CommentStore;
pub use snapshot::CatalogSnapshot;
pub use store::{CatalogError, CatalogStore, CatalogSubscription};
pub use users::UserDirectory;
