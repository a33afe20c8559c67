//! Persistence of in-progress games to a durable key-value store.

mod error;
mod gateway;
mod store;

pub use error::{PersistenceError, PersistenceErrorKind};
pub use gateway::{DEFAULT_STORAGE_KEY, PersistenceGateway, Session};
pub use store::{FileStore, KeyValueStore, MemoryStore};
