//! Override profiles ("collections") and their in-memory storage.

pub mod storage;

pub use storage::{Collection, CollectionStorage};
