//! Persistence module
//!
//! Key-value storage for favorites and unit preferences.

mod error;
mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryStore;
pub use json_file_store::JsonFileStore;
