//! Key-value store port
//!
//! A small string-to-string store for favorites and preferences, the
//! server-side analogue of browser local storage.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisted key-value pairs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError>;

    /// Delete a value; missing keys are not an error
    async fn remove(&self, key: &str) -> Result<(), ApplicationError>;
}
