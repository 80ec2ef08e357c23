//! HTTP request handlers

pub mod favorites;
pub mod health;
pub mod location;
pub mod proxy;
pub mod search;
pub mod settings;
pub mod weather;
