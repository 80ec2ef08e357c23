//! Shared error mapping for the file-backed store

use std::path::Path;

use application::error::ApplicationError;

/// Map an I/O error to an application-layer error
pub fn map_io_error(path: &Path, e: &std::io::Error) -> ApplicationError {
    ApplicationError::Storage(format!("{}: {e}", path.display()))
}

/// Map a JSON encoding error to an application-layer error
pub fn map_json_error(e: &serde_json::Error) -> ApplicationError {
    ApplicationError::Storage(format!("Invalid state file: {e}"))
}
