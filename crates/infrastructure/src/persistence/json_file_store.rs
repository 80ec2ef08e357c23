//! JSON file key-value store
//!
//! Keeps every key in one JSON object file, e.g.
//! `{"wa_favorites": "[...]", "wa_temp_unit": "C"}`. The file is read on
//! first access and rewritten in full on each change through a temporary
//! file and a rename. Separate processes sharing the file are not
//! coordinated; the last writer wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::KeyValueStorePort;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::error::{map_io_error, map_json_error};

type State = BTreeMap<String, String>;

/// File-backed implementation of [`KeyValueStorePort`]
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<Option<State>>,
}

impl JsonFileStore {
    /// Create a store for `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<State, ApplicationError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(State::new()),
            Err(e) => return Err(map_io_error(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(State::new());
        }
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&raw) {
            Ok(object) => Ok(object
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(s) => Some((key, s)),
                    serde_json::Value::Null => None,
                    other => Some((key, other.to_string())),
                })
                .collect()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable state file");
                Ok(State::new())
            },
        }
    }

    async fn write_file(&self, state: &State) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, &e))?;
        }
        let body = serde_json::to_string_pretty(state).map_err(|e| map_json_error(&e))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| map_io_error(&tmp, &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| map_io_error(&self.path, &e))?;
        debug!(path = %self.path.display(), keys = state.len(), "State file written");
        Ok(())
    }

    /// Apply `change` to the loaded state and persist it
    async fn modify<F>(&self, change: F) -> Result<(), ApplicationError>
    where
        F: FnOnce(&mut State) -> bool + Send,
    {
        let mut guard = self.state.lock().await;
        let mut state = match guard.take() {
            Some(state) => state,
            None => self.read_file().await?,
        };
        let changed = change(&mut state);
        let result = if changed {
            self.write_file(&state).await
        } else {
            Ok(())
        };
        *guard = Some(state);
        result
    }
}

#[async_trait]
impl KeyValueStorePort for JsonFileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let mut guard = self.state.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_file().await?);
        }
        Ok(guard.as_ref().and_then(|state| state.get(key).cloned()))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.modify(|state| {
            state.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        self.modify(|state| state.remove(key).is_some()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        assert_eq!(store.get("wa_temp_unit").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::new(&path);
        store.set("wa_temp_unit", "F").await.unwrap();
        store.set("wa_favorites", r#"[{"id":"x"}]"#).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("wa_temp_unit").await.unwrap().as_deref(), Some("F"));
        assert_eq!(
            reopened.get("wa_favorites").await.unwrap().as_deref(),
            Some(r#"[{"id":"x"}]"#)
        );
    }

    #[tokio::test]
    async fn file_is_a_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("wa_wind_unit", "mph").await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["wa_wind_unit"], "mph");
    }

    #[tokio::test]
    async fn remove_deletes_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::new(&path);
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("never-set").await.unwrap();

        assert_eq!(JsonFileStore::new(&path).get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("wa_temp_unit").await.unwrap(), None);
        store.set("wa_temp_unit", "C").await.unwrap();
        assert_eq!(
            JsonFileStore::new(&path).get("wa_temp_unit").await.unwrap().as_deref(),
            Some("C")
        );
    }

    #[tokio::test]
    async fn non_string_values_are_read_as_json_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"wa_favorites": [], "gone": null}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("wa_favorites").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("gone").await.unwrap(), None);
    }
}
