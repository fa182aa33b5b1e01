//! Process-local session store.
//!
//! A string-keyed, string-valued store that lives exactly as long as the
//! application. Values are JSON documents. Every write or removal bumps a
//! generation counter so that interested parties can notice a change without
//! subscribing to anything.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key under which the editor leaves its pending result for the board.
pub const EDITOR_RESULT_KEY: &str = "taskEditorResult";
/// Key holding the board selected from the board list.
pub const CURRENT_BOARD_KEY: &str = "currentBoard";

/// Key holding the snapshot of a task about to be edited.
pub fn edit_task_key(task_id: &str) -> String {
    format!("editTask_{task_id}")
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to encode session value for {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("malformed session value for {key}: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<String, String>,
    generation: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        tracing::debug!(key, bytes = value.len(), "session set");
        self.entries.insert(key.to_string(), value);
        self.generation += 1;
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            tracing::debug!(key, "session remove");
            self.generation += 1;
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic change counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn changed_since(&self, generation: u64) -> bool {
        self.generation != generation
    }

    pub fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(value).map_err(|source| SessionError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, encoded);
        Ok(())
    }

    /// Decode a JSON value without removing it. `Ok(None)` if the key is absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|source| SessionError::Decode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Drop everything, as closing the tab would.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.generation += 1;
        }
    }
}
