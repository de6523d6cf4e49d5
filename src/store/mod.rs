//! Persistence adapter
//!
//! A small key-value abstraction with a SQLite backend (`~/.pearl/pearl.db`)
//! and an in-memory one. [`Persistence`] layers typed JSON save/load on top
//! and never fails: storage problems are logged and the game keeps running
//! in memory.
//!
//! There is no version check between writers. Two handles on the same key
//! follow last-writer-wins.

mod db;
mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Storage keys
pub mod keys {
    pub const GAME_STATE: &str = "taikenGameState";
    pub const THEME: &str = "taikenTheme";
    pub const CHAPTER_PROGRESS: &str = "taikenChapterProgress";
    pub const AUTH_TOKEN: &str = "pearl_auth_token";
    pub const REFRESH_TOKEN: &str = "pearl_refresh_token";
    pub const AUTH_USER: &str = "pearl_auth_user";
}

/// Raw string key-value store
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Best-effort typed persistence over a [`KvStore`]
#[derive(Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KvStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `value` as JSON under `key`; failures are logged and dropped
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            tracing::warn!("Failed to save {}: {}", key, e);
        }
    }

    /// Load a previously saved value
    ///
    /// Missing keys, `null`/`undefined` placeholders and unreadable blobs
    /// all come back as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return None;
        }

        match serde_json::from_str(trimmed) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse stored {}: {}", key, e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!("Failed to remove {}: {}", key, e);
        }
    }
}
