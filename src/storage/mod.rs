//! Durable key/value persistence.
//!
//! [`KeyValueStore`] is the host-provided backend; [`Persistence`] wraps one
//! with best-effort semantics. Reads and writes never fail from the caller's
//! point of view: backend errors are logged and dropped, and the in-memory
//! state stays authoritative.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Keys of the persisted state fields.
pub mod keys {
    pub const INPUT_TEXT: &str = "inputText";
    pub const SELECTED_FORMAT: &str = "selectedFormat";
    pub const THEME: &str = "app-theme";
    pub const PANEL_RATIO: &str = "panel-ratio";
    pub const CONFIG: &str = "app-config";
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a JSON object of strings: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// A string-keyed, string-valued store.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backend rejects or fails the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Best-effort adapter over a [`KeyValueStore`].
pub struct Persistence {
    backend: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Persistence backed by a fresh, private [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read `key`. Missing keys and backend failures both yield `None`.
    pub fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read from storage");
                None
            }
        }
    }

    /// Write `key`, logging and discarding any failure.
    pub fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            tracing::warn!(key, error = %err, "failed to save to storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::QuotaExceeded { needed: 1, quota: 0 })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded { needed: 1, quota: 0 })
        }
    }

    #[test]
    fn test_read_and_write_through_backend() {
        let store = MemoryStore::new();
        let mut persistence = Persistence::new(store.clone());
        persistence.write(keys::THEME, "light");
        assert_eq!(persistence.read(keys::THEME).as_deref(), Some("light"));
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("light"));
        assert_eq!(persistence.read(keys::PANEL_RATIO), None);
    }

    #[test]
    fn test_backend_failures_are_swallowed() {
        let mut persistence = Persistence::new(BrokenStore);
        persistence.write(keys::INPUT_TEXT, "hello");
        assert_eq!(persistence.read(keys::INPUT_TEXT), None);
    }
}
