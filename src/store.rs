//! Persistence for the feedback list.
//!
//! The whole list is stored as one JSON array and rewritten after every
//! mutation. Loading never fails: a missing, unreadable or malformed file
//! yields an empty list.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

use crate::feedback::FeedbackEntry;

/// File name used under the data directory
pub const STORE_FILE_NAME: &str = "feedbacks.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize feedback list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Backing storage for the feedback list
pub trait Store {
    /// Read the persisted list, or an empty one if nothing usable is stored
    fn load(&self) -> Vec<FeedbackEntry>;

    /// Replace the persisted list with `entries`
    fn save(&mut self, entries: &[FeedbackEntry]) -> Result<(), StoreError>;
}

/// Parse a stored value, treating any shape mismatch as an empty list.
///
/// Ids key every edit and delete, so a list that repeats one is rejected
/// like any other malformed value.
fn decode(content: &str, origin: &str) -> Vec<FeedbackEntry> {
    let entries = match serde_json::from_str::<Vec<FeedbackEntry>>(content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Ignoring unreadable feedback data in {}: {}", origin, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(entries.len());
    if let Some(dup) = entries.iter().find(|e| !seen.insert(e.id)) {
        tracing::warn!("Ignoring feedback data in {}: id {} is repeated", origin, dup.id);
        return Vec::new();
    }
    entries
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default store file path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedback-tui")
            .join(STORE_FILE_NAME)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Vec<FeedbackEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No feedback file at {}, starting fresh", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let entries = decode(&content, &self.path.display().to_string());
        tracing::info!("Loaded {} feedback entries", entries.len());
        entries
    }

    fn save(&mut self, entries: &[FeedbackEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string(entries)?;

        // Write beside the target and rename so readers never see half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved {} feedback entries", entries.len());
        Ok(())
    }
}

/// In-memory store. Clones share the same slot, so a test can keep one
/// handle and inspect what the app wrote through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored value, as if written by an earlier session
    #[cfg(test)]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// The raw stored value, if anything has been written
    #[cfg(test)]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Vec<FeedbackEntry> {
        match self.slot.borrow().as_deref() {
            Some(content) => decode(content, "memory"),
            None => Vec::new(),
        }
    }

    fn save(&mut self, entries: &[FeedbackEntry]) -> Result<(), StoreError> {
        let content = serde_json::to_string(entries)?;
        *self.slot.borrow_mut() = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Rating;

    fn sample() -> Vec<FeedbackEntry> {
        vec![
            FeedbackEntry {
                id: 1,
                rating: Rating::new(8).unwrap(),
                feedback: "Great service".to_string(),
            },
            FeedbackEntry {
                id: 2,
                rating: Rating::new(3).unwrap(),
                feedback: "  slow  ".to_string(),
            },
        ]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load(), sample());
    }

    #[test]
    fn test_file_is_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()[..1]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"[{"id":1,"rating":8,"feedback":"Great service"}]"#);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_wrong_shapes_load_empty() {
        for raw in [
            "null",
            "{}",
            r#"{"feedbacks":[]}"#,
            r#"[{"id":1,"rating":5}]"#,
            r#"[{"id":"a","rating":5,"feedback":"x"}]"#,
            r#"[{"id":1,"rating":42,"feedback":"x"}]"#,
            r#"[1,2,3]"#,
        ] {
            assert!(MemoryStore::with_raw(raw).load().is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_repeated_ids_load_empty() {
        let raw = r#"[{"id":5,"rating":3,"feedback":"first"},{"id":5,"rating":7,"feedback":"second"}]"#;
        assert!(MemoryStore::with_raw(raw).load().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        fs::write(&path, raw).unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_memory_store_shares_slot() {
        let observer = MemoryStore::new();
        let mut store = observer.clone();
        assert!(observer.raw().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(observer.load(), sample());
    }

    #[test]
    fn test_save_overwrites_previous_list() {
        let mut store = MemoryStore::new();
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(store.raw().as_deref(), Some("[]"));
        assert!(store.load().is_empty());
    }
}
