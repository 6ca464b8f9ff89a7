use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::KeyValueStore;

const DEFAULT_STORE_PATH: &str = "local_store.json";

/// Durable store: one JSON document on disk holding every key. The whole
/// document is rewritten through a temp-file rename on each mutation, so
/// readers only ever see a complete snapshot.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

/// Build the process-wide store from `LOCAL_STORE_PATH` (or the default
/// path), loading whatever is already on disk.
pub fn create_store() -> FileStore {
    let path = std::env::var("LOCAL_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    println!("Opening local store at {}", path);
    FileStore::open(path)
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!(
                        "Local store at {} is unreadable ({}); starting empty",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(e) => {
                eprintln!("Failed to serialize local store: {}", e);
                return;
            }
        };

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, serialized) {
            eprintln!("Failed to write local store: {}", e);
            return;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            eprintln!("Failed to replace local store: {}", e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries();
        entries.remove(key);
        self.persist(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries();
        entries.clear();
        self.persist(&entries);
    }
}
