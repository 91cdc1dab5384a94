use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use crate::session::Session;

/// Logical key of the persisted session record
pub const SESSION_KEY: &str = "mentalHealthUser";

/// Key-value style persistence for the single session record
pub trait SessionStore: Send {
    /// Ok(None) when no record exists
    fn load(&self) -> Result<Option<Session>, StoreError>;
    fn save(&self, session: &Session) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Stores the record as `<dir>/mentalHealthUser.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::in_dir(AppDirs::data_dir())
    }

    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(session)?;
        // write-then-rename so a reader never observes a half written record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store holding the raw serialized record.
///
/// Clones share the same slot, so tests can inspect what the controller wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an arbitrary (possibly malformed) record
    pub fn with_raw<S: Into<String>>(raw: S) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        // serializing a Session cannot fail: every field is a plain value
        let _ = store.save(session);
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // a poisoned slot still holds a usable value
        self.raw.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        match self.slot().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        *self.slot() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}
