//! Session store - the client's authentication token and its lifecycle.
//!
//! A [`Session`] is read once from durable storage when it is opened and is
//! mutated only through [`Session::set_token`] and [`Session::clear_token`].
//! It is an explicit handle: every component that needs credentials is given
//! a clone. Changes are published synchronously through a
//! `tokio::sync::watch` channel, so every subscriber observes the new token
//! before the caller of `set_token` regains control.

use crate::error::SdkError;
use serde_json::{Map, Value};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Name of the durable storage slot holding the token
pub const TOKEN_SLOT: &str = "token";

/// Durable storage for the session token
///
/// Implementations hold a single named slot ([`TOKEN_SLOT`]). No format
/// validation is performed; the server is the authority on token validity.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, `None` when the slot is empty
    fn load(&self) -> Result<Option<String>, SdkError>;

    /// Overwrite the slot with `token`
    fn save(&self, token: &str) -> Result<(), SdkError>;

    /// Empty the slot
    fn clear(&self) -> Result<(), SdkError>;
}

/// Token storage backed by a JSON object file
///
/// The token lives under the `"token"` key. Other keys in the file are
/// preserved across writes. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Use the file at `path`, which need not exist yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Map<String, Value>, SdkError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        let parsed = serde_json::from_str::<Value>(&contents).map_err(|e| {
            SdkError::StorageError(format!("{}: {}", self.path.display(), e))
        })?;

        match parsed {
            Value::Object(slots) => Ok(slots),
            _ => Err(SdkError::StorageError(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    /// Slots to rewrite on save or clear
    ///
    /// An unreadable file yields no slots and is overwritten by the next write.
    fn slots_for_write(&self) -> Map<String, Value> {
        match self.read_slots() {
            Ok(slots) => slots,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable token storage");
                Map::new()
            }
        }
    }

    fn write_slots(&self, slots: &Map<String, Value>) -> Result<(), SdkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(slots)
            .map_err(|e| SdkError::StorageError(e.to_string()))?;

        // Write beside the target, then rename over it
        let temp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SdkError> {
        let slots = self.read_slots()?;
        Ok(slots
            .get(TOKEN_SLOT)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<(), SdkError> {
        let mut slots = self.slots_for_write();
        slots.insert(TOKEN_SLOT.to_string(), Value::String(token.to_string()));
        self.write_slots(&slots)
    }

    fn clear(&self) -> Result<(), SdkError> {
        match self.read_slots() {
            Ok(mut slots) => {
                if slots.remove(TOKEN_SLOT).is_some() {
                    self.write_slots(&slots)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable token storage");
                self.write_slots(&Map::new())
            }
        }
    }
}

/// In-process token storage
///
/// Clones share the same slot, which lets tests simulate a process restart by
/// opening a second [`Session`] over a clone of the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SdkError> {
        Ok(self.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), SdkError> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        *self.lock() = None;
        Ok(())
    }
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: watch::Sender<Option<String>>,
}

/// Process-wide authentication state
///
/// Cloning a `Session` yields another handle to the same state. At most one
/// token is active at a time.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Open a session, reading the token from `store` once
    ///
    /// A storage read failure is logged and treated as "no credential".
    pub fn open<S: TokenStore + 'static>(store: S) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored session token; starting anonymous");
                None
            }
        };
        debug!(authenticated = token.is_some(), "Session opened");

        let (sender, _receiver) = watch::channel(token);
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: sender,
            }),
        }
    }

    /// A session with no token and no durable storage
    pub fn anonymous() -> Self {
        Self::open(MemoryTokenStore::new())
    }

    /// The currently held token
    pub fn token(&self) -> Option<String> {
        self.inner.token.borrow().clone()
    }

    /// Whether a token is held
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .borrow()
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Persist `token` and publish it to every subscriber
    ///
    /// The in-memory token only changes once the write to durable storage has
    /// succeeded.
    pub fn set_token(&self, token: &str) -> Result<(), SdkError> {
        self.inner.store.save(token)?;
        self.inner.token.send_replace(Some(token.to_string()));
        debug!(subscribers = self.inner.token.receiver_count(), "Session token updated");
        Ok(())
    }

    /// Remove the token from durable storage and publish the anonymous state
    pub fn clear_token(&self) -> Result<(), SdkError> {
        self.inner.store.clear()?;
        self.inner.token.send_replace(None);
        debug!(subscribers = self.inner.token.receiver_count(), "Session token cleared");
        Ok(())
    }

    /// Observe token changes
    ///
    /// The receiver sees the current value immediately and is marked changed
    /// on every subsequent `set_token` / `clear_token`.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.token.subscribe()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_set_token_then_read() {
        let session = Session::anonymous();
        session.set_token("abc123").unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_token_survives_restart() {
        let store = MemoryTokenStore::new();
        let session = Session::open(store.clone());
        session.set_token("persisted").unwrap();
        drop(session);

        let restarted = Session::open(store);
        assert_eq!(restarted.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::anonymous();
        let other = session.clone();
        session.set_token("shared").unwrap();
        assert_eq!(other.token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_subscribers_see_change_synchronously() {
        let session = Session::anonymous();
        let mut first = session.subscribe();
        let mut second = session.subscribe();
        assert!(!first.has_changed().unwrap());

        session.set_token("t1").unwrap();

        assert!(first.has_changed().unwrap());
        assert_eq!(first.borrow_and_update().as_deref(), Some("t1"));
        assert_eq!(second.borrow_and_update().as_deref(), Some("t1"));
        assert!(!first.has_changed().unwrap());

        session.clear_token().unwrap();
        assert!(first.has_changed().unwrap());
        assert_eq!(*first.borrow_and_update(), None);
    }

    #[test]
    fn test_clear_token_empties_store() {
        let store = MemoryTokenStore::with_token("old");
        let session = Session::open(store.clone());
        assert_eq!(session.token().as_deref(), Some("old"));

        session.clear_token().unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip_preserves_other_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["token"], "abc");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("storage.json"));
        assert_eq!(store.load().unwrap(), None);

        store.save("fresh").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_corrupt_storage_opens_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.load(), Err(SdkError::StorageError(_))));

        let session = Session::open(store);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_corrupt_storage_replaced_on_set_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{truncated").unwrap();

        let session = Session::open(FileTokenStore::new(&path));
        assert_eq!(session.token(), None);

        session.set_token("abc123").unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));
        drop(session);

        let restarted = Session::open(FileTokenStore::new(&path));
        assert_eq!(restarted.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_clear_on_corrupt_storage_resets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileTokenStore::new(&path);
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileTokenStore::new(&path);

        store.save("first").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join("storage.json.tmp").exists());
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
