// src/app/storage.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

pub const MY_LIST_KEY: &str = "marquee-mylist";
pub const USER_LIKES_KEY: &str = "marquee-user-likes";
pub const LIKE_COUNTS_KEY: &str = "marquee-likes";

pub const STORAGE_FILE: &str = "marquee_storage.db";

/// String key-value substrate the preferences live in.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

// ---- SQLite substrate ----
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> rusqlite::Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| format!("read {key}: {e}"))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .map(|_| ())
            .map_err(|e| format!("write {key}: {e}"))
    }
}

// ---- in-memory substrate ----
#[derive(Default)]
pub struct MemoryStore {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the on-disk store, or fall back to a session-only one.
pub fn open_store(path: &Path) -> Rc<dyn KeyValueStore> {
    match SqliteStore::open(path) {
        Ok(store) => {
            if let Some(file) = store.path() {
                info!("preferences stored in {}", file.display());
            }
            Rc::new(store)
        }
        Err(e) => {
            warn!(
                "failed to open preference store {} ({e}); preferences will not persist",
                path.display()
            );
            Rc::new(MemoryStore::new())
        }
    }
}

/// A value mirrored to a single storage key as JSON.
///
/// Reads fall back to the default when the key is absent or unparseable.
/// Writes update the in-memory value immediately, then persist.
pub struct Persisted<T> {
    key: &'static str,
    value: T,
    store: Rc<dyn KeyValueStore>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn load(store: Rc<dyn KeyValueStore>, key: &'static str, default: T) -> Self {
        let value = match store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(v) => v,
                Err(e) => {
                    debug!("stored {key} is not valid ({e}); using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                debug!("{e}; using default");
                default
            }
        };
        Self { key, value, store }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next);
    }

    fn persist(&self) {
        match serde_json::to_string(&self.value) {
            Ok(raw) => {
                if let Err(e) = self.store.set(self.key, &raw) {
                    warn!("failed to persist {}: {e}", self.key);
                }
            }
            Err(e) => warn!("failed to serialize {}: {e}", self.key),
        }
    }
}
