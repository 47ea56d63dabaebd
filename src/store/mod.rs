//! Store - local JSON key-value persistence under `.campus/`
//!
//! One JSON document per fixed string key. Every document is wrapped in an
//! [`Envelope`] carrying the schema version; anything unreadable (missing
//! file, bad JSON, wrong schema) reads back as "no data".

pub mod repo;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the data directory under the root
pub const DATA_DIR: &str = ".campus";

/// Fixed storage keys, one per collection
pub const MESS_MENUS_KEY: &str = "campus_mess_menus";
pub const LOST_FOUND_KEY: &str = "campus_lost_found";
pub const MARKETPLACE_KEY: &str = "campus_marketplace";
pub const TRAVEL_TRIPS_KEY: &str = "campus_travel_trips";
pub const PLACES_KEY: &str = "campus_places";
pub const TIMETABLES_KEY: &str = "campus_timetables";
pub const SESSION_KEY: &str = "campus_mock_session";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Versioned wrapper written around every stored document
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    schema: u32,
    data: T,
}

/// Key-value store rooted at `<root>/.campus/`
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open (and create if needed) the store under the given root
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let dir = root.join(DATA_DIR);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// Directory holding the store's JSON documents
    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load a document by key. Missing, unreadable, corrupt, or
    /// schema-mismatched documents all read as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = fs::read_to_string(self.key_path(key)).ok()?;
        let envelope: Envelope<T> = serde_json::from_str(&content).ok()?;
        if envelope.schema != SCHEMA_VERSION {
            return None;
        }
        Some(envelope.data)
    }

    /// Load a document by key, deleting the document if it exists but
    /// cannot be read. Used for keys where stale corrupt state must not
    /// linger on disk.
    pub fn load_or_clear<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let loaded = self.load(key);
        if loaded.is_none() {
            let path = self.key_path(key);
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
        loaded
    }

    /// Save a document under a key, wrapped in the current schema envelope
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let envelope = Envelope {
            schema: SCHEMA_VERSION,
            data: value,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        fs::write(self.key_path(key), json)?;
        Ok(())
    }

    /// Delete a key. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
