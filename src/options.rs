//! Section/key → integer option lookup.
//!
//! Values are never cached: every [`Options::get`] goes back to the store, so edits made between
//! frames show up on the next draw.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Answer for keys the store does not know.
pub const DEFAULT_VALUE: i64 = 1;

/// A source of integer options grouped in sections.
pub trait OptionStore: Send + Sync {
    fn lookup(&self, section: &str, key: &str) -> Option<i64>;
}

/// Sections as they appear in an options file: `{"graph": {"isHiddenLine": 0}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTable(pub HashMap<String, HashMap<String, i64>>);

impl OptionTable {
    pub fn get(&self, section: &str, key: &str) -> Option<i64> {
        self.0.get(section)?.get(key).copied()
    }

    pub fn insert(&mut self, section: &str, key: &str, value: i64) {
        self.0
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }
}

/// JSON options file, read from disk on every lookup.
#[derive(Clone, Debug)]
pub struct JsonOptionFile {
    path: PathBuf,
}

impl JsonOptionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file; `None` if it is missing or malformed.
    pub fn read(&self) -> Option<OptionTable> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!("options file {} unreadable: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(table) => Some(table),
            Err(e) => {
                debug!("options file {} malformed: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl OptionStore for JsonOptionFile {
    fn lookup(&self, section: &str, key: &str) -> Option<i64> {
        self.read()?.get(section, key)
    }
}

/// In-memory options, editable while a plotter holds them.
#[derive(Debug, Default)]
pub struct MemoryOptions {
    table: RwLock<OptionTable>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, section: &str, key: &str, value: i64) {
        self.table.write().insert(section, key, value);
    }

    pub fn with(self, section: &str, key: &str, value: i64) -> Self {
        self.set(section, key, value);
        self
    }
}

impl OptionStore for MemoryOptions {
    fn lookup(&self, section: &str, key: &str) -> Option<i64> {
        self.table.read().get(section, key)
    }
}

/// One section of a shared store.
#[derive(Clone)]
pub struct Options {
    store: Arc<dyn OptionStore>,
    section: String,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

impl Options {
    pub fn new(store: Arc<dyn OptionStore>, section: impl Into<String>) -> Self {
        Self {
            store,
            section: section.into(),
        }
    }

    /// Another section of the same store.
    pub fn section(&self, section: impl Into<String>) -> Self {
        Self::new(Arc::clone(&self.store), section)
    }

    pub fn get(&self, key: &str) -> i64 {
        self.store
            .lookup(&self.section, key)
            .unwrap_or(DEFAULT_VALUE)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key) != 0
    }
}
