//! Preference storage, the one piece of state that outlives a page load.
//!
//! The page only ever stores the theme, but the store is a plain string
//! key-value interface so the browser's `localStorage` and a file on disk
//! fit behind the same trait.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::config::config_dir;
use crate::error::Result;

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ───────────────────────────────────────── memory ────────────

/// Volatile store, forgotten when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ───────────────────────────────────────── file ──────────────

/// `key = value` file, rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.  A missing file is an
    /// empty store; an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            parse(&std::fs::read_to_string(&path)?)
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// `$XDG_CONFIG_HOME/folio/prefs`.
    pub fn default_path() -> PathBuf {
        config_dir().join("prefs")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = String::from("# folio preferences\n");
        for (key, value) in &self.values {
            out.push_str(&format!("{key} = {value}\n"));
        }
        std::fs::write(&self.path, out)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

fn parse(s: &str) -> BTreeMap<String, String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}
