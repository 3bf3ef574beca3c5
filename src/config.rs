//! Location and contents of the application settings file
//!
//! The settings document lives at `<files root>/config/settings.json`.
//! Other components load it from that exact path, so the layout is fixed.

use crate::{FileStore, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the files root
pub const SETTINGS_RELATIVE_PATH: &str = "/config/settings.json";

/// Path of the settings file below `base`.
///
/// Plain concatenation: no I/O and no normalization of `base`.
pub fn config_file_location(base: impl AsRef<Path>) -> PathBuf {
    let mut location = OsString::from(base.as_ref().as_os_str());
    location.push(SETTINGS_RELATIVE_PATH);
    PathBuf::from(location)
}

/// Default files root for this user (`<data dir>/appfiles`)
pub fn default_files_root() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("appfiles"))
}

/// The settings document: a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings for `base`; a missing file yields empty settings
    pub fn load(store: &FileStore, base: impl AsRef<Path>) -> Result<Self> {
        match store.read_text(&config_file_location(base))? {
            Some(text) => Self::from_json(&text),
            None => Ok(Self::default()),
        }
    }

    /// Write settings for `base`, creating the config directory if needed
    pub fn save(&self, store: &FileStore, base: impl AsRef<Path>) -> Result<()> {
        store.write_text(&config_file_location(base), &self.to_json()?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// Set a value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
