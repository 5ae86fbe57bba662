//! Preference store persisted as a single JSON object on disk.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use super::prefs::PrefsStore;
use crate::HostError;

#[derive(Debug, Clone)]
/// File-backed preference store.
///
/// The file holds one JSON object mapping keys to raw JSON strings. Every save rewrites the whole
/// file; a missing file reads as an empty store.
pub struct JsonFilePrefsStore {
    path: PathBuf,
}

impl JsonFilePrefsStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, HostError> {
        match fs::read_to_string(&self.path) {
            Ok(body) if body.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl PrefsStore for JsonFilePrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), HostError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), raw_json.to_string());
        self.write_all(&entries)
    }

    fn delete_pref(&self, key: &str) -> Result<(), HostError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFilePrefsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load_pref("desk.theme.v1").expect("load"), None);
        store.delete_pref("desk.theme.v1").expect("delete missing");
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_a_fresh_store_instance() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("prefs.json");

        JsonFilePrefsStore::new(&path)
            .save_pref("desk.theme.v1", "\"light\"")
            .expect("save");
        let reopened = JsonFilePrefsStore::new(&path);
        assert_eq!(
            reopened.load_pref("desk.theme.v1").expect("load"),
            Some("\"light\"".to_string())
        );

        reopened.delete_pref("desk.theme.v1").expect("delete");
        assert_eq!(reopened.load_pref("desk.theme.v1").expect("load"), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2").expect("write corrupt");
        let store = JsonFilePrefsStore::new(&path);
        assert!(matches!(
            store.load_pref("any"),
            Err(HostError::Serialization(_))
        ));
    }
}
