//! Layout persistence -- saving dock and home page order by package name.
//!
//! A layout is stored as one value per key, the package names joined with
//! `,`. Keys are `dock_apps` for the dock and `home_screen_<page>` for each
//! home page. Reading a key that was never written yields an empty list.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

const DELIMITER: &str = ",";

/// A persisted layout slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKey {
    Dock,
    HomePage(usize),
}

impl LayoutKey {
    pub fn as_string(self) -> String {
        match self {
            Self::Dock => "dock_apps".to_string(),
            Self::HomePage(page) => format!("home_screen_{page}"),
        }
    }
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Durable key/value storage for layouts.
pub trait LayoutPersistence: Send {
    fn save(&mut self, key: LayoutKey, ids: &[String]) -> Result<()>;

    fn load(&self, key: LayoutKey) -> Result<Vec<String>>;
}

/// Join package names into a stored value.
///
/// There is no escaping, so a name containing the delimiter (or an empty
/// name) cannot be stored and is rejected.
pub fn encode_ids(ids: &[String]) -> Result<String> {
    if let Some(bad) = ids.iter().find(|id| id.is_empty() || id.contains(DELIMITER)) {
        return Err(LauncherError::Persistence(format!(
            "cannot store package name {bad:?}"
        )));
    }
    Ok(ids.join(DELIMITER))
}

/// Split a stored value back into package names. Empty segments are skipped.
pub fn decode_ids(value: &str) -> Vec<String> {
    value
        .split(DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// In-memory layout store.
#[derive(Debug, Default, Clone)]
pub struct MemoryLayoutStore {
    values: BTreeMap<String, String>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for `key`, if any.
    pub fn raw(&self, key: LayoutKey) -> Option<&str> {
        self.values.get(&key.as_string()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl LayoutPersistence for MemoryLayoutStore {
    fn save(&mut self, key: LayoutKey, ids: &[String]) -> Result<()> {
        let value = encode_ids(ids)?;
        self.values.insert(key.as_string(), value);
        Ok(())
    }

    fn load(&self, key: LayoutKey) -> Result<Vec<String>> {
        Ok(self
            .values
            .get(&key.as_string())
            .map(|v| decode_ids(v))
            .unwrap_or_default())
    }
}

/// Layout store backed by a flat TOML table of string values.
///
/// The file is read once when the store is opened and rewritten whole on
/// every save. A missing file is an empty layout.
#[derive(Debug)]
pub struct TomlLayoutStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlLayoutStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(|e| {
                LauncherError::Persistence(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let text = toml::to_string(&self.values)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl LayoutPersistence for TomlLayoutStore {
    fn save(&mut self, key: LayoutKey, ids: &[String]) -> Result<()> {
        let value = encode_ids(ids)?;
        self.values.insert(key.as_string(), value);
        self.flush()
            .map_err(|e| LauncherError::Persistence(format!("{}: {e}", self.path.display())))
    }

    fn load(&self, key: LayoutKey) -> Result<Vec<String>> {
        Ok(self
            .values
            .get(&key.as_string())
            .map(|v| decode_ids(v))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_names() {
        assert_eq!(LayoutKey::Dock.as_string(), "dock_apps");
        assert_eq!(LayoutKey::HomePage(0).as_string(), "home_screen_0");
        assert_eq!(LayoutKey::HomePage(3).to_string(), "home_screen_3");
    }

    #[test]
    fn encode_joins_with_comma() {
        assert_eq!(encode_ids(&ids(&["a.b", "c.d"])).unwrap(), "a.b,c.d");
        assert_eq!(encode_ids(&[]).unwrap(), "");
    }

    #[test]
    fn decode_splits_what_encode_joins() {
        let names = ids(&["a.b", "c.d", "e.f"]);
        let value = encode_ids(&names).unwrap();
        assert_eq!(value.matches(DELIMITER).count(), names.len() - 1);
        assert_eq!(decode_ids(&value), names);
    }

    #[test]
    fn encode_rejects_delimiter() {
        let err = encode_ids(&ids(&["a,b"])).unwrap_err();
        assert!(matches!(err, LauncherError::Persistence(_)));
    }

    #[test]
    fn encode_rejects_empty_name() {
        assert!(encode_ids(&ids(&["a", ""])).is_err());
    }

    #[test]
    fn decode_skips_empty_segments() {
        assert_eq!(decode_ids("a.b,,c.d,"), ids(&["a.b", "c.d"]));
        assert!(decode_ids("").is_empty());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryLayoutStore::new();
        store.save(LayoutKey::Dock, &ids(&["x", "y"])).unwrap();
        assert_eq!(store.raw(LayoutKey::Dock), Some("x,y"));
        assert_eq!(store.load(LayoutKey::Dock).unwrap(), ids(&["x", "y"]));
    }

    #[test]
    fn memory_store_absent_key_is_empty() {
        let store = MemoryLayoutStore::new();
        assert!(store.load(LayoutKey::HomePage(2)).unwrap().is_empty());
    }

    #[test]
    fn failed_save_keeps_previous_value() {
        let mut store = MemoryLayoutStore::new();
        store.save(LayoutKey::Dock, &ids(&["x"])).unwrap();
        assert!(store.save(LayoutKey::Dock, &ids(&["bad,id"])).is_err());
        assert_eq!(store.load(LayoutKey::Dock).unwrap(), ids(&["x"]));
    }

    #[test]
    fn toml_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlLayoutStore::open(dir.path().join("layout.toml")).unwrap();
        assert!(store.load(LayoutKey::Dock).unwrap().is_empty());
    }

    #[test]
    fn toml_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("layout.toml");
        {
            let mut store = TomlLayoutStore::open(&path).unwrap();
            store.save(LayoutKey::Dock, &ids(&["a", "b"])).unwrap();
            store.save(LayoutKey::HomePage(1), &ids(&["c"])).unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("dock_apps = \"a,b\""));

        let store = TomlLayoutStore::open(&path).unwrap();
        assert_eq!(store.load(LayoutKey::Dock).unwrap(), ids(&["a", "b"]));
        assert_eq!(store.load(LayoutKey::HomePage(1)).unwrap(), ids(&["c"]));
        assert!(store.load(LayoutKey::HomePage(0)).unwrap().is_empty());
    }

    #[test]
    fn toml_store_corrupt_file_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "dock_apps = [1, 2").unwrap();
        let err = TomlLayoutStore::open(&path).unwrap_err();
        assert!(matches!(err, LauncherError::Persistence(_)));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn save_then_load_roundtrips(names in proptest::collection::vec("[a-z][a-z0-9_.]{0,20}", 0..30)) {
                let mut store = MemoryLayoutStore::new();
                store.save(LayoutKey::HomePage(0), &names).unwrap();
                prop_assert_eq!(store.load(LayoutKey::HomePage(0)).unwrap(), names);
            }
        }
    }
}
