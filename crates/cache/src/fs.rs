use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Error;
use crate::store::CacheStore;

/// One JSON file per key under a cache directory.
pub struct FsCacheStore {
    dir: PathBuf,
}

impl FsCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform user data dir (`…/charla/cache`).
    pub fn in_user_data_dir() -> Result<Self, Error> {
        let base = dirs::data_dir().ok_or(Error::DataDirUnavailable)?;
        Ok(Self::new(base.join("charla").join("cache")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }
}

/// Keys embed user-supplied file names; anything outside a conservative
/// filename alphabet becomes `_` so a key can never escape the cache dir.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn atomic_write(target: &Path, content: &str) -> std::io::Result<()> {
    let parent = target.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "target has no parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    std::fs::write(temp.path(), content)?;
    temp.persist(target)?;
    Ok(())
}

impl CacheStore for FsCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, Error> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Error> {
        atomic_write(&self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_load_remove_round_trip() {
        let temp = tempdir().unwrap();
        let store = FsCacheStore::new(temp.path());

        assert!(store.load("missing").unwrap().is_none());

        store.save("key", r#"{"a":1}"#).unwrap();
        assert_eq!(store.load("key").unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.remove("key").unwrap();
        assert!(store.load("key").unwrap().is_none());
        // removing twice is fine
        store.remove("key").unwrap();
    }

    #[test]
    fn save_overwrites_existing() {
        let temp = tempdir().unwrap();
        let store = FsCacheStore::new(temp.path());

        store.save("key", "old").unwrap();
        store.save("key", "new").unwrap();
        assert_eq!(store.load("key").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn hostile_keys_stay_inside_the_cache_dir() {
        let temp = tempdir().unwrap();
        let store = FsCacheStore::new(temp.path());

        store.save("../escape/María charla.mp3_es", "x").unwrap();
        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("nested").join("file.json");

        atomic_write(&target, "content").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "content");
    }
}
