use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Error;
use crate::store::CacheStore;

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}
