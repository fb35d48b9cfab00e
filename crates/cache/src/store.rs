use crate::error::Error;

/// Key-value storage capability the enrichment cache is built over.
///
/// Injected rather than hidden behind a global so the cache (and everything
/// above it) can be tested against [`crate::MemoryCacheStore`] without a
/// filesystem. Expected concurrency is one writer per key — a single user
/// working on a single source — so implementations need no locking.
pub trait CacheStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, Error>;
    fn save(&self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&self, key: &str) -> Result<(), Error>;
}
