mod cache;
mod error;
pub mod fs;
mod memory;
mod store;

pub use cache::{ArtifactKind, EnrichmentCache, fingerprint};
pub use error::Error;
pub use fs::FsCacheStore;
pub use memory::MemoryCacheStore;
pub use store::CacheStore;
