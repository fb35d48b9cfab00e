use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::store::CacheStore;

/// The two artifact classes cached per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Transcript,
    Analysis,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Transcript => "transcript",
            ArtifactKind::Analysis => "analysis",
        }
    }
}

/// Stable per-source cache identity: user-supplied source name plus the
/// configured language code.
///
/// This deliberately conflates content identity with the (name, language)
/// pair: two different recordings uploaded under the same file name and
/// language collide and share a cache entry. That is the documented contract
/// — "same name, same cached result" — with the explicit "redo" action as the
/// escape hatch, rather than a content hash.
pub fn fingerprint(source_name: &str, language_code: &str) -> String {
    format!("{source_name}_{language_code}")
}

/// Content-addressed store for prior oracle outputs.
///
/// Read-before-compute: callers check here first and a hit short-circuits the
/// oracle call entirely. No TTL and no size bound — the cache is bounded by
/// the user's own library of sources.
pub struct EnrichmentCache<S> {
    store: S,
}

impl<S: CacheStore> EnrichmentCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the cached artifact, or `None` on a miss.
    ///
    /// A stored blob that no longer parses is treated as a miss and falls
    /// through to recomputation; corruption never propagates upward.
    pub fn get<T: DeserializeOwned>(&self, kind: ArtifactKind, fingerprint: &str) -> Option<T> {
        let key = entry_key(kind, fingerprint);
        let blob = match self.store.load(&key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(%key, %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%key, %err, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    /// Idempotent write: a second `put` under the same key overwrites.
    pub fn put<T: Serialize>(
        &self,
        kind: ArtifactKind,
        fingerprint: &str,
        value: &T,
    ) -> Result<(), Error> {
        let blob = serde_json::to_string(value)?;
        self.store.save(&entry_key(kind, fingerprint), &blob)
    }

    /// Drops both the transcript and the analysis entry for a fingerprint.
    /// This is the user-triggered "redo" action.
    pub fn invalidate(&self, fingerprint: &str) -> Result<(), Error> {
        self.store
            .remove(&entry_key(ArtifactKind::Transcript, fingerprint))?;
        self.store
            .remove(&entry_key(ArtifactKind::Analysis, fingerprint))
    }
}

fn entry_key(kind: ArtifactKind, fingerprint: &str) -> String {
    format!("conv_{}_{}", kind.as_str(), fingerprint)
}
