use charla_analysis::{ConversationAnalysis, enrich};
use charla_cache::{ArtifactKind, CacheStore, EnrichmentCache, fingerprint};
use charla_http::HttpClient;
use charla_oracle::{AnalysisClient, TranscribeClient};
use charla_transcript::{Language, TranscriptResult};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Oracle(#[from] charla_oracle::Error),
    #[error(transparent)]
    Cache(#[from] charla_cache::Error),
}

#[derive(Debug)]
pub enum AudioSource {
    File { bytes: Vec<u8>, mime: String },
    RemoteUrl(String),
}

/// Which artifacts were served from cache rather than recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheHit {
    pub transcript: bool,
    pub analysis: bool,
}

#[derive(Debug)]
pub struct ConversationView {
    pub transcript: TranscriptResult,
    pub analysis: ConversationAnalysis,
    pub cache_hit: CacheHit,
}

/// The full ingest path: transcription, analysis, enrichment, caching.
///
/// Both artifacts are read-before-compute under the (source name, language)
/// fingerprint. Cached entries already carry enriched values; fresh oracle
/// output is enriched before it is stored, so a later hit and the original
/// computation are indistinguishable.
pub struct Pipeline<S, C> {
    cache: EnrichmentCache<S>,
    transcribe: TranscribeClient<C>,
    analysis: AnalysisClient<C>,
}

impl<S, C> Pipeline<S, C>
where
    S: CacheStore,
    C: HttpClient + Clone,
{
    pub fn new(store: S, client: C) -> Self {
        Self {
            cache: EnrichmentCache::new(store),
            transcribe: TranscribeClient::new(client.clone()),
            analysis: AnalysisClient::new(client),
        }
    }

    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis = self.analysis.with_model(model);
        self
    }

    pub async fn analyze(
        &self,
        source_name: &str,
        language: Language,
        audio: AudioSource,
    ) -> Result<ConversationView, Error> {
        let fp = fingerprint(source_name, language.code());

        let (transcript, transcript_hit) = match self
            .cache
            .get::<TranscriptResult>(ArtifactKind::Transcript, &fp)
        {
            Some(transcript) => (transcript, true),
            None => {
                let transcript = match audio {
                    AudioSource::File { bytes, mime } => {
                        self.transcribe.from_audio(bytes, &mime, language).await?
                    }
                    AudioSource::RemoteUrl(url) => {
                        self.transcribe.from_url(&url, language).await?
                    }
                };
                self.store(ArtifactKind::Transcript, &fp, &transcript);
                (transcript, false)
            }
        };

        let (analysis, analysis_hit) = match self
            .cache
            .get::<ConversationAnalysis>(ArtifactKind::Analysis, &fp)
        {
            Some(analysis) => (analysis, true),
            None => {
                let mut analysis = self.analysis.analyze(&transcript, language).await?;
                enrich(&mut analysis, &transcript, language);
                self.store(ArtifactKind::Analysis, &fp, &analysis);
                (analysis, false)
            }
        };

        Ok(ConversationView {
            transcript,
            analysis,
            cache_hit: CacheHit {
                transcript: transcript_hit,
                analysis: analysis_hit,
            },
        })
    }

    /// Drops both cached artifacts so the next `analyze` recomputes from the
    /// audio. This is the user-facing escape hatch for the name-based cache
    /// identity.
    pub fn redo(&self, source_name: &str, language: Language) -> Result<(), Error> {
        Ok(self.cache.invalidate(&fingerprint(source_name, language.code()))?)
    }

    // A failed cache write degrades to recomputing next time; it never fails
    // the analysis the user is waiting on.
    fn store<T: Serialize>(&self, kind: ArtifactKind, fp: &str, value: &T) {
        if let Err(err) = self.cache.put(kind, fp, value) {
            tracing::warn!(%fp, %err, "cache write failed");
        }
    }
}
