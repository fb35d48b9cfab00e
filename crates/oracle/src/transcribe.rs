use charla_http::HttpClient;
use charla_transcript::{Language, TranscriptResult};

use crate::error::Error;

/// Client for the diarizing transcription service.
///
/// The service accepts either raw audio bytes or a pointer to remotely hosted
/// audio, and returns speaker-attributed turns with timestamps.
pub struct TranscribeClient<C> {
    client: C,
}

impl<C: HttpClient> TranscribeClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn from_audio(
        &self,
        audio: Vec<u8>,
        mime: &str,
        language: Language,
    ) -> Result<TranscriptResult, Error> {
        let path = format!("/v1/transcribe?language={}", language.code());
        let bytes = self
            .client
            .post(&path, audio, mime)
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn from_url(
        &self,
        url: &str,
        language: Language,
    ) -> Result<TranscriptResult, Error> {
        let path = format!("/v1/transcribe?language={}", language.code());
        let body = serde_json::to_vec(&serde_json::json!({ "url": url }))?;
        let bytes = self
            .client
            .post(&path, body, "application/json")
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
