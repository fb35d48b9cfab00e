use charla_analysis::{ConversationAnalysis, parse_analysis};
use charla_http::HttpClient;
use charla_transcript::{Language, TranscriptResult, numbered_transcript, stats};

use crate::error::Error;
use crate::prompt;
use crate::types::{Message, MessageRequest, MessageResponse};

pub const DEFAULT_ANALYSIS_MODEL: &str = "claude-sonnet-4-6";

const MAX_TOKENS: u32 = 5000;

/// Client for the conversation-analysis oracle.
///
/// Locally computed word counts and talk-time percentages ride along in the
/// user message as ground truth; the oracle contributes only the qualitative
/// judgments. The returned analysis is raw, callers run
/// [`charla_analysis::enrich`] to overwrite the locally owned fields.
pub struct AnalysisClient<C> {
    client: C,
    model: String,
}

impl<C: HttpClient> AnalysisClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn analyze(
        &self,
        transcript: &TranscriptResult,
        language: Language,
    ) -> Result<ConversationAnalysis, Error> {
        let transcript_text = numbered_transcript(transcript, language);
        let stats_json = serde_json::to_string_pretty(&serde_json::json!({
            "wordCounts": stats::word_counts(transcript),
            "talkTimePercent": stats::talk_time_percents(transcript),
        }))?;

        let system = prompt::analysis_system(language);
        let request = MessageRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: &system,
            messages: vec![Message::user(prompt::analysis_user(
                &transcript_text,
                &stats_json,
            ))],
        };

        let bytes = self
            .client
            .post("/v1/messages", serde_json::to_vec(&request)?, "application/json")
            .await
            .map_err(Error::Http)?;

        let response: MessageResponse = serde_json::from_slice(&bytes)?;
        let text = response.text().ok_or(Error::EmptyResponse)?;
        tracing::debug!(chars = text.len(), "analysis oracle replied");
        Ok(parse_analysis(text)?)
    }
}
