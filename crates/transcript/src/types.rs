pub type SpeakerId = u32;

/// One contiguous utterance by a single speaker.
///
/// Turns are immutable once produced by the transcription service. The
/// position in [`TranscriptResult::turns`] is the `turnIndex` every other
/// entity (topics, interruptions, self-reference lists) uses to point at a
/// moment in the conversation, so turns are never reordered or removed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub speaker: SpeakerId,
    pub text: String,
    /// Seconds from the start of the recording.
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    pub turns: Vec<Turn>,
    pub speaker_count: u32,
    pub duration_seconds: f64,
}

impl Turn {
    pub fn new(speaker: SpeakerId, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            speaker,
            text: text.into(),
            start,
            end,
        }
    }
}
