//! Analysis oracle schema.
//!
//! Everything in this module crosses the oracle trust boundary: the JSON is
//! produced by an external model and must be treated as untrusted input.
//! Collection fields all carry `#[serde(default)]` so a missing field comes
//! back as empty rather than failing the whole response; a response with no
//! JSON object at all is a hard error and is never partially applied.

use charla_transcript::SpeakerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no JSON object found in oracle response")]
    MalformedResponse,
    #[error("oracle JSON does not match the analysis schema: {0}")]
    Schema(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BigFive {
    #[serde(default)]
    pub openness: u8,
    #[serde(default)]
    pub conscientiousness: u8,
    #[serde(default)]
    pub extraversion: u8,
    #[serde(default)]
    pub agreeableness: u8,
    #[serde(default)]
    pub neuroticism: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    #[serde(default)]
    pub overall_score: u8,
    #[serde(default)]
    pub vocabulary_score: u8,
    #[serde(default)]
    pub grammar_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerTopic {
    pub name: String,
    #[serde(default)]
    pub percent: u32,
    #[serde(default)]
    pub turn_indices: Vec<usize>,
}

/// One speaker's profile: oracle-provided subjective scores plus the locally
/// computed fields that [`crate::enrich`] overwrites after every oracle call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerProfile {
    pub id: SpeakerId,
    pub label: String,
    #[serde(default)]
    pub talk_time_percent: u32,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub interruptions_given: u32,
    #[serde(default)]
    pub interruptions_received: u32,
    #[serde(default)]
    pub big_five: BigFive,
    #[serde(default)]
    pub language: LanguageProfile,
    #[serde(default)]
    pub fluency_score: u8,
    #[serde(default)]
    pub topics: Vec<SpeakerTopic>,
    #[serde(default)]
    pub self_turn_indices: Vec<usize>,
    #[serde(default)]
    pub self_reference_percent: u8,
    #[serde(default)]
    pub other_reference_percent: u8,
    #[serde(default)]
    pub energy: Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseKind {
    Strong,
    Weak,
}

/// An exact-substring highlight anchor. The phrase may be hallucinated, in
/// which case the range resolver drops it without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotablePhrase {
    pub speaker_id: SpeakerId,
    pub phrase: String,
    #[serde(rename = "type")]
    pub kind: PhraseKind,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterruptionEvent {
    pub giver: SpeakerId,
    pub receiver: SpeakerId,
    pub turn_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAnalysis {
    #[serde(default)]
    pub speakers: Vec<SpeakerProfile>,
    #[serde(default)]
    pub overall_topics: Vec<String>,
    #[serde(default)]
    pub dynamics: String,
    #[serde(default)]
    pub notable_phrases: Vec<NotablePhrase>,
    #[serde(default)]
    pub interruption_turns: Vec<InterruptionEvent>,
}

/// Slices the first-`{` to last-`}` region out of free-form model output.
///
/// Oracle responses may wrap the JSON in prose despite instructions; this is
/// the same recovery the response contract allows for. Returns `None` when no
/// object-shaped region exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

/// Parses a raw oracle response into a [`ConversationAnalysis`].
///
/// Tagged-result contract: either the whole response validates, or the caller
/// gets an error. Nothing is guessed from a half-parsable blob.
pub fn parse_analysis(raw: &str) -> Result<ConversationAnalysis, Error> {
    let json = extract_json_object(raw).ok_or(Error::MalformedResponse)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_from_surrounding_prose() {
        let raw = "Sure! Here is the JSON:\n{\"speakers\": []}\nHope that helps.";
        assert_eq!(extract_json_object(raw), Some("{\"speakers\": []}"));
    }

    #[test]
    fn no_object_is_a_hard_failure() {
        assert!(matches!(
            parse_analysis("I could not analyze this."),
            Err(Error::MalformedResponse)
        ));
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let analysis = parse_analysis(
            r#"{"speakers": [{"id": 0, "label": "Ana"}], "dynamics": "calm"}"#,
        )
        .unwrap();

        let ana = &analysis.speakers[0];
        assert!(ana.self_turn_indices.is_empty());
        assert!(ana.topics.is_empty());
        assert_eq!(ana.energy, Energy::Medium);
        assert!(analysis.notable_phrases.is_empty());
        assert!(analysis.interruption_turns.is_empty());
    }

    #[test]
    fn phrase_kind_uses_the_type_field() {
        let phrase: NotablePhrase = serde_json::from_str(
            r#"{"speakerId": 1, "phrase": "fuimos yo y él", "type": "weak", "note": "order"}"#,
        )
        .unwrap();
        assert_eq!(phrase.kind, PhraseKind::Weak);
    }
}
