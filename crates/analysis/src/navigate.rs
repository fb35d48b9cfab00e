//! Round-robin navigation over event occurrences.
//!
//! Pure state-machine logic: a cursor per (event kind, scope) key so repeated
//! "jump to next occurrence" requests cycle through every match without
//! repeats-in-a-row or dead ends. No timeouts, no I/O.

use std::collections::HashMap;

use charla_transcript::{Language, SpeakerId, TranscriptResult};

use crate::disfluency::disfluency_spans;
use crate::types::{ConversationAnalysis, PhraseKind, SpeakerTopic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptionRole {
    Giver,
    Receiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTarget {
    Strong,
    Weak,
    Stutter,
    SelfReference,
}

/// Composite cursor key: event kind plus optional scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavKey {
    Interruption {
        speaker: SpeakerId,
        role: InterruptionRole,
    },
    Annotation(AnnotationTarget),
    Topic {
        speaker: SpeakerId,
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTopic {
    pub speaker: SpeakerId,
    pub name: String,
}

/// Result of a topic selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicAction {
    /// Scope is now active; carries the turn index to scroll to, if the
    /// topic has any occurrences.
    Activated(Option<usize>),
    /// Same scope selected twice in a row: explicit toggle-off, no advance.
    Cleared,
}

#[derive(Debug, Default)]
pub struct Navigator {
    cursors: HashMap<NavKey, usize>,
    active_topic: Option<ActiveTopic>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cyclic advance through `matches` for this key.
    ///
    /// Empty matches are a no-op returning `None` — no event fires and the
    /// cursor is untouched. Otherwise returns `matches[cursor % len]` and
    /// steps the cursor for the next call.
    pub fn advance<'a, T>(&mut self, key: NavKey, matches: &'a [T]) -> Option<&'a T> {
        if matches.is_empty() {
            return None;
        }
        let cursor = self.cursors.entry(key).or_insert(0);
        let selected = &matches[*cursor % matches.len()];
        *cursor = (*cursor + 1) % matches.len();
        Some(selected)
    }

    /// Topic scope selection with toggle-off semantics.
    ///
    /// Selecting the scope that is already active clears it; selecting any
    /// other scope activates it and advances through the topic's turn list.
    pub fn toggle_topic(&mut self, speaker: SpeakerId, topic: &SpeakerTopic) -> TopicAction {
        let scope = ActiveTopic {
            speaker,
            name: topic.name.clone(),
        };

        if self.active_topic.as_ref() == Some(&scope) {
            self.active_topic = None;
            return TopicAction::Cleared;
        }

        self.active_topic = Some(scope);
        let key = NavKey::Topic {
            speaker,
            name: topic.name.clone(),
        };
        TopicAction::Activated(self.advance(key, &topic.turn_indices).copied())
    }

    pub fn active_topic(&self) -> Option<&ActiveTopic> {
        self.active_topic.as_ref()
    }
}

/// Turn indices of interruption events where `speaker` played `role`,
/// in transcript order as declared by the oracle.
pub fn interruption_matches(
    analysis: &ConversationAnalysis,
    speaker: SpeakerId,
    role: InterruptionRole,
) -> Vec<usize> {
    analysis
        .interruption_turns
        .iter()
        .filter(|event| match role {
            InterruptionRole::Giver => event.giver == speaker,
            InterruptionRole::Receiver => event.receiver == speaker,
        })
        .map(|event| event.turn_index)
        .collect()
}

/// Turn indices matching an annotation target, for the round-robin cursor.
pub fn annotation_matches(
    target: AnnotationTarget,
    transcript: &TranscriptResult,
    analysis: &ConversationAnalysis,
    language: Language,
) -> Vec<usize> {
    match target {
        AnnotationTarget::Strong => phrase_turns(transcript, analysis, PhraseKind::Strong),
        AnnotationTarget::Weak => phrase_turns(transcript, analysis, PhraseKind::Weak),
        AnnotationTarget::Stutter => transcript
            .turns
            .iter()
            .enumerate()
            .filter(|(_, turn)| !disfluency_spans(&turn.text, language).is_empty())
            .map(|(i, _)| i)
            .collect(),
        AnnotationTarget::SelfReference => {
            let mut indices: Vec<usize> = analysis
                .speakers
                .iter()
                .flat_map(|s| s.self_turn_indices.iter().copied())
                .collect();
            indices.sort_unstable();
            indices.dedup();
            indices
        }
    }
}

fn phrase_turns(
    transcript: &TranscriptResult,
    analysis: &ConversationAnalysis,
    kind: PhraseKind,
) -> Vec<usize> {
    transcript
        .turns
        .iter()
        .enumerate()
        .filter(|(_, turn)| {
            let lowered = turn.text.to_lowercase();
            analysis.notable_phrases.iter().any(|p| {
                p.kind == kind
                    && p.speaker_id == turn.speaker
                    && lowered.contains(&p.phrase.to_lowercase())
            })
        })
        .map(|(i, _)| i)
        .collect()
}
