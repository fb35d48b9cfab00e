//! Locally computed per-speaker statistics.
//!
//! Word counts and talk-time percentages are always derived here, from turn
//! text and timestamps — never taken from the analysis oracle. They are passed
//! *into* the oracle call as ground truth so its qualitative judgments can
//! reference real numbers instead of re-deriving them.

use std::collections::BTreeMap;

use crate::types::{SpeakerId, TranscriptResult};

/// Whitespace token count. Shared by the speaker stats and by the live deck
/// loop's minimum-new-words gate.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn word_counts(transcript: &TranscriptResult) -> BTreeMap<SpeakerId, usize> {
    let mut counts = BTreeMap::new();
    for turn in &transcript.turns {
        *counts.entry(turn.speaker).or_insert(0) += count_words(&turn.text);
    }
    counts
}

pub fn turn_counts(transcript: &TranscriptResult) -> BTreeMap<SpeakerId, usize> {
    let mut counts = BTreeMap::new();
    for turn in &transcript.turns {
        *counts.entry(turn.speaker).or_insert(0) += 1;
    }
    counts
}

/// Share of total speaking time per speaker, rounded to whole percents.
///
/// Rounding means the values sum to 100 only within ±(speaker count). A
/// transcript with zero total duration yields 0 for every speaker.
pub fn talk_time_percents(transcript: &TranscriptResult) -> BTreeMap<SpeakerId, u32> {
    let mut time: BTreeMap<SpeakerId, f64> = BTreeMap::new();
    for turn in &transcript.turns {
        *time.entry(turn.speaker).or_insert(0.0) += turn.end - turn.start;
    }

    let total: f64 = time.values().sum();
    time.into_iter()
        .map(|(speaker, t)| {
            let percent = if total > 0.0 {
                (t / total * 100.0).round() as u32
            } else {
                0
            };
            (speaker, percent)
        })
        .collect()
}
