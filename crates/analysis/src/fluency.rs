//! Heuristic fluency scoring over a speaker's concatenated turns.
//!
//! This is deliberately not a statistical model: given the same token
//! sequence and filler vocabulary it is reproducible bit for bit, which is
//! what lets the score be recomputed on every render cycle and still agree
//! with cached values.

use charla_transcript::{Language, SpeakerId, Turn};

/// Minimum tokens before the heuristic has enough signal to score at all.
const MIN_TOKENS: usize = 15;

/// Score returned for short samples. Neutral rather than zero: a speaker who
/// said ten words has not demonstrated disfluency.
const NEUTRAL_SCORE: u8 = 80;

/// Adjacent duplicates are a stronger disfluency signal than fillers.
const REPEAT_WEIGHT: f64 = 1.5;

/// Tuned sensitivity factor mapping the weighted disfluency ratio onto the
/// 0-100 scale. At 250, one filler per 25 tokens costs 10 points.
const SENSITIVITY: f64 = 250.0;

/// Filler vocabulary used for *scoring*. Distinct from the elongated
/// interjections the span detector in [`crate::disfluency`] matches: these
/// are ordinary words that degrade fluency when leaned on.
fn scoring_fillers(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &[
            "um",
            "uh",
            "er",
            "ah",
            "hmm",
            "like",
            "basically",
            "literally",
            "actually",
            "right",
            "so",
            "well",
            "okay",
            "ok",
        ],
        Language::Es => &[
            "eh",
            "este",
            "bueno",
            "mmm",
            "digamos",
            "pues",
            "entonces",
            "igual",
            "tipo",
            "osea",
            "o",
        ],
    }
}

/// Integer fluency score in `[0, 100]` for one speaker.
pub fn fluency_score(turns: &[Turn], speaker: SpeakerId, language: Language) -> u8 {
    let text = turns
        .iter()
        .filter(|t| t.speaker == speaker)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    if tokens.len() < MIN_TOKENS {
        return NEUTRAL_SCORE;
    }

    let repeats = tokens
        .windows(2)
        .filter(|pair| pair[0] == pair[1] && pair[0].chars().count() > 1)
        .count();

    let fillers = scoring_fillers(language);
    let filler_count = tokens.iter().filter(|t| fillers.contains(t)).count();

    let ratio = (repeats as f64 * REPEAT_WEIGHT + filler_count as f64) / tokens.len() as f64;
    (100.0 - ratio * SENSITIVITY).round().clamp(0.0, 100.0) as u8
}
