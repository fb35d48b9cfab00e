use crate::language::Language;
use crate::types::TranscriptResult;

/// Renders the transcript the way the analysis oracle expects it: one line
/// per turn, prefixed with the turn index and a lettered speaker label.
///
/// The `[N]` prefixes are the indices the oracle echoes back in
/// `turnIndices` / `selfTurnIndices`, so this rendering and the turn order in
/// [`TranscriptResult`] must stay in lockstep.
pub fn numbered_transcript(transcript: &TranscriptResult, language: Language) -> String {
    transcript
        .turns
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            format!(
                "[{i}] {} {}: {}",
                language.speaker_prefix(),
                speaker_letter(turn.speaker),
                turn.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn speaker_letter(speaker: u32) -> char {
    (b'A' + (speaker % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;

    #[test]
    fn numbers_and_letters_turns() {
        let transcript = TranscriptResult {
            turns: vec![
                Turn::new(0, "hola", 0.0, 1.0),
                Turn::new(1, "buenas", 1.0, 2.0),
            ],
            speaker_count: 2,
            duration_seconds: 2.0,
        };

        let rendered = numbered_transcript(&transcript, Language::Es);
        assert_eq!(rendered, "[0] Hablante A: hola\n[1] Hablante B: buenas");

        let rendered = numbered_transcript(&transcript, Language::En);
        assert!(rendered.starts_with("[0] Speaker A: hola"));
    }
}
