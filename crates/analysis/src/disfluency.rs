//! Disfluency span detection over raw turn text.
//!
//! Two passes, in a fixed order: consecutive-repeated-word runs first, then
//! elongated filler sounds. A filler hit whose offset falls inside a range
//! already claimed by the repeat pass is skipped — first writer wins by pass
//! order, not by position. Spans are recomputed from source text on every
//! render cycle and never mutated in place.

use std::sync::LazyLock;

use charla_transcript::Language;
use regex::Regex;

use crate::annotate::{AnnotationKind, AnnotationRange};

/// Elongated interjections, matched on the raw text. Distinct from the
/// scoring filler vocabulary in [`crate::fluency`], which holds ordinary
/// words rather than sounds.
static FILLER_SOUNDS_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mmm+|umm*|uhh*|hmm+|ahhh*)\b").expect("static pattern")
});

static FILLER_SOUNDS_ES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mmm+|ehh*|este|eeeh|ahhh*)\b").expect("static pattern")
});

fn filler_sounds(language: Language) -> &'static Regex {
    match language {
        Language::En => &FILLER_SOUNDS_EN,
        Language::Es => &FILLER_SOUNDS_ES,
    }
}

fn repeat_label(language: Language) -> &'static str {
    match language {
        Language::En => "Repetition",
        Language::Es => "Repetición",
    }
}

fn filler_label(language: Language) -> &'static str {
    match language {
        Language::En => "Filler",
        Language::Es => "Muletilla",
    }
}

/// Detects repeated-word runs and filler sounds in one turn's text.
///
/// Byte-offset spans into `text`, in registration order (repeats before
/// fillers). Callers wanting a renderable sequence feed these through
/// [`crate::annotate::merge_spans`].
pub fn disfluency_spans(text: &str, language: Language) -> Vec<AnnotationRange> {
    let mut ranges = repeated_word_runs(text, language);

    for m in filler_sounds(language).find_iter(text) {
        let claimed = ranges
            .iter()
            .any(|r| m.start() >= r.start && m.start() < r.end);
        if !claimed {
            ranges.push(AnnotationRange {
                start: m.start(),
                end: m.end(),
                kind: AnnotationKind::Stutter,
                label: Some(filler_label(language).to_string()),
            });
        }
    }

    ranges
}

/// One span per run of two or more identical adjacent words ("el el",
/// "sí sí que sí" → "sí sí"). Words are compared case-insensitively with
/// punctuation trimmed from the edges; single-character words never form a
/// run.
fn repeated_word_runs(text: &str, language: Language) -> Vec<AnnotationRange> {
    let tokens = tokens_with_offsets(text);
    let mut ranges = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let core = &tokens[i].core;
        if core.chars().count() < 2 {
            i += 1;
            continue;
        }

        let mut j = i;
        while j + 1 < tokens.len() && tokens[j + 1].core == *core {
            j += 1;
        }

        if j > i {
            ranges.push(AnnotationRange {
                start: tokens[i].start,
                end: tokens[j].end,
                kind: AnnotationKind::Stutter,
                label: Some(repeat_label(language).to_string()),
            });
        }
        i = j + 1;
    }

    ranges
}

struct Token {
    start: usize,
    end: usize,
    core: String,
}

fn tokens_with_offsets(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(make_token(text, s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(make_token(text, s, text.len()));
    }

    tokens
}

fn make_token(text: &str, start: usize, end: usize) -> Token {
    let core = text[start..end]
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    Token { start, end, core }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<AnnotationRange> {
        disfluency_spans(text, Language::Es)
    }

    #[test]
    fn detects_a_repeated_word_run() {
        let text = "y el el problema es otro";
        let found = spans(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "el el");
        assert_eq!(found[0].kind, AnnotationKind::Stutter);
    }

    #[test]
    fn one_span_per_run_not_per_pair() {
        let text = "sí sí sí que sí";
        let found = spans(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "sí sí sí");
    }

    #[test]
    fn detects_filler_sounds() {
        let text = "y ehh no sé qué decir";
        let found = spans(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "ehh");
        assert_eq!(found[0].label.as_deref(), Some("Muletilla"));
    }

    #[test]
    fn filler_inside_a_repeat_run_is_not_double_claimed() {
        // "este este" is a repeat run; the filler pass must not claim the
        // first "este" again.
        let text = "este este problema";
        let found = spans(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label.as_deref(), Some("Repetición"));
    }

    #[test]
    fn single_char_words_never_form_runs() {
        assert!(spans("y y o o vamos").is_empty());
    }

    #[test]
    fn english_fillers_use_the_english_set() {
        let found = disfluency_spans("so umm I think", Language::En);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label.as_deref(), Some("Filler"));

        // "este" is Spanish-only
        assert!(disfluency_spans("este problema", Language::En).is_empty());
    }

    #[test]
    fn punctuation_does_not_break_run_matching() {
        let text = "bueno, bueno vamos";
        let found = spans(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "bueno, bueno");
    }

    #[test]
    fn clean_text_yields_no_spans() {
        assert!(spans("la reunión terminó a tiempo").is_empty());
    }
}
