//! Annotation range resolution: merging oracle phrase highlights with locally
//! detected disfluency spans into one ordered, overlap-free sequence per turn.

use charla_transcript::{Language, SpeakerId};

use crate::disfluency::disfluency_spans;
use crate::types::{NotablePhrase, PhraseKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Strong,
    Weak,
    Stutter,
}

impl From<PhraseKind> for AnnotationKind {
    fn from(kind: PhraseKind) -> Self {
        match kind {
            PhraseKind::Strong => AnnotationKind::Strong,
            PhraseKind::Weak => AnnotationKind::Weak,
        }
    }
}

/// A renderable span over the byte offsets of one turn's text.
///
/// Ranges live for a single render cycle; they are recomputed from the
/// phrase list and the turn text, never stored or mutated.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRange {
    pub start: usize,
    pub end: usize,
    pub kind: AnnotationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Resolves all annotations for one turn.
///
/// Oracle phrases belonging to this turn's speaker register first (first
/// case-insensitive occurrence; a phrase whose exact substring is absent is a
/// hallucination and is dropped without error), then locally detected
/// disfluency spans. Registration order is what makes an oracle highlight win
/// over a stutter at the same offset once [`merge_spans`] runs.
pub fn resolve_ranges(
    text: &str,
    phrases: &[NotablePhrase],
    speaker: SpeakerId,
    language: Language,
) -> Vec<AnnotationRange> {
    let mut candidates = Vec::new();
    let lowered = text.to_lowercase();

    for phrase in phrases.iter().filter(|p| p.speaker_id == speaker) {
        let needle = phrase.phrase.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        match lowered.find(&needle) {
            Some(start) => candidates.push(AnnotationRange {
                start,
                end: start + needle.len(),
                kind: phrase.kind.into(),
                label: Some(phrase.note.clone()),
            }),
            // expected-rate oracle noise, not worth surfacing
            None => tracing::trace!(phrase = %phrase.phrase, "phrase not found in turn text"),
        }
    }

    candidates.extend(disfluency_spans(text, language));
    merge_spans(candidates)
}

/// Interval merge with earliest-wins overlap suppression.
///
/// Stable-sorts by start offset (preserving registration order on ties), then
/// sweeps once with an output cursor: any span starting before the cursor is
/// suppressed entirely — no truncation, no splitting. Deterministic for any
/// candidate order with distinct starts; on equal starts the earlier
/// registration wins.
pub fn merge_spans(mut spans: Vec<AnnotationRange>) -> Vec<AnnotationRange> {
    spans.sort_by_key(|s| s.start);

    let mut merged = Vec::with_capacity(spans.len());
    let mut cursor = 0;
    for span in spans {
        if span.start < cursor {
            continue;
        }
        cursor = span.end;
        merged.push(span);
    }
    merged
}

/// One piece of a turn's text after annotation: either plain text or an
/// annotated slice. Gaps between spans come out as `Plain`.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Annotated {
        text: &'a str,
        kind: AnnotationKind,
        label: Option<&'a str>,
    },
}

/// Splits `text` into renderable segments given already-merged spans.
pub fn segments<'a>(text: &'a str, ranges: &'a [AnnotationRange]) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    let mut pos = 0;

    for range in ranges {
        let Some(slice) = text.get(range.start..range.end) else {
            // offsets that do not land on char boundaries cannot be rendered
            continue;
        };
        if range.start > pos {
            if let Some(gap) = text.get(pos..range.start) {
                out.push(Segment::Plain(gap));
            }
        }
        out.push(Segment::Annotated {
            text: slice,
            kind: range.kind,
            label: range.label.as_deref(),
        });
        pos = range.end;
    }

    if pos < text.len() {
        if let Some(rest) = text.get(pos..) {
            out.push(Segment::Plain(rest));
        }
    }

    out
}
