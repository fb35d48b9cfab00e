//! Markdown export of an analyzed conversation.
//!
//! Rendering is a pure function of the view plus caller-supplied metadata,
//! so the same inputs always produce byte-identical output. Headings follow
//! the transcript's language.

use charla_analysis::{PhraseKind, SpeakerProfile};
use charla_transcript::{Language, SpeakerId};

use crate::pipeline::ConversationView;

pub struct ReportMeta<'a> {
    pub source_name: &'a str,
    /// Pre-formatted date string; passed in so rendering stays reproducible.
    pub date: &'a str,
}

struct Strings {
    title: &'static str,
    file: &'static str,
    date: &'static str,
    participants_meta: &'static str,
    duration: &'static str,
    participants: &'static str,
    words: &'static str,
    talk_time: &'static str,
    interruptions_given: &'static str,
    interruptions_received: &'static str,
    personality: &'static str,
    extraversion: &'static str,
    openness: &'static str,
    agreeableness: &'static str,
    conscientiousness: &'static str,
    neuroticism: &'static str,
    language: &'static str,
    overall: &'static str,
    vocabulary: &'static str,
    grammar: &'static str,
    fluency: &'static str,
    topics: &'static str,
    notable_phrases: &'static str,
    strong_tag: &'static str,
    weak_tag: &'static str,
    transcript: &'static str,
}

const ES: Strings = Strings {
    title: "# Análisis de conversación — Charla",
    file: "Archivo",
    date: "Fecha",
    participants_meta: "Participantes",
    duration: "Duración",
    participants: "## Participantes",
    words: "Palabras",
    talk_time: "Tiempo de habla",
    interruptions_given: "Interrupciones dadas",
    interruptions_received: "Interrupciones recibidas",
    personality: "**Personalidad (Big Five):**",
    extraversion: "Extraversión",
    openness: "Apertura",
    agreeableness: "Amabilidad",
    conscientiousness: "Responsabilidad",
    neuroticism: "Neuroticismo",
    language: "**Lenguaje:**",
    overall: "General",
    vocabulary: "Vocabulario",
    grammar: "Gramática",
    fluency: "Fluidez",
    topics: "**Temas:**",
    notable_phrases: "## Frases destacadas",
    strong_tag: "✓ Destacado",
    weak_tag: "✗ Error",
    transcript: "## Transcripción",
};

const EN: Strings = Strings {
    title: "# Conversation analysis — Charla",
    file: "File",
    date: "Date",
    participants_meta: "Participants",
    duration: "Duration",
    participants: "## Participants",
    words: "Words",
    talk_time: "Talk time",
    interruptions_given: "Interruptions given",
    interruptions_received: "Interruptions received",
    personality: "**Personality (Big Five):**",
    extraversion: "Extraversion",
    openness: "Openness",
    agreeableness: "Agreeableness",
    conscientiousness: "Conscientiousness",
    neuroticism: "Neuroticism",
    language: "**Language:**",
    overall: "Overall",
    vocabulary: "Vocabulary",
    grammar: "Grammar",
    fluency: "Fluency",
    topics: "**Topics:**",
    notable_phrases: "## Notable phrases",
    strong_tag: "✓ Strong",
    weak_tag: "✗ Weak",
    transcript: "## Transcript",
};

pub fn render(view: &ConversationView, meta: &ReportMeta<'_>, language: Language) -> String {
    let s = match language {
        Language::Es => ES,
        Language::En => EN,
    };
    let mut lines: Vec<String> = Vec::new();

    lines.push(s.title.to_string());
    lines.push(format!("**{}:** {}  ", s.file, meta.source_name));
    lines.push(format!("**{}:** {}  ", s.date, meta.date));
    lines.push(format!(
        "**{}:** {}  ",
        s.participants_meta, view.transcript.speaker_count
    ));
    let minutes = (view.transcript.duration_seconds / 60.0).floor() as u64;
    let seconds = (view.transcript.duration_seconds % 60.0).round() as u64;
    lines.push(format!("**{}:** {minutes}m {seconds}s", s.duration));
    lines.push(String::new());

    lines.push(s.participants.to_string());
    for speaker in &view.analysis.speakers {
        lines.push(String::new());
        lines.push(format!("### {}", speaker.label));
        lines.push(format!("- **{}:** {}", s.words, speaker.word_count));
        lines.push(format!("- **{}:** {}%", s.talk_time, speaker.talk_time_percent));
        lines.push(format!(
            "- **{}:** {}",
            s.interruptions_given, speaker.interruptions_given
        ));
        lines.push(format!(
            "- **{}:** {}",
            s.interruptions_received, speaker.interruptions_received
        ));

        lines.push(String::new());
        lines.push(s.personality.to_string());
        lines.push(format!("- {}: {}/100", s.extraversion, speaker.big_five.extraversion));
        lines.push(format!("- {}: {}/100", s.openness, speaker.big_five.openness));
        lines.push(format!("- {}: {}/100", s.agreeableness, speaker.big_five.agreeableness));
        lines.push(format!(
            "- {}: {}/100",
            s.conscientiousness, speaker.big_five.conscientiousness
        ));
        lines.push(format!("- {}: {}/100", s.neuroticism, speaker.big_five.neuroticism));

        lines.push(String::new());
        lines.push(s.language.to_string());
        lines.push(format!("- {}: {}/100", s.overall, speaker.language.overall_score));
        lines.push(format!(
            "- {}: {}/100",
            s.vocabulary, speaker.language.vocabulary_score
        ));
        lines.push(format!("- {}: {}/100", s.grammar, speaker.language.grammar_score));
        lines.push(format!("- {}: {}/100", s.fluency, speaker.fluency_score));

        if !speaker.topics.is_empty() {
            lines.push(String::new());
            lines.push(s.topics.to_string());
            for topic in &speaker.topics {
                lines.push(format!("- {} ({}%)", topic.name, topic.percent));
            }
        }
    }

    if !view.analysis.notable_phrases.is_empty() {
        lines.push(String::new());
        lines.push(s.notable_phrases.to_string());
        for phrase in &view.analysis.notable_phrases {
            let tag = match phrase.kind {
                PhraseKind::Strong => s.strong_tag,
                PhraseKind::Weak => s.weak_tag,
            };
            lines.push(format!(
                "- **[{}]** {tag}: \"{}\" — {}",
                speaker_label(&view.analysis.speakers, phrase.speaker_id, language),
                phrase.phrase,
                phrase.note
            ));
        }
    }

    lines.push(String::new());
    lines.push(s.transcript.to_string());
    lines.push(String::new());
    for turn in &view.transcript.turns {
        lines.push(format!(
            "**{}:** {}  ",
            speaker_label(&view.analysis.speakers, turn.speaker, language),
            turn.text
        ));
    }

    lines.join("\n")
}

fn speaker_label(speakers: &[SpeakerProfile], id: SpeakerId, language: Language) -> String {
    speakers
        .iter()
        .find(|speaker| speaker.id == id)
        .map(|speaker| speaker.label.clone())
        .unwrap_or_else(|| format!("{} {id}", language.speaker_prefix()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::CacheHit;
    use charla_analysis::parse_analysis;
    use charla_transcript::{TranscriptResult, Turn};

    fn view() -> ConversationView {
        let transcript = TranscriptResult {
            turns: vec![
                Turn::new(0, "hola a todos", 0.0, 65.0),
                Turn::new(1, "buenas", 65.0, 90.0),
            ],
            speaker_count: 2,
            duration_seconds: 90.0,
        };
        let analysis = parse_analysis(
            r#"{
                "speakers": [
                    {"id": 0, "label": "Ana", "wordCount": 3, "talkTimePercent": 72,
                     "topics": [{"name": "saludos", "percent": 100, "turnIndices": [0]}]},
                    {"id": 1, "label": "Luis", "wordCount": 1, "talkTimePercent": 28}
                ],
                "notablePhrases": [
                    {"speakerId": 0, "phrase": "hola a todos", "type": "strong", "note": "bien"}
                ]
            }"#,
        )
        .unwrap();
        ConversationView {
            transcript,
            analysis,
            cache_hit: CacheHit::default(),
        }
    }

    #[test]
    fn spanish_report_has_localized_headings() {
        let meta = ReportMeta {
            source_name: "charla.mp3",
            date: "28/8/2026",
        };
        let report = render(&view(), &meta, Language::Es);

        assert!(report.starts_with("# Análisis de conversación"));
        assert!(report.contains("**Archivo:** charla.mp3"));
        assert!(report.contains("**Duración:** 1m 30s"));
        assert!(report.contains("### Ana"));
        assert!(report.contains("- **Tiempo de habla:** 72%"));
        assert!(report.contains("- saludos (100%)"));
        assert!(report.contains("✓ Destacado: \"hola a todos\""));
        assert!(report.contains("## Transcripción"));
        assert!(report.contains("**Luis:** buenas"));
    }

    #[test]
    fn english_report_uses_english_headings() {
        let meta = ReportMeta {
            source_name: "talk.mp3",
            date: "2026-08-28",
        };
        let report = render(&view(), &meta, Language::En);

        assert!(report.starts_with("# Conversation analysis"));
        assert!(report.contains("## Participants"));
        assert!(report.contains("- **Words:** 3"));
        assert!(report.contains("## Transcript"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let meta = ReportMeta {
            source_name: "charla.mp3",
            date: "28/8/2026",
        };
        assert_eq!(
            render(&view(), &meta, Language::Es),
            render(&view(), &meta, Language::Es)
        );
    }

    #[test]
    fn unknown_speaker_falls_back_to_prefixed_id() {
        let mut v = view();
        v.analysis.speakers.clear();
        let meta = ReportMeta {
            source_name: "charla.mp3",
            date: "28/8/2026",
        };
        let report = render(&v, &meta, Language::Es);
        assert!(report.contains("**Hablante 0:** hola a todos"));
    }
}
