pub mod annotate;
pub mod disfluency;
pub mod enrich;
pub mod fluency;
pub mod metrics;
pub mod navigate;
pub mod types;

pub use annotate::{AnnotationKind, AnnotationRange, Segment, merge_spans, resolve_ranges, segments};
pub use disfluency::disfluency_spans;
pub use enrich::enrich;
pub use fluency::fluency_score;
pub use metrics::self_reference_percents;
pub use navigate::{
    ActiveTopic, AnnotationTarget, InterruptionRole, NavKey, Navigator, TopicAction,
    annotation_matches, interruption_matches,
};
pub use types::{
    BigFive, ConversationAnalysis, Energy, Error, InterruptionEvent, LanguageProfile,
    NotablePhrase, PhraseKind, SpeakerProfile, SpeakerTopic, extract_json_object, parse_analysis,
};
