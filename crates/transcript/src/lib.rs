pub mod language;
pub mod render;
pub mod stats;
pub mod types;

pub use language::{Language, ParseLanguageError};
pub use render::numbered_transcript;
pub use stats::{count_words, talk_time_percents, turn_counts, word_counts};
pub use types::{SpeakerId, TranscriptResult, Turn};
