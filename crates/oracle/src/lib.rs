mod analysis;
mod error;
pub mod prompt;
mod slides;
mod transcribe;
mod types;

#[cfg(test)]
mod testing;

pub use analysis::{AnalysisClient, DEFAULT_ANALYSIS_MODEL};
pub use error::Error;
pub use slides::{DEFAULT_SLIDES_MODEL, SlidesClient};
pub use transcribe::TranscribeClient;
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse};
