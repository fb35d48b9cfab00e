mod pipeline;
pub mod report;

pub use pipeline::{AudioSource, CacheHit, ConversationView, Error, Pipeline};
