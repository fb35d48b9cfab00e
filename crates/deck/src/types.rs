use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideLayout {
    Title,
    Content,
    Quote,
}

/// One slide as authored by the oracle.
///
/// `id` is the stability anchor: the oracle is contractually required (via
/// its system prompt) to keep ids stable across calls that refer to the same
/// conceptual slide, which is what lets a renderer animate revisions in
/// place instead of rebuilding the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub layout: SlideLayout,
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub accent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckState {
    #[serde(default)]
    pub deck_title: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// Outcome of one slide-authoring oracle call.
///
/// The core never diffs or merges slide arrays: either the oracle said
/// nothing changed, or its returned deck replaces the previous one wholesale.
#[derive(Debug, Clone)]
pub enum DeckRevision {
    NoChange,
    Replace(DeckState),
}

#[derive(Deserialize)]
struct NoChangeSentinel {
    #[serde(rename = "noChange")]
    no_change: bool,
}

impl DeckRevision {
    /// Interprets an oracle response object: the explicit
    /// `{"noChange": true}` sentinel, or a full replacement deck.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if let Ok(sentinel) = NoChangeSentinel::deserialize(value) {
            if sentinel.no_change {
                return Ok(DeckRevision::NoChange);
            }
        }
        Ok(DeckRevision::Replace(DeckState::deserialize(value)?))
    }
}
