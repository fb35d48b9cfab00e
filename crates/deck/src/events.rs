use crate::types::DeckState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckStatus {
    Idle,
    Listening,
    Updating,
    Done,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type")]
pub enum DeckEvent {
    #[serde(rename = "statusChanged")]
    StatusChanged {
        session_id: String,
        status: DeckStatus,
    },
    #[serde(rename = "deckUpdated")]
    DeckUpdated {
        session_id: String,
        deck: DeckState,
    },
    #[serde(rename = "deckFailed")]
    Failed { session_id: String, error: String },
}

/// Sink for session events. The embedding layer (a UI bridge, a CLI, a test)
/// decides what an emit means.
pub trait DeckRuntime: Send + Sync {
    fn emit(&self, event: DeckEvent);
}
