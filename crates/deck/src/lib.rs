pub mod events;
pub mod session;
pub mod types;

pub use events::{DeckEvent, DeckRuntime, DeckStatus};
pub use session::{BoxError, BoxFuture, DeckConfig, DeckSession, SlideOracle};
pub use types::{DeckRevision, DeckState, Slide, SlideLayout};
