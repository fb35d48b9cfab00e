use charla_analysis::extract_json_object;
use charla_deck::{BoxError, BoxFuture, DeckRevision, DeckState, SlideOracle};
use charla_http::HttpClient;

use crate::error::Error;
use crate::prompt;
use crate::types::{Message, MessageRequest, MessageResponse};

pub const DEFAULT_SLIDES_MODEL: &str = "claude-haiku-4-5-20251001";

const MAX_TOKENS: u32 = 2048;

/// Client for the slide-authoring oracle.
///
/// Each call sends the full transcript so far plus the deck as it currently
/// stands, and maps the reply onto [`DeckRevision`]: the no-change sentinel
/// or a wholesale replacement deck.
#[derive(Clone)]
pub struct SlidesClient<C> {
    client: C,
    model: String,
}

impl<C: HttpClient> SlidesClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            model: DEFAULT_SLIDES_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn propose(
        &self,
        transcript: &str,
        current: &DeckState,
    ) -> Result<DeckRevision, Error> {
        let current_json = serde_json::to_string_pretty(current)?;
        let system = prompt::slides_system();
        let request = MessageRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: &system,
            messages: vec![Message::user(prompt::slides_user(&current_json, transcript))],
        };

        let bytes = self
            .client
            .post("/v1/messages", serde_json::to_vec(&request)?, "application/json")
            .await
            .map_err(Error::Http)?;

        let response: MessageResponse = serde_json::from_slice(&bytes)?;
        let text = response.text().ok_or(Error::EmptyResponse)?;
        let json = extract_json_object(text).ok_or(Error::MalformedResponse)?;
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(DeckRevision::from_json(&value)?)
    }
}

impl<C> SlideOracle for SlidesClient<C>
where
    C: HttpClient + Clone + 'static,
{
    fn revise(
        &self,
        transcript: String,
        current: DeckState,
    ) -> BoxFuture<Result<DeckRevision, BoxError>> {
        let client = self.clone();
        Box::pin(async move {
            client
                .propose(&transcript, &current)
                .await
                .map_err(|err| Box::new(err) as BoxError)
        })
    }
}
