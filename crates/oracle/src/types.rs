//! Messages-API wire shapes shared by the analysis and slides clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl MessageResponse {
    /// Text of the first text block, if any. Non-text blocks (tool use,
    /// thinking) are skipped.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_block_wins() {
        let response: MessageResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "{\"speakers\": []}"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("{\"speakers\": []}"));
    }

    #[test]
    fn empty_content_has_no_text() {
        let response: MessageResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }
}
