#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("oracle transport failed: {0}")]
    Http(charla_http::Error),
    #[error("oracle response carried no text content")]
    EmptyResponse,
    #[error("no JSON object found in oracle response")]
    MalformedResponse,
    #[error("oracle response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Analysis(#[from] charla_analysis::Error),
}
