use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed presence frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
    #[error("donation feed request failed: {0}")]
    FeedRequest(#[from] reqwest::Error),
}
