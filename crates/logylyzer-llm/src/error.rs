use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Request(String),

    #[error("inference endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("client config error: {0}")]
    Config(String),
}
