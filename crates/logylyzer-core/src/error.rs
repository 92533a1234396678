use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid service name: {0:?}")]
    InvalidServiceName(String),

    #[error("invalid date (expected YYYY-MM-DD): {0:?}")]
    InvalidDate(String),
}
