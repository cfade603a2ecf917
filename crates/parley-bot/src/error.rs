use parley_store::StoreError;
use parley_types::ActivityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Required correlation data (the conversation id) is absent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Recognized event whose value is malformed
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<ActivityError> for ExchangeError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::MissingConversationId => ExchangeError::InvalidRequest(err.to_string()),
            ActivityError::InvalidTopic(_) => ExchangeError::InvalidPayload(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
