use crate::validation::Field;

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Value for {0} required!")]
    MissingField(Field),
    #[error("The conditional request failed")]
    ConditionalWriteRejected,
    #[error("{0}")]
    StoreOperationFailed(String),
    #[error("missing configuration for global secondary index partition key")]
    MissingQueryConfiguration,
    #[error("missing query parameter for global secondary index {0}")]
    MissingQueryParameter(String),
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
