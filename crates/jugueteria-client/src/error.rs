// Error surface of the API client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] jugueteria_core::SessionError),
}
