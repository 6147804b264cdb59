use thiserror::Error;

use crate::models::MovieId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CatalogError {
    /// Message handed to observers when a fetch fails. Never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Malformed(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::Configuration(err.to_string())
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
