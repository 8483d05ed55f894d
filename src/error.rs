use std::fmt::{self, Display, Formatter};

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed : {0}")]
    Transport(String),
    #[error("API error : {0}")]
    Api(#[from] ApiError),
    #[error("malformed JSON : {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid origin {0} : {1}")]
    InvalidOrigin(String, url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// An error payload returned by the REST API.
///
/// Magento answers with `{"message": "...", "parameters": ...}` whenever a
/// request is rejected, regardless of the HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub parameters: Option<Value>,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(parameters) = &self.parameters {
            write!(f, " {}", parameters)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
