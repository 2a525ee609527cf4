use std::fmt;

/// Error types that can occur while answering a chat turn.
#[derive(Debug)]
pub enum BotlyError {
    /// HTTP request/response errors
    HttpError(String),
    /// Invalid request parameters or format
    InvalidRequest(String),
    /// Errors returned by the model server
    ProviderError(String),
    /// Prompt template rendering errors
    TemplateError(String),
    /// JSON serialization/deserialization errors
    JsonError(String),
}

impl fmt::Display for BotlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotlyError::HttpError(e) => write!(f, "HTTP Error: {}", e),
            BotlyError::InvalidRequest(e) => write!(f, "Invalid Request: {}", e),
            BotlyError::ProviderError(e) => write!(f, "Provider Error: {}", e),
            BotlyError::TemplateError(e) => write!(f, "Template Error: {}", e),
            BotlyError::JsonError(e) => write!(f, "JSON Parse Error: {}", e),
        }
    }
}

impl std::error::Error for BotlyError {}

/// Converts reqwest HTTP errors into BotlyErrors
impl From<reqwest::Error> for BotlyError {
    fn from(err: reqwest::Error) -> Self {
        BotlyError::HttpError(err.to_string())
    }
}
