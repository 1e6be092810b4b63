use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

impl From<serde_json::error::Error> for AgentError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}
