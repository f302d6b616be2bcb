use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylistError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image error: {reference}: {source}")]
    Image {
        reference: String,
        source: std::io::Error,
    },

    #[error("Nothing to send: message text is empty and no image is attached")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StylistError {
    pub fn image(reference: impl Into<String>, source: std::io::Error) -> Self {
        Self::Image {
            reference: reference.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StylistError>;
