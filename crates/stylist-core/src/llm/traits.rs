use crate::constants::prompts;
use crate::error::StylistError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageUrl {
    pub url: String,
}

/// One part of a multi-modal user turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Turn content is either a bare string or an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl TurnContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TurnContent::Text(text) => Some(text),
            TurnContent::Parts(_) => None,
        }
    }

    pub fn parts(&self) -> Option<&[ContentPart]> {
        match self {
            TurnContent::Text(_) => None,
            TurnContent::Parts(parts) => Some(parts),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: TurnContent,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Parts(parts),
        }
    }
}

/// A remote chat-completion endpoint.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the turns and return the text of the first completion choice.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, StylistError>;

    /// Like [`complete`](Self::complete), but never fails: any error is logged
    /// and replaced with the fixed fallback reply.
    async fn reply(&self, turns: &[ChatTurn]) -> String {
        match self.complete(turns).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Completion request failed: {e}");
                prompts::REPLY_FALLBACK.to_string()
            }
        }
    }
}
