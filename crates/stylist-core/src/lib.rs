pub mod error;
pub mod constants;
pub mod config;
pub mod llm;
pub mod storage;
pub mod conversation;
pub mod services;

// Re-export key types
pub use error::StylistError;
pub use config::Settings;
pub use llm::{ChatTurn, CompletionClient, ContentPart, ImageUrl, OpenAIClient, Role, TurnContent};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use conversation::{
    Author, ConversationSession, Draft, ImageRef, Message, MessageStore, RequestBuilder,
    SendOutcome,
};
pub use services::{ServiceId, StylingService};
