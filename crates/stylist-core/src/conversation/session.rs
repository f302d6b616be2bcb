use std::sync::Arc;

use super::message::{ImageRef, Message};
use super::request::RequestBuilder;
use super::store::MessageStore;
use crate::error::Result;
use crate::llm::CompletionClient;
use crate::storage::KeyValueStore;

/// Unsent input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub image: Option<ImageRef>,
}

impl Draft {
    /// Blank text and no image: nothing worth sending.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The draft was empty; no message was created and nothing was sent.
    Skipped,
    Replied { user: Message, reply: Message },
}

/// Owned state of one assistant conversation: the persisted log, the current
/// draft and the collaborators a send needs.
pub struct ConversationSession {
    store: MessageStore,
    draft: Draft,
    builder: RequestBuilder,
    client: Arc<dyn CompletionClient>,
}

impl ConversationSession {
    /// Open the conversation stored under `key`, starting empty when nothing
    /// readable is there.
    pub async fn open(
        kv: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        builder: RequestBuilder,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            store: MessageStore::load(kv, key).await,
            draft: Draft::default(),
            builder,
            client,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Message> {
        self.store.newest_first()
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    /// Replaces any image already attached.
    pub fn attach_image(&mut self, image: ImageRef) {
        self.draft.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.draft.image = None;
    }

    /// Send the draft as one user turn and record the assistant's reply.
    ///
    /// The request is built before anything is appended, so an unreadable
    /// image returns `Err` with the draft untouched and no message recorded.
    /// Transport failures never surface here: they become the fallback reply.
    pub async fn send(&mut self) -> Result<SendOutcome> {
        if self.draft.is_empty() {
            tracing::debug!("Ignoring send of empty draft");
            return Ok(SendOutcome::Skipped);
        }

        let turns = self
            .builder
            .build(&self.draft.text, self.draft.image.as_ref())
            .await?;

        let draft = std::mem::take(&mut self.draft);
        let user = Message::user(self.store.next_id(), draft.text, draft.image);
        self.store.append(user.clone());

        let text = self.client.reply(&turns).await;
        let reply = Message::assistant(self.store.next_id(), text);
        self.store.append(reply.clone());

        Ok(SendOutcome::Replied { user, reply })
    }

    /// Wait for pending persistence writes.
    pub async fn flush(&self) {
        self.store.flush().await;
    }
}
