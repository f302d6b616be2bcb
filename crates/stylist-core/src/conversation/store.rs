use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::message::{Message, MessageIds};
use crate::storage::KeyValueStore;

enum WriteOp {
    Save(String),
    Flush(oneshot::Sender<()>),
}

/// Single background task that applies saves in the order they were
/// scheduled. Failures are logged and dropped.
struct PersistWriter {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl PersistWriter {
    fn spawn(kv: Arc<dyn KeyValueStore>, key: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(op) = rx.recv().await {
                match op {
                    WriteOp::Save(blob) => {
                        if let Err(e) = kv.set(&key, &blob).await {
                            tracing::error!(key = %key, "Failed to save messages: {e}");
                        }
                    }
                    WriteOp::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        Self { tx }
    }

    fn schedule(&self, blob: String) {
        if self.tx.send(WriteOp::Save(blob)).is_err() {
            tracing::error!("Message writer stopped; conversation kept in memory only");
        }
    }

    async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(WriteOp::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

/// Append-only conversation log, held oldest-first and mirrored to a
/// key-value store under one key.
pub struct MessageStore {
    key: String,
    messages: Vec<Message>,
    ids: MessageIds,
    writer: PersistWriter,
}

impl MessageStore {
    /// Hydrate from `kv`. Never fails: unreadable or missing data starts an
    /// empty conversation. Must be called from within a tokio runtime.
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let messages = match kv.get(&key).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Message>>(&blob) {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(key = %key, "Error loading messages, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, "Error loading messages, starting empty: {e}");
                Vec::new()
            }
        };

        tracing::debug!(key = %key, count = messages.len(), "Loaded conversation");

        let ids = MessageIds::after(messages.iter().map(Message::id).max());
        let writer = PersistWriter::spawn(kv, key.clone());

        Self {
            key,
            messages,
            ids,
            writer,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Messages in append order (oldest first).
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Display order: newest message first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Allocate the id for the next message.
    pub fn next_id(&mut self) -> i64 {
        self.ids.next()
    }

    /// Append and schedule a best-effort write of the whole log. The in-memory
    /// append stands whether or not the write succeeds.
    pub fn append(&mut self, message: Message) -> &[Message] {
        self.ids.observe(message.id());
        self.messages.push(message);

        match serde_json::to_string(&self.messages) {
            Ok(blob) => self.writer.schedule(blob),
            Err(e) => tracing::error!(key = %self.key, "Failed to serialize messages: {e}"),
        }

        &self.messages
    }

    /// Wait until every write scheduled so far has been attempted.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_append_returns_updated_sequence() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let mut store = MessageStore::load(kv, "k").await;

        let id = store.next_id();
        let messages = store.append(Message::user(id, "first", None));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "first");
    }

    #[tokio::test]
    async fn test_newest_first_reverses_append_order() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let mut store = MessageStore::load(kv, "k").await;

        for text in ["a", "b", "c"] {
            let id = store.next_id();
            store.append(Message::user(id, text, None));
        }

        let shown: Vec<&str> = store.newest_first().map(Message::text).collect();
        assert_eq!(shown, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set("k", "{not json").await.unwrap();

        let store = MessageStore::load(kv, "k").await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_ids_continue_after_loaded_messages() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let far_future = chrono::Utc::now().timestamp_millis() + 60_000;
        let blob = serde_json::to_string(&vec![Message::assistant(far_future, "old")]).unwrap();
        kv.set("k", &blob).await.unwrap();

        let mut store = MessageStore::load(kv, "k").await;
        assert_eq!(store.next_id(), far_future + 1);
    }
}
