use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::images;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// Reference to a local image: a plain path or a `file://` URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path the reference points at. `file:` URIs (including the
    /// `file://localhost/` form) are resolved by the URL parser; anything else
    /// is taken as a path verbatim.
    pub fn to_path(&self) -> PathBuf {
        match Url::parse(&self.0) {
            Ok(url) if url.scheme() == images::FILE_SCHEME => url
                .to_file_path()
                .unwrap_or_else(|_| PathBuf::from(&self.0)),
            _ => PathBuf::from(&self.0),
        }
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the conversation log. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    id: i64,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImageRef>,
    author: Author,
}

impl Message {
    pub fn user(id: i64, text: impl Into<String>, image: Option<ImageRef>) -> Self {
        Self {
            id,
            text: text.into(),
            image,
            author: Author::User,
        }
    }

    pub fn assistant(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            image: None,
            author: Author::Assistant,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Millisecond-timestamp ids that never repeat or go backwards, even when two
/// messages are created within the same millisecond or the clock steps back.
#[derive(Debug, Clone, Default)]
pub struct MessageIds {
    last: Option<i64>,
}

impl MessageIds {
    /// Continue after the highest id already in use.
    pub fn after(last: Option<i64>) -> Self {
        Self { last }
    }

    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(id);
        id
    }

    /// Record an id allocated elsewhere so later ids stay above it.
    pub fn observe(&mut self, id: i64) {
        if self.last.map_or(true, |last| id > last) {
            self.last = Some(id);
        }
    }
}
