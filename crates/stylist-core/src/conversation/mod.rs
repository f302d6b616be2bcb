//! The clothing care conversation: message log, request construction and the
//! session that ties them to a completion client.

mod message;
mod store;
mod request;
pub mod image;
mod session;

pub use message::{Author, ImageRef, Message, MessageIds};
pub use store::MessageStore;
pub use request::RequestBuilder;
pub use session::{ConversationSession, Draft, SendOutcome};
