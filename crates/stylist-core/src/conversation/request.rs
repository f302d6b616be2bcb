use super::image::{encode_image, jpeg_data_uri};
use super::message::ImageRef;
use crate::constants::prompts;
use crate::error::{Result, StylistError};
use crate::llm::{ChatTurn, ContentPart};

/// Turns one round of user input into the turns sent to the completion API.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    system_prompt: String,
    image_prompt: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            system_prompt: prompts::SYSTEM.to_string(),
            image_prompt: prompts::IMAGE_ONLY.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Text used when an image is sent without any accompanying words.
    pub fn with_image_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.image_prompt = prompt.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build `[system, user]`. With an image the user turn is the two parts
    /// `[text, image_url]`, in that order.
    pub async fn build(&self, text: &str, image: Option<&ImageRef>) -> Result<Vec<ChatTurn>> {
        let mut turns = vec![ChatTurn::system(&self.system_prompt)];

        match image {
            Some(image) => {
                let encoded = encode_image(image).await?;
                // Whitespace-only text counts as no text, same as the empty-send check.
                let prompt = if text.trim().is_empty() {
                    self.image_prompt.clone()
                } else {
                    text.to_string()
                };
                turns.push(ChatTurn::user_parts(vec![
                    ContentPart::text(prompt),
                    ContentPart::image_url(jpeg_data_uri(&encoded)),
                ]));
            }
            None => {
                if text.trim().is_empty() {
                    return Err(StylistError::EmptyInput);
                }
                turns.push(ChatTurn::user(text));
            }
        }

        Ok(turns)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
