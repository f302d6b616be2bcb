/// Stylist — centralized constants.
/// Prompts, endpoints, storage keys and limits live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    /// Vision-capable chat model used by the care assistant
    pub const DEFAULT_MODEL: &str = "gpt-4o";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const MAX_TOKENS: u32 = 300;
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const CONVERSATION_KEY: &str = "clothingCareMessages";
}

// ─── Prompts ──────────────────────────────────────────────────────────────────

pub mod prompts {
    pub const SYSTEM: &str = "You are a clothing care assistant. If an image is provided, analyze it and provide care instructions for the clothing item shown.";

    /// Sent in place of the user's text when only an image is attached
    pub const IMAGE_ONLY: &str = "Please analyze this clothing item and provide care instructions.";

    /// Shown as the assistant turn whenever the completion call fails
    pub const REPLY_FALLBACK: &str = "Sorry, I couldn't process your request. Please try again.";
}

// ─── Images ───────────────────────────────────────────────────────────────────

pub mod images {
    pub const JPEG_MIME: &str = "image/jpeg";
    pub const FILE_SCHEME: &str = "file";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "stylist";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const STORE_DIR: &str = "store";
}
