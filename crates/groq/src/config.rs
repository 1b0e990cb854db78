//! Connection settings for the Groq API.

use std::time::Duration;

/// Default Groq API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Settings for a [`GroqClient`](crate::GroqClient). The credential is passed
/// separately.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API origin, without the `/openai/v1` suffix.
    pub base_url: String,

    /// Model identifier.
    pub model: String,

    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl GroqConfig {
    /// Create a config with the default origin and model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different API origin (e.g. a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}
