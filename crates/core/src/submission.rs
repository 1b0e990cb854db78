//! Inbound boundary: the topic and credential a user submits.

use crate::error::{Error, Result};
use std::fmt;

/// A validated form submission.
///
/// Both fields are guaranteed non-empty once constructed.
#[derive(Clone)]
pub struct Submission {
    topic: String,
    api_key: String,
}

impl Submission {
    /// Validate a topic and credential.
    ///
    /// Whitespace-only values count as missing. The topic is kept verbatim.
    pub fn new(topic: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let topic = topic.into();
        let api_key = api_key.into();

        if topic.trim().is_empty() {
            return Err(Error::Input("Please enter a topic.".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(Error::Input("Please enter your Groq API key.".to_string()));
        }

        Ok(Self {
            topic,
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keep the credential out of logs and panic messages.
impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("topic", &self.topic)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
