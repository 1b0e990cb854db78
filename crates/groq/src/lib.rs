//! Groq backend for carousel outline generation.
//!
//! Talks to Groq's OpenAI-compatible chat-completions endpoint. Free-text
//! completion and JSON-mode extraction are exposed through
//! [`carousel_core::CompletionService`].

pub mod client;
pub mod config;

pub use client::GroqClient;
pub use config::{GroqConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
