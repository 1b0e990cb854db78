//! Error types for carousel generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or inspecting a carousel deck.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input (topic or credential) was missing at the boundary.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The completion could not be coerced into the outline shape.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The completion service call failed (network, auth, rate limit).
    #[error("Completion service failure: {0}")]
    Transport(String),

    /// Rendering a valid outline failed. This indicates a defect.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Failed to parse an existing deck.
    #[error("Deck parsing error: {0}")]
    DeckParse(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML reading or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Short message suitable for showing to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Input(msg) => msg.clone(),
            Error::SchemaViolation(_) => {
                "The model's reply could not be turned into a carousel. Please try again.".to_string()
            }
            Error::Transport(msg) => format!("Could not reach the completion service: {}", msg),
            other => format!("Something went wrong: {}", other),
        }
    }
}
