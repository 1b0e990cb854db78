//! Core domain types, prompt building, outline validation, and the generation
//! pipeline for square carousel decks.

pub mod artifact;
pub mod error;
pub mod format;
pub mod outline;
pub mod pipeline;
pub mod prompt;
pub mod submission;
pub mod types;
pub mod validator;

pub use artifact::{deck_file_name, DeckArtifact, PPTX_CONTENT_TYPE};
pub use error::{Error, Result};
pub use format::SlideTextFormatter;
pub use outline::{outline_schema, CoverKind, CoverRecord, Outline, QaKind, QaRecord};
pub use pipeline::{CarouselPipeline, CompletionService, DeckRenderer, Generated};
pub use prompt::build_prompt;
pub use submission::Submission;
pub use types::{DeckSummary, SlideSummary, TextRegion, TextStyle};
pub use validator::OutlineValidator;
