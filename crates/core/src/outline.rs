//! Outline records describing a carousel: one cover and a run of question/answer slides.
//!
//! The serde representation is the wire format requested from the completion
//! service, so field names follow that format (`slide_number`, `type`).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fewest question/answer slides the prompt asks for.
pub const MIN_QA_SLIDES: usize = 5;

/// Most question/answer slides the prompt asks for.
pub const MAX_QA_SLIDES: usize = 8;

/// Discriminant tag carried by a cover record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverKind {
    Cover,
}

/// Discriminant tag carried by a question/answer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QaKind {
    Qa,
}

/// The first slide of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverRecord {
    #[serde(rename = "slide_number")]
    position: i64,

    #[serde(rename = "type")]
    kind: CoverKind,

    title: String,

    subtitle: String,
}

impl CoverRecord {
    /// Create a cover record at position 1.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            position: 1,
            kind: CoverKind::Cover,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Advisory slide position reported by the model.
    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn kind(&self) -> CoverKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }
}

/// One question/answer slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    #[serde(rename = "slide_number")]
    position: i64,

    #[serde(rename = "type")]
    kind: QaKind,

    question: String,

    answer: String,
}

impl QaRecord {
    /// Create a question/answer record at the given slide position.
    pub fn new(position: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            position,
            kind: QaKind::Qa,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Advisory slide position reported by the model.
    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn kind(&self) -> QaKind {
        self.kind
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// A complete carousel outline: one cover followed by question/answer slides
/// in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    cover: CoverRecord,
    qa_slides: Vec<QaRecord>,
}

impl Outline {
    /// Create an outline from a cover and its question/answer slides.
    pub fn new(cover: CoverRecord, qa_slides: Vec<QaRecord>) -> Self {
        Self { cover, qa_slides }
    }

    pub fn cover(&self) -> &CoverRecord {
        &self.cover
    }

    pub fn qa_slides(&self) -> &[QaRecord] {
        &self.qa_slides
    }

    /// Number of slides a rendered deck will contain.
    pub fn slide_count(&self) -> usize {
        1 + self.qa_slides.len()
    }
}

/// JSON Schema of the outline wire format, handed to the completion service
/// as the target shape.
pub fn outline_schema() -> Value {
    json!({
        "title": "Carousel",
        "type": "object",
        "properties": {
            "cover": {
                "type": "object",
                "properties": {
                    "slide_number": {
                        "type": "integer",
                        "description": "Position of this slide in the carousel (must be 1)"
                    },
                    "type": {
                        "const": "cover",
                        "description": "Always 'cover' for the first slide"
                    },
                    "title": { "type": "string" },
                    "subtitle": { "type": "string" }
                },
                "required": ["slide_number", "type", "title", "subtitle"]
            },
            "qa_slides": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "slide_number": { "type": "integer" },
                        "type": {
                            "const": "qa",
                            "description": "'qa' for every question-answer slide"
                        },
                        "question": { "type": "string" },
                        "answer": { "type": "string" }
                    },
                    "required": ["slide_number", "type", "question", "answer"]
                }
            }
        },
        "required": ["cover", "qa_slides"]
    })
}
