//! The per-submission generation pipeline and its collaborator seams.
//!
//! Prompt builder, completion service, outline validator and deck renderer run
//! strictly in sequence. Nothing is shared between runs.

use crate::artifact::DeckArtifact;
use crate::error::Result;
use crate::outline::{outline_schema, Outline};
use crate::prompt::build_prompt;
use crate::submission::Submission;
use crate::validator::OutlineValidator;
use serde_json::Value;

/// An external model capable of free-text and structured completions.
pub trait CompletionService {
    /// Complete a prompt as free text.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Restate `text` as a JSON document conforming to `schema`.
    ///
    /// The returned text is validated by the caller; an implementation does
    /// not need to guarantee conformance.
    fn extract(&self, text: &str, schema: &Value) -> Result<String>;
}

impl<T: CompletionService + ?Sized> CompletionService for &T {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }

    fn extract(&self, text: &str, schema: &Value) -> Result<String> {
        (**self).extract(text, schema)
    }
}

/// Serializes a validated outline into a presentation document.
pub trait DeckRenderer {
    /// Render an outline. Never fails for a valid outline under normal operation.
    fn render(&self, outline: &Outline) -> Result<Vec<u8>>;
}

impl<T: DeckRenderer + ?Sized> DeckRenderer for &T {
    fn render(&self, outline: &Outline) -> Result<Vec<u8>> {
        (**self).render(outline)
    }
}

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct Generated {
    pub outline: Outline,
    pub artifact: DeckArtifact,
}

/// Runs one submission from topic to rendered deck.
pub struct CarouselPipeline<C, R> {
    completion: C,
    renderer: R,
    validator: OutlineValidator,
}

impl<C: CompletionService, R: DeckRenderer> CarouselPipeline<C, R> {
    /// Create a pipeline with an advisory validator.
    pub fn new(completion: C, renderer: R) -> Self {
        Self {
            completion,
            renderer,
            validator: OutlineValidator::new(),
        }
    }

    /// Replace the outline validator.
    pub fn with_validator(mut self, validator: OutlineValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Ask the completion service for an outline of `topic`.
    pub fn outline(&self, topic: &str) -> Result<Outline> {
        let prompt = build_prompt(topic);
        log::debug!("Requesting free-text outline ({} prompt bytes)", prompt.len());
        let draft = self.completion.complete(&prompt)?;

        log::debug!("Requesting structured outline ({} draft bytes)", draft.len());
        let structured = self.completion.extract(&draft, &outline_schema())?;

        self.validator.validate_str(&structured)
    }

    /// Render an outline into a downloadable deck.
    pub fn render(&self, topic: &str, outline: &Outline) -> Result<DeckArtifact> {
        let bytes = self.renderer.render(outline)?;
        Ok(DeckArtifact::pptx(topic, bytes, outline.slide_count()))
    }

    /// Run the whole pipeline for a submission.
    ///
    /// Only the topic is read here. The credential is bound when the
    /// [`CompletionService`] is constructed (see `GroqClient::new`), so it
    /// is never forwarded through the pipeline.
    pub fn run(&self, submission: &Submission) -> Result<Generated> {
        let outline = self.outline(submission.topic())?;
        let artifact = self.render(submission.topic(), &outline)?;
        log::info!(
            "Generated {} ({} slides, {} bytes)",
            artifact.file_name,
            artifact.slide_count,
            artifact.bytes.len()
        );
        Ok(Generated { outline, artifact })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    /// Completion service returning canned replies and recording its inputs.
    struct CannedService {
        structured: String,
        prompts: RefCell<Vec<String>>,
    }

    impl CannedService {
        fn new(structured: impl Into<String>) -> Self {
            Self {
                structured: structured.into(),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionService for CannedService {
        fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok("Topic: Game Theory\nSubtitle: Outsmart, don't outspend".to_string())
        }

        fn extract(&self, _text: &str, schema: &Value) -> Result<String> {
            assert!(schema["properties"]["qa_slides"].is_object());
            Ok(self.structured.clone())
        }
    }

    struct FailingService;

    impl CompletionService for FailingService {
        fn complete(&self, _prompt: &str) -> Result<String> {
            Err(Error::Transport("HTTP 401: invalid api key".to_string()))
        }

        fn extract(&self, _text: &str, _schema: &Value) -> Result<String> {
            unreachable!("extract is never reached after a failed completion")
        }
    }

    /// Renderer writing one line per slide so tests can count them.
    struct LineRenderer;

    impl DeckRenderer for LineRenderer {
        fn render(&self, outline: &Outline) -> Result<Vec<u8>> {
            let mut out = format!("{}\n", outline.cover().title());
            for qa in outline.qa_slides() {
                out.push_str(qa.question());
                out.push('\n');
            }
            Ok(out.into_bytes())
        }
    }

    fn game_theory_json() -> String {
        serde_json::json!({
            "cover": {"slide_number": 1, "type": "cover", "title": "Game Theory", "subtitle": "Outsmart, don't outspend"},
            "qa_slides": [
                {"slide_number": 2, "type": "qa", "question": "What is a Nash equilibrium?", "answer": "A state where no player benefits from changing strategy alone."},
                {"slide_number": 3, "type": "qa", "question": "What is a zero-sum game?", "answer": "One player's gain is another's loss."},
                {"slide_number": 4, "type": "qa", "question": "What is a dominant strategy?", "answer": "A strategy that is best regardless of what others do."},
                {"slide_number": 5, "type": "qa", "question": "What is the prisoner's dilemma?", "answer": "Two rational players fail to cooperate."},
                {"slide_number": 6, "type": "qa", "question": "Where is game theory used?", "answer": "Economics, biology, politics and computing."}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_run_produces_artifact() {
        let service = CannedService::new(game_theory_json());
        let pipeline = CarouselPipeline::new(&service, LineRenderer);
        let submission = Submission::new("Game Theory", "gsk_test").unwrap();

        let generated = pipeline.run(&submission).unwrap();

        assert_eq!(generated.artifact.slide_count, 6);
        assert_eq!(
            generated.artifact.file_name,
            "LinkedIn_Carousel_Game_Theory.pptx"
        );
        let text = String::from_utf8(generated.artifact.bytes).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert_eq!(text.lines().nth(1), Some("What is a Nash equilibrium?"));

        let prompts = service.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Topic: Game Theory"));
    }

    #[test]
    fn test_prose_reply_is_schema_violation() {
        let service = CannedService::new("Game theory studies strategic interaction.");
        let pipeline = CarouselPipeline::new(service, LineRenderer);
        let submission = Submission::new("Game Theory", "gsk_test").unwrap();

        let err = pipeline.run(&submission).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let pipeline = CarouselPipeline::new(FailingService, LineRenderer);
        let submission = Submission::new("Game Theory", "gsk_test").unwrap();

        let err = pipeline.run(&submission).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_strict_validator_applies() {
        let service = CannedService::new(game_theory_json());
        let pipeline = CarouselPipeline::new(&service, LineRenderer)
            .with_validator(OutlineValidator::new().with_enforce_qa_count(true));
        assert!(pipeline.outline("Game Theory").is_ok());
    }
}
