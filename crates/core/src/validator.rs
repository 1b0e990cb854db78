//! Outline validation for structured completions.
//!
//! Locates the JSON object in a completion, decodes it into an [`Outline`],
//! and checks the parts of the shape that serde cannot express.

use crate::error::{Error, Result};
use crate::outline::{Outline, MAX_QA_SLIDES, MIN_QA_SLIDES};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex to pull the body of the first Markdown code fence.
static FENCED_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").unwrap());

/// Locate the JSON object inside a completion.
///
/// Accepts a bare object, an object inside a code fence, or an object
/// surrounded by prose. The first `{` that starts a complete JSON object
/// wins; anything after that object is ignored, braces included.
fn locate_json_object(completion: &str) -> Option<&str> {
    let fenced = FENCED_BLOCK_REGEX
        .captures(completion)
        .and_then(|caps| caps.get(1))
        .and_then(|m| first_json_object(m.as_str()));

    fenced.or_else(|| first_json_object(completion))
}

/// Return the first complete JSON object in `text`.
fn first_json_object(text: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(rel) = text[offset..].find('{') {
        let start = offset + rel;
        let candidate = &text[start..];
        let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        if let Some(Ok(Value::Object(_))) = stream.next() {
            return Some(&candidate[..stream.byte_offset()]);
        }
        offset = start + 1;
    }
    None
}

/// Validator turning completion text into a well-typed [`Outline`].
///
/// Slide positions and the question count are advisory by default: findings
/// are logged and the outline is still accepted. Either check can be made
/// strict.
#[derive(Debug, Clone, Default)]
pub struct OutlineValidator {
    /// Reject outlines whose positions do not match sequence order.
    strict_positions: bool,

    /// Reject outlines with a question count outside 5..=8.
    enforce_qa_count: bool,
}

impl OutlineValidator {
    /// Create a validator with advisory position and count checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether mismatched slide positions are rejected.
    pub fn with_strict_positions(mut self, strict: bool) -> Self {
        self.strict_positions = strict;
        self
    }

    /// Set whether a question count outside 5..=8 is rejected.
    pub fn with_enforce_qa_count(mut self, enforce: bool) -> Self {
        self.enforce_qa_count = enforce;
        self
    }

    /// Validate raw completion text.
    pub fn validate_str(&self, completion: &str) -> Result<Outline> {
        let json = locate_json_object(completion).ok_or_else(|| {
            Error::SchemaViolation("completion does not contain a JSON object".to_string())
        })?;

        let outline: Outline = serde_json::from_str(json)
            .map_err(|e| Error::SchemaViolation(format!("outline does not match shape: {}", e)))?;

        self.check(outline)
    }

    /// Validate an already-parsed JSON value.
    pub fn validate_value(&self, value: serde_json::Value) -> Result<Outline> {
        let outline: Outline = serde_json::from_value(value)
            .map_err(|e| Error::SchemaViolation(format!("outline does not match shape: {}", e)))?;

        self.check(outline)
    }

    /// Check the constraints serde does not cover.
    pub fn check(&self, outline: Outline) -> Result<Outline> {
        let cover = outline.cover();
        require_text("cover title", cover.title())?;
        require_text("cover subtitle", cover.subtitle())?;

        let qa_slides = outline.qa_slides();
        if qa_slides.is_empty() {
            return Err(Error::SchemaViolation(
                "outline has no question/answer slides".to_string(),
            ));
        }

        for (idx, qa) in qa_slides.iter().enumerate() {
            require_text(&format!("question {}", idx + 1), qa.question())?;
            require_text(&format!("answer {}", idx + 1), qa.answer())?;
        }

        self.check_positions(&outline)?;
        self.check_qa_count(qa_slides.len())?;

        log::debug!(
            "Validated outline '{}' with {} question/answer slides",
            cover.title(),
            qa_slides.len()
        );

        Ok(outline)
    }

    fn check_positions(&self, outline: &Outline) -> Result<()> {
        let expected = 1i64..;
        let actual = std::iter::once(outline.cover().position())
            .chain(outline.qa_slides().iter().map(|qa| qa.position()));

        for (want, got) in expected.zip(actual) {
            if want != got {
                let msg = format!("slide at position {} reports slide_number {}", want, got);
                if self.strict_positions {
                    return Err(Error::SchemaViolation(msg));
                }
                log::warn!("{} (rendering in sequence order)", msg);
                break;
            }
        }

        Ok(())
    }

    fn check_qa_count(&self, count: usize) -> Result<()> {
        if (MIN_QA_SLIDES..=MAX_QA_SLIDES).contains(&count) {
            return Ok(());
        }

        let msg = format!(
            "outline has {} question/answer slides, expected {} to {}",
            count, MIN_QA_SLIDES, MAX_QA_SLIDES
        );
        if self.enforce_qa_count {
            return Err(Error::SchemaViolation(msg));
        }
        log::warn!("{}", msg);
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::SchemaViolation(format!("{} is empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn qa_slides(count: usize) -> Vec<serde_json::Value> {
        (0..count)
            .map(|i| {
                json!({
                    "slide_number": i + 2,
                    "type": "qa",
                    "question": format!("Question {}?", i + 1),
                    "answer": format!("Answer {}.", i + 1),
                })
            })
            .collect()
    }

    fn payload(count: usize) -> serde_json::Value {
        json!({
            "cover": {
                "slide_number": 1,
                "type": "cover",
                "title": "Game Theory",
                "subtitle": "Outsmart, don't outspend"
            },
            "qa_slides": qa_slides(count),
        })
    }

    #[test]
    fn test_valid_payload() {
        let outline = OutlineValidator::new()
            .validate_str(&payload(5).to_string())
            .unwrap();
        assert_eq!(outline.cover().title(), "Game Theory");
        assert_eq!(outline.qa_slides().len(), 5);
        assert_eq!(outline.qa_slides()[0].question(), "Question 1?");
    }

    #[test]
    fn test_fenced_payload() {
        let completion = format!("Here you go:\n```json\n{}\n```\nEnjoy!", payload(6));
        let outline = OutlineValidator::new().validate_str(&completion).unwrap();
        assert_eq!(outline.qa_slides().len(), 6);
    }

    #[test]
    fn test_payload_surrounded_by_prose() {
        let completion = format!("Sure! {} Let me know if you need more.", payload(5));
        assert!(OutlineValidator::new().validate_str(&completion).is_ok());
    }

    #[test]
    fn test_braces_in_trailing_prose() {
        let completion = format!("{} (use {{braces}} sparingly)", payload(5));
        let outline = OutlineValidator::new().validate_str(&completion).unwrap();
        assert_eq!(outline.qa_slides().len(), 5);

        let completion = format!("Wrap {{names}} in braces: {} and {{this}} too", payload(6));
        let outline = OutlineValidator::new().validate_str(&completion).unwrap();
        assert_eq!(outline.qa_slides().len(), 6);
    }

    #[test]
    fn test_first_of_two_fences_wins() {
        let completion = format!(
            "```json\n{}\n```\nOr a shorter one:\n```json\n{}\n```",
            payload(5),
            payload(7)
        );
        let outline = OutlineValidator::new().validate_str(&completion).unwrap();
        assert_eq!(outline.qa_slides().len(), 5);
    }

    #[test]
    fn test_plain_prose_is_rejected() {
        let err = OutlineValidator::new()
            .validate_str("Game theory is the study of strategic decision making.")
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_missing_cover_is_rejected() {
        let value = json!({ "qa_slides": qa_slides(5) });
        let err = OutlineValidator::new().validate_value(value).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_zero_qa_slides_is_rejected() {
        let err = OutlineValidator::new()
            .validate_value(payload(0))
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_wrong_tag_is_rejected() {
        let mut value = payload(5);
        value["qa_slides"][2]["type"] = json!("cover");
        let err = OutlineValidator::new().validate_value(value).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));

        let mut value = payload(5);
        value["cover"]["type"] = json!("title");
        assert!(OutlineValidator::new().validate_value(value).is_err());
    }

    #[test]
    fn test_non_integer_position_is_rejected() {
        let mut value = payload(5);
        value["qa_slides"][0]["slide_number"] = json!(2.5);
        assert!(OutlineValidator::new().validate_value(value).is_err());

        let mut value = payload(5);
        value["cover"]["slide_number"] = json!("one");
        assert!(OutlineValidator::new().validate_value(value).is_err());
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut value = payload(5);
        value["qa_slides"][1]["answer"] = json!("   ");
        let err = OutlineValidator::new().validate_value(value).unwrap_err();
        assert!(err.to_string().contains("answer 2"));
    }

    #[test]
    fn test_positions_advisory_by_default() {
        let mut value = payload(5);
        value["qa_slides"][0]["slide_number"] = json!(7);
        let outline = OutlineValidator::new().validate_value(value).unwrap();
        assert_eq!(outline.qa_slides()[0].position(), 7);
    }

    #[test]
    fn test_negative_position_follows_strictness() {
        let mut value = payload(5);
        value["qa_slides"][0]["slide_number"] = json!(-1);
        let outline = OutlineValidator::new().validate_value(value.clone()).unwrap();
        assert_eq!(outline.qa_slides()[0].position(), -1);

        let err = OutlineValidator::new()
            .with_strict_positions(true)
            .validate_value(value)
            .unwrap_err();
        assert!(err.to_string().contains("slide_number -1"));

        let mut value = payload(5);
        value["cover"]["slide_number"] = json!(5_000_000_000i64);
        assert!(OutlineValidator::new().validate_value(value).is_ok());
    }

    #[test]
    fn test_positions_strict() {
        let validator = OutlineValidator::new().with_strict_positions(true);
        assert!(validator.validate_value(payload(5)).is_ok());

        let mut value = payload(5);
        value["cover"]["slide_number"] = json!(0);
        assert!(matches!(
            validator.validate_value(value),
            Err(Error::SchemaViolation(_))
        ));

        let mut value = payload(5);
        value["qa_slides"][3]["slide_number"] = json!(3);
        assert!(validator.validate_value(value).is_err());
    }

    #[test]
    fn test_count_bound() {
        assert!(OutlineValidator::new().validate_value(payload(3)).is_ok());
        assert!(OutlineValidator::new().validate_value(payload(9)).is_ok());

        let validator = OutlineValidator::new().with_enforce_qa_count(true);
        assert!(validator.validate_value(payload(4)).is_err());
        assert!(validator.validate_value(payload(5)).is_ok());
        assert!(validator.validate_value(payload(8)).is_ok());
        assert!(validator.validate_value(payload(9)).is_err());
    }

    #[test]
    fn test_locate_json_object() {
        assert_eq!(locate_json_object("  {\"a\":1}  "), Some("{\"a\":1}"));
        assert_eq!(locate_json_object("```\n{\"a\":1}\n```"), Some("{\"a\":1}"));
        assert_eq!(locate_json_object("no braces here"), None);
        assert_eq!(locate_json_object("} backwards {"), None);
        assert_eq!(
            locate_json_object("see {this} then {\"a\":{\"b\":2}} and {that}"),
            Some("{\"a\":{\"b\":2}}")
        );
    }
}
