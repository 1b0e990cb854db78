//! Prompt text sent to the model for a carousel topic.

/// Instructional scaffold placed before the topic-specific reply format.
pub const PROMPT_SCAFFOLD: &str = "You are an expert content strategist.";

/// Build the outline prompt for a topic.
///
/// Pure substitution into a fixed template; the caller guarantees the topic
/// is non-empty.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "{PROMPT_SCAFFOLD}\n\
\n\
Topic: {topic}\n\
\n\
Task:\n\
1. Write an inspiring one-liner subtitle for the cover slide.\n\
2. Then identify between 5 and 8 key questions someone would ask about this topic.\n\
3. For each question, provide a concise (2-3 line) answer.\n\
\n\
Format your reply exactly as:\n\
\n\
Topic: {topic}\n\
Subtitle: <your one-liner>\n\
\n\
Questions & Answers:\n\
1. Question: <question 1>\n   Answer: <answer 1>\n\
\n\
2. Question: <question 2>\n   Answer: <answer 2>\n\
..."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_topic_and_scaffold() {
        let prompt = build_prompt("Game Theory");
        assert!(prompt.starts_with(PROMPT_SCAFFOLD));
        assert!(prompt.contains("Topic: Game Theory\n"));
        assert!(prompt.contains("between 5 and 8 key questions"));
        assert!(prompt.contains("2-3 line"));
    }

    #[test]
    fn test_prompt_keeps_topic_verbatim() {
        let topic = "  Rust's {borrow} checker & you  ";
        assert!(build_prompt(topic).contains(topic));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("Caching"), build_prompt("Caching"));
    }
}
