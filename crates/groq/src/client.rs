//! Blocking chat-completions client implementing [`CompletionService`].

use crate::config::GroqConfig;
use carousel_core::{CompletionService, Error, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error code Groq returns when JSON mode output fails to parse.
const JSON_VALIDATE_FAILED: &str = "json_validate_failed";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Groq API client. Holds the credential for the lifetime of one submission.
pub struct GroqClient {
    http: Client,
    api_key: String,
    config: GroqConfig,
}

impl GroqClient {
    /// Create a client for a credential.
    pub fn new(api_key: impl Into<String>, config: GroqConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            config,
        })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    /// Send one chat request and return the first choice's content.
    fn chat(&self, messages: Vec<ChatMessage<'_>>, json_mode: bool) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        log::debug!(
            "POST {} (model {}, json mode {})",
            self.config.chat_completions_url(),
            self.config.model,
            json_mode
        );

        let response = self
            .http
            .post(self.config.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| Error::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| Error::Transport(format!("Unexpected response body: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Transport("Response contained no message content".to_string()))?;

        log::debug!("Received {} bytes of completion", content.len());
        Ok(content)
    }
}

/// Map a non-success HTTP response to an error.
fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.error.code.as_deref() == Some(JSON_VALIDATE_FAILED) => {
            Error::SchemaViolation(parsed.error.message)
        }
        Ok(parsed) => Error::Transport(format!("HTTP {}: {}", status, parsed.error.message)),
        Err(_) if body.trim().is_empty() => Error::Transport(format!("HTTP {}", status)),
        Err(_) => Error::Transport(format!("HTTP {}: {}", status, body.trim())),
    }
}

impl CompletionService for GroqClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.chat(
            vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            false,
        )
    }

    fn extract(&self, text: &str, schema: &Value) -> Result<String> {
        let instructions = format!(
            "Convert the user's text into JSON. Reply with a single JSON object that \
             conforms to this JSON Schema and nothing else:\n{}",
            schema
        );
        self.chat(
            vec![
                ChatMessage {
                    role: "system",
                    content: &instructions,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            true,
        )
    }
}

impl fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClient")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const PATH: &str = "/openai/v1/chat/completions";

    fn client(server: &MockServer) -> GroqClient {
        GroqClient::new("gsk_test", GroqConfig::new().with_base_url(server.base_url())).unwrap()
    }

    fn reply(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_complete_sends_prompt_with_credential() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("authorization", "Bearer gsk_test")
                .json_body_partial(r#"{"model": "llama-3.3-70b-versatile"}"#)
                .body_contains(r#"{"role":"user","content":"hello"}"#);
            then.status(200).json_body(reply("Topic: Game Theory"));
        });

        let text = client(&server).complete("hello").unwrap();

        mock.assert();
        assert_eq!(text, "Topic: Game Theory");
    }

    #[test]
    fn test_extract_uses_json_mode() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .json_body_partial(r#"{"response_format": {"type": "json_object"}}"#)
                .body_contains("qa_slides");
            then.status(200).json_body(reply(r#"{"cover": {}}"#));
        });

        let schema = json!({"properties": {"qa_slides": {}}});
        let text = client(&server).extract("draft", &schema).unwrap();

        mock.assert();
        assert_eq!(text, r#"{"cover": {}}"#);
    }

    #[test]
    fn test_auth_failure_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(401).json_body(json!({
                "error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}
            }));
        });

        let err = client(&server).complete("hello").unwrap_err();
        match err {
            Error::Transport(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API Key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_json_validation_failure_is_schema_violation() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(400).json_body(json!({
                "error": {"message": "Failed to generate JSON", "type": "invalid_request_error", "code": "json_validate_failed"}
            }));
        });

        let err = client(&server)
            .extract("draft", &json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[test]
    fn test_empty_choices_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(json!({"choices": []}));
        });

        let err = client(&server).complete("hello").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let client = GroqClient::new("gsk_secret", GroqConfig::new()).unwrap();
        assert!(!format!("{:?}", client).contains("gsk_secret"));
    }

    #[test]
    fn test_api_error_plain_body() {
        let err = api_error(503, "upstream unavailable");
        assert_eq!(
            err.to_string(),
            "Completion service failure: HTTP 503: upstream unavailable"
        );
    }
}
