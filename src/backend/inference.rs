//! Remote inference backend: page image → chat-completions call → text.
//!
//! The page PNG travels as a base64 data URL inside an OpenAI-style
//! `/v1/chat/completions` request. The transcription instruction is sent
//! twice — once as the system message and once as the text part of the
//! user turn next to the image — because some local servers weigh the
//! message adjacent to the image more heavily.
//!
//! The request is non-streaming, near-zero temperature, and carries no
//! output-length cap; the client sets no timeout since a local model may
//! legitimately take minutes on a dense page. Any failure — transport,
//! status, shape — is a per-page [`BackendError`] for the caller to
//! absorb. No retries.

use crate::config::InferenceConfig;
use crate::error::BackendError;
use crate::prompts::{DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::{BackendKind, TextBackend};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: i64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

/// System messages carry a plain string; the user turn carries parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Chat-completions response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Backend that extracts text through a local chat-completions server.
pub struct InferenceBackend {
    config: InferenceConfig,
    client: Client,
}

impl InferenceBackend {
    /// Create a backend for the given endpoint/model/prompt settings.
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    /// Build the request body for one page image (already base64-encoded).
    fn build_request(&self, image_base64: &str) -> ChatRequest {
        let system = self
            .config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let user = self
            .config
            .user_prompt
            .as_deref()
            .unwrap_or(DEFAULT_USER_PROMPT);

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:image/png;base64,{}", image_base64),
                            },
                        },
                        ContentPart::Text {
                            text: user.to_string(),
                        },
                    ]),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        }
    }
}

/// Pull the first completion's message content out of a response body.
fn parse_reply(body: &str) -> Result<String, BackendError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedReply(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| BackendError::MalformedReply("response has no choices".to_string()))
}

#[async_trait]
impl TextBackend for InferenceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Inference
    }

    async fn extract_text(&self, image_path: &Path) -> Result<String, BackendError> {
        let image_bytes = tokio::fs::read(image_path).await?;
        let image_base64 = STANDARD.encode(&image_bytes);
        debug!(
            "Encoded {} → {} bytes base64",
            image_path.display(),
            image_base64.len()
        );

        let request = self.build_request(&image_base64);
        let response = self
            .client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> InferenceBackend {
        InferenceBackend::new(InferenceConfig::default())
    }

    #[test]
    fn completions_url_appends_route() {
        let backend = backend();
        assert_eq!(
            backend.completions_url(),
            "http://localhost:1234/v1/chat/completions"
        );

        let mut config = InferenceConfig::default();
        config.endpoint = "http://10.0.0.5:8080/".to_string();
        let backend = InferenceBackend::new(config);
        assert_eq!(
            backend.completions_url(),
            "http://10.0.0.5:8080/v1/chat/completions"
        );
    }

    #[test]
    fn request_body_shape() {
        let request = backend().build_request("QUJD");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "google/gemma-3-27b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], -1);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);

        // System turn is a plain instruction string.
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], DEFAULT_SYSTEM_PROMPT);

        // User turn carries the image part first, then the repeated text.
        assert_eq!(messages[1]["role"], "user");
        let parts = messages[1]["content"].as_array().unwrap();
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(
            parts[0]["image_url"]["url"],
            "data:image/png;base64,QUJD"
        );
        assert_eq!(parts[1]["type"], "text");
        assert_eq!(parts[1]["text"], DEFAULT_USER_PROMPT);
    }

    #[test]
    fn prompt_overrides_reach_the_request() {
        let mut config = InferenceConfig::default();
        config.system_prompt = Some("transcribe".to_string());
        config.user_prompt = Some("read the page".to_string());
        let request = InferenceBackend::new(config).build_request("QUJD");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["messages"][0]["content"], "transcribe");
        assert_eq!(json["messages"][1]["content"][1]["text"], "read the page");
    }

    #[test]
    fn parse_reply_extracts_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Page one text."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        assert_eq!(parse_reply(body).unwrap(), "Page one text.");
    }

    #[test]
    fn parse_reply_rejects_empty_choices() {
        let result = parse_reply(r#"{"choices": []}"#);
        assert!(matches!(result, Err(BackendError::MalformedReply(_))));
    }

    #[test]
    fn parse_reply_rejects_non_json() {
        let result = parse_reply("model is still loading");
        assert!(matches!(result, Err(BackendError::MalformedReply(_))));
    }

    #[test]
    fn parse_reply_rejects_missing_content() {
        let result = parse_reply(r#"{"choices": [{"message": {"role": "assistant"}}]}"#);
        assert!(matches!(result, Err(BackendError::MalformedReply(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("page-001.png");
        std::fs::write(&image, b"\x89PNG\r\n\x1a\n").unwrap();

        let mut config = InferenceConfig::default();
        // Port 1 is never a chat-completions server.
        config.endpoint = "http://127.0.0.1:1".to_string();

        let result = InferenceBackend::new(config).extract_text(&image).await;
        assert!(matches!(result, Err(BackendError::Http(_))));
    }

    #[tokio::test]
    async fn missing_image_is_an_io_error() {
        let result = backend()
            .extract_text(Path::new("/no/such/page-001.png"))
            .await;
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
