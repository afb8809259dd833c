//! Groq API client for chat functionality.
//!
//! Groq serves an OpenAI-compatible `chat/completions` endpoint; this client
//! sends one non-streaming request per call and never retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, Usage};
use crate::error::LLMError;

/// Default Groq endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Configuration for the Groq client.
#[derive(Debug)]
pub struct GroqConfig {
    /// API key for authentication with Groq.
    pub api_key: SecretString,
    /// Endpoint root, always ending with `/`.
    pub base_url: Url,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for interacting with Groq's API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct Groq {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<GroqConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct GroqChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: Vec<GroqChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct GroqChatResponse {
    choices: Vec<GroqChatChoice>,
    usage: Option<Usage>,
}

impl std::fmt::Display for GroqChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

#[derive(Deserialize, Debug)]
struct GroqChatChoice {
    message: GroqChatMsg,
}

#[derive(Deserialize, Debug)]
struct GroqChatMsg {
    content: Option<String>,
}

impl ChatResponse for GroqChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl Groq {
    pub fn new(
        api_key: SecretString,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        Self::with_client(
            Client::new(),
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout_seconds,
        )
    }

    /// Creates a new Groq client with a custom HTTP client.
    pub fn with_client(
        client: Client,
        api_key: SecretString,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(Self {
            config: Arc::new(GroqConfig {
                api_key,
                base_url,
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens,
                temperature,
                timeout_seconds,
            }),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.config.timeout_seconds
    }

    fn endpoint(&self) -> Result<Url, LLMError> {
        self.config
            .base_url
            .join("chat/completions")
            .map_err(|err| LLMError::InvalidRequest(format!("invalid Groq endpoint: {err}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, LLMError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|err| LLMError::InvalidRequest(format!("invalid base URL {raw:?}: {err}")))
}

#[async_trait]
impl ChatProvider for Groq {
    /// Sends a chat request to Groq's API.
    ///
    /// # Arguments
    ///
    /// * `messages` - System instruction and user prompt, in order
    ///
    /// # Returns
    ///
    /// The provider's response or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let api_key = self.config.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(LLMError::AuthError("Missing Groq API key".to_string()));
        }

        let groq_msgs: Vec<GroqChatMessage> = messages
            .iter()
            .map(|m| GroqChatMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        let body = GroqChatRequest {
            model: &self.config.model,
            messages: groq_msgs,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Groq request payload: {}", json);
            }
        }

        let mut request = self
            .client
            .post(self.endpoint()?)
            .bearer_auth(api_key)
            .json(&body);

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("Groq HTTP status: {}", status);

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LLMError::AuthError(format!("Groq rejected credentials ({status}): {error_text}"))
                }
                _ => LLMError::ProviderError(format!("Groq returned {status}: {error_text}")),
            });
        }

        let raw = resp.text().await?;
        let json_resp: GroqChatResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: format!("failed to decode Groq response: {err}"),
                raw_response: raw.clone(),
            })?;

        Ok(Box::new(json_resp))
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard, key: &str) -> Groq {
        Groq::new(
            SecretString::new(key.to_string()),
            Some(server.url()),
            None,
            None,
            Some(0.2),
            None,
        )
        .expect("client")
    }

    fn conversation() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system().content("rate this").build(),
            ChatMessage::user().content("What is the capital of France?").build(),
        ]
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let groq = Groq::new(
            SecretString::new("k".to_string()),
            Some("https://api.groq.com/openai/v1".to_string()),
            None,
            None,
            None,
            None,
        )
        .expect("client");
        assert_eq!(
            groq.endpoint().expect("endpoint").as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(groq.model(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = Groq::new(
            SecretString::new("k".to_string()),
            Some("not a url".to_string()),
            None,
            None,
            None,
            None,
        );
        assert!(matches!(result, Err(LLMError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn sends_messages_and_reads_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer secret-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": DEFAULT_MODEL,
                "stream": false,
                "messages": [
                    {"role": "system", "content": "rate this"},
                    {"role": "user", "content": "What is the capital of France?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Score: 8"}}],
                    "usage":{"prompt_tokens":10,"completion_tokens":3,"total_tokens":13}}"#,
            )
            .create_async()
            .await;

        let groq = client_for(&server, "secret-key");
        let response = groq.chat(&conversation()).await.expect("chat");

        assert_eq!(response.text().as_deref(), Some("Score: 8"));
        assert_eq!(response.usage().map(|u| u.total_tokens), Some(13));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let groq = client_for(&server, "");
        let err = groq.chat(&conversation()).await.unwrap_err();

        assert!(matches!(err, LLMError::AuthError(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
            .create_async()
            .await;

        let err = client_for(&server, "bad").chat(&conversation()).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(msg) if msg.contains("Invalid API Key")));
    }

    #[tokio::test]
    async fn server_error_maps_to_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = client_for(&server, "k").chat(&conversation()).await.unwrap_err();
        assert!(matches!(err, LLMError::ProviderError(msg) if msg.contains("overloaded")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn slow_reply_hits_the_request_timeout() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(br#"{"choices":[{"message":{"content":"late"}}]}"#)
            })
            .create_async()
            .await;

        let groq = Groq::new(
            SecretString::new("k".to_string()),
            Some(server.url()),
            None,
            None,
            None,
            Some(1),
        )
        .expect("client");
        let err = groq.chat(&conversation()).await.unwrap_err();

        assert!(matches!(err, LLMError::HttpError(_)));
    }

    #[tokio::test]
    async fn garbage_body_is_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server, "k").chat(&conversation()).await.unwrap_err();
        match err {
            LLMError::ResponseFormatError { raw_response, .. } => {
                assert_eq!(raw_response, "<html>oops</html>")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_content_yields_no_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let response = client_for(&server, "k").chat(&conversation()).await.expect("chat");
        assert_eq!(response.text(), None);
    }
}
