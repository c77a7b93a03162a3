use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::llm::provider::CompletionService;
use crate::models::{ChatMessage, CompletionRequest};

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqProvider {
    client: Client,
    chat_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GroqProvider {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key))?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("groqsearch/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            chat_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.groq_api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

fn classify_failure(status: StatusCode, retry_after: Option<u64>, body: &str) -> Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited(retry_after);
    }

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    Error::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CompletionService for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        tracing::debug!(
            "Sending ~{} tokens to {} ({} messages)",
            request.estimate_tokens(),
            request.model.as_str(),
            request.messages.len()
        );

        let body = ChatRequest {
            model: request.model.as_str(),
            messages: &request.messages,
            max_tokens: request.max_tokens,
        };

        let response = self.client.post(&self.chat_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Completion request failed with {}", status);
            return Err(classify_failure(status, retry_after, &body));
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| Error::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedResponse("response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::MalformedResponse("empty completion text".to_string()));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "Groq"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelId;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> GroqProvider {
        GroqProvider::new("gsk_test", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            ModelId::default(),
            vec![ChatMessage::system("be brief"), ChatMessage::user("hello")],
            1000,
        )
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("gsk_test"))
            .and(body_partial_json(json!({
                "model": "mixtral-8x7b-32768",
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Hi there"}},
                    {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server).complete(request()).await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_rate_limit_is_tagged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "12")
                    .set_body_string(r#"{"error":{"message":"Rate limit reached"}}"#),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited(Some(12))));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_api_error_uses_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error":{"message":"model has been decommissioned"}}"#),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "model has been decommissioned");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(!err.is_retryable());

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on the discard port.
        let provider =
            GroqProvider::new("gsk_test", "http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
