//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::GenerateError;
use super::generator::TextGenerator;
use crate::config::GeminiConfig;
use crate::constants::GEMINI_MODEL;
use crate::credentials::ApiKey;

/// Gemini API client for single-shot, non-streaming completions
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    url: String,
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated
    fn into_text(self) -> Result<String, GenerateError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(GenerateError::EmptyResponse {
                reason: block_reason,
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            Err(GenerateError::EmptyResponse {
                reason: candidate.finish_reason,
            })
        } else {
            Ok(text)
        }
    }
}

impl GeminiClient {
    /// Create a client for the fixed model at the configured endpoint
    pub fn new(api_key: ApiKey, config: &GeminiConfig) -> Self {
        let url = format!(
            "{}/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            GEMINI_MODEL
        );
        let generation_config = (config.temperature.is_some()
            || config.max_output_tokens.is_some())
        .then(|| GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        });

        Self {
            client: Client::new(),
            api_key,
            url,
            generation_config,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, instruction: &str) -> Result<String, GenerateError> {
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: instruction }],
            }],
            generation_config: self.generation_config.clone(),
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own message over the raw JSON envelope
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerateError::Parse(e.to_string()))?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig {
            endpoint: server.uri(),
            ..Default::default()
        };
        GeminiClient::new(ApiKey::new("test-key"), &config)
    }

    fn text_response(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_sends_instruction_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "Write a reply" }] }]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response(&["Thank you for letting me know! ..."])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("Write a reply").await.unwrap();
        assert_eq!(text, "Thank you for letting me know! ...");
    }

    #[tokio::test]
    async fn test_parts_are_concatenated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response(&["Dear parent,\n", "See you!"])),
            )
            .mount(&server)
            .await;

        let text = client_for(&server).generate("hi").await.unwrap();
        assert_eq!(text, "Dear parent,\nSee you!");
    }

    #[tokio::test]
    async fn test_generation_config_is_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "generationConfig": { "maxOutputTokens": 512 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["ok"])))
            .expect(1)
            .mount(&server)
            .await;

        let config = GeminiConfig {
            endpoint: format!("{}/", server.uri()),
            max_output_tokens: Some(512),
            temperature: None,
        };
        let client = GeminiClient::new(ApiKey::new("test-key"), &config);
        assert_eq!(client.generate("hi").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        match err {
            GenerateError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid. Please pass a valid API key.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerateError::Api { status: 503, .. }));
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_blocked_prompt_reports_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(
            err,
            GenerateError::EmptyResponse { reason: Some(ref r) } if r == "SAFETY"
        ));
    }

    #[tokio::test]
    async fn test_candidate_without_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "MAX_TOKENS" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini returned no text (MAX_TOKENS)");
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_http_error() {
        let config = GeminiConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::new(ApiKey::new("test-key"), &config);

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerateError::Http(_)), "{:?}", err);
    }
}
