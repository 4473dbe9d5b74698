//! Hugging Face Inference text-generation client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::provider::CompletionProvider;

pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_new_tokens: u32,
}

impl fmt::Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_new_tokens", &self.max_new_tokens)
            .finish()
    }
}

impl Clone for HuggingFaceProvider {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            api_token: self.api_token.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_new_tokens: self.max_new_tokens,
        }
    }
}

impl HuggingFaceProvider {
    #[must_use]
    pub fn new(
        api_token: String,
        mut base_url: String,
        model: String,
        temperature: f32,
        max_new_tokens: u32,
    ) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: crate::http::default_client(),
            api_token,
            base_url,
            model,
            temperature,
            max_new_tokens,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

impl CompletionProvider for HuggingFaceProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                temperature: self.temperature,
                max_new_tokens: self.max_new_tokens,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(LlmError::Http)?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            tracing::error!("HF inference API error {status}: {text}");
            return Err(LlmError::Other(format!(
                "HF inference request failed (status {status})"
            )));
        }

        let resp: Vec<GeneratedText> = serde_json::from_str(&text)?;

        resp.into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(LlmError::EmptyResponse {
                provider: "hugging_face",
            })
    }

    fn name(&self) -> &'static str {
        "hugging_face"
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    temperature: f32,
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_provider(base_url: &str) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            "hf_test_token".into(),
            base_url.into(),
            "meta-llama/Meta-Llama-3-8B-Instruct".into(),
            0.7,
            1024,
        )
    }

    #[test]
    fn debug_redacts_token() {
        let p = test_provider("https://api-inference.huggingface.co");
        let debug = format!("{p:?}");
        assert!(!debug.contains("hf_test_token"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("Meta-Llama-3-8B-Instruct"));
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let p = test_provider("https://example.com/");
        assert_eq!(p.base_url, "https://example.com");
    }

    #[test]
    fn request_serializes_parameters() {
        let body = GenerateRequest {
            inputs: "prompt text",
            parameters: GenerateParameters {
                temperature: 0.7,
                max_new_tokens: 1024,
                return_full_text: false,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"inputs\":\"prompt text\""));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(json.contains("\"max_new_tokens\":1024"));
        assert!(json.contains("\"return_full_text\":false"));
    }

    #[test]
    fn parse_generated_text() {
        let json = r#"[{"generated_text":"The sessions are cookie-based."}]"#;
        let resp: Vec<GeneratedText> = serde_json::from_str(json).unwrap();
        assert_eq!(resp[0].generated_text, "The sessions are cookie-based.");
    }

    #[tokio::test]
    async fn complete_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/meta-llama/Meta-Llama-3-8B-Instruct"))
            .and(header("authorization", "Bearer hf_test_token"))
            .and(body_partial_json(serde_json::json!({
                "parameters": {"temperature": 0.7}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!([{"generated_text": "Here is the analysis."}]),
            ))
            .mount(&server)
            .await;

        let p = test_provider(&server.uri());
        let answer = p.complete("formatted prompt").await.unwrap();
        assert_eq!(answer, "Here is the analysis.");
    }

    #[tokio::test]
    async fn complete_rate_limited_maps_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let p = test_provider(&server.uri());
        let err = p.complete("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[tokio::test]
    async fn complete_empty_array_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let p = test_provider(&server.uri());
        let err = p.complete("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn complete_server_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
            .mount(&server)
            .await;

        let p = test_provider(&server.uri());
        let err = p.complete("prompt").await.unwrap_err();
        assert!(err.to_string().contains("status 503"));
    }

    #[tokio::test]
    async fn complete_unreachable_endpoint_errors() {
        let p = test_provider("http://127.0.0.1:1");
        assert!(p.complete("prompt").await.is_err());
    }
}
