use std::env;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use studybuddy_core::Provider;

use crate::error::ProviderError;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-3.5-turbo";

/// One external text-generation backend.
///
/// Implementations issue a single call; the gateway owns the timeout,
/// retry, and fallback policy around it.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Which provider this backend speaks for.
    fn provider(&self) -> Provider;

    /// Whether the backend has the credentials it needs. Unconfigured
    /// backends are skipped entirely during fallback.
    fn is_configured(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Google Gemini over its REST `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiBackend {
    pub fn from_env(http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: non_empty_env("GEMINI_API_KEY"),
            model: non_empty_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
        }
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[async_trait]
impl TextBackend for GeminiBackend {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let url = format!("{GEMINI_ENDPOINT}/{}:generateContent", self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let payload: GeminiResponse = response.json().await?;
        let text = payload
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

/// OpenRouter's OpenAI-style chat completions endpoint.
#[derive(Clone, Debug)]
pub struct OpenRouterBackend {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl OpenRouterBackend {
    pub fn from_env(http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: non_empty_env("OPENROUTER_API_KEY"),
            model: non_empty_env("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_owned()),
        }
    }
}

#[derive(Deserialize)]
struct OpenRouterResponse {
    choices: Option<Vec<OpenRouterChoice>>,
}

#[derive(Deserialize)]
struct OpenRouterChoice {
    message: Option<OpenRouterMessage>,
}

#[derive(Deserialize)]
struct OpenRouterMessage {
    content: Option<String>,
}

#[async_trait]
impl TextBackend for OpenRouterBackend {
    fn provider(&self) -> Provider {
        Provider::OpenRouter
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let response = self
            .http
            .post(OPENROUTER_ENDPOINT)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let payload: OpenRouterResponse = response.json().await?;
        let text = payload
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        Ok(text)
    }
}
