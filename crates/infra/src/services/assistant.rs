use serde::Deserialize;
use std::sync::Mutex;
use thiserror::Error;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-1.5-pro-latest";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Request(String),
    #[error("Assistant returned no content")]
    EmptyResponse,
}

/// LLM completion behind a trait so the API surface never knows which
/// vendor is answering.
#[async_trait::async_trait]
pub trait IAssistantProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Calls the Google Gemini generateContent REST API.
pub struct GeminiAssistantProvider {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiAssistantProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl IAssistantProvider for GeminiAssistantProvider {
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!(
            "{}/models/{}:generateContent",
            GEMINI_API_BASE, GEMINI_MODEL
        );
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        data.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(AssistantError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Provider double for tests and key-less local runs: returns a fixed
/// reply and records every prompt it was asked to complete.
pub struct CannedAssistantProvider {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedAssistantProvider {
    pub fn new() -> Self {
        Self::with_reply(
            "I'm having trouble connecting. Please try again later.".to_string(),
        )
    }

    pub fn with_reply(reply: String) -> Self {
        Self {
            reply,
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for CannedAssistantProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IAssistantProvider for CannedAssistantProvider {
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}
