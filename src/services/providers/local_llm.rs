/// Local text-generation client
///
/// Talks to a small local LLM endpoint over HTTP. The service is best-effort:
/// any transport failure or timeout degrades to a canned sentence so the chat
/// flow never fails on its account.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    services::providers::{PromptMode, TextGenerator},
};

const EMPTY_PROMPT_REPLY: &str = "Please enter a valid message.";
const UNAVAILABLE_REPLY: &str = "Sorry, the AI service is currently unavailable.";
const NO_ANSWER_REPLY: &str = "I'm not sure how to respond.";

/// Marker emitted by the model when it echoes the prompt template back
const ROLE_MARKER: &str = "Assistant:";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: String,
}

#[derive(Clone)]
pub struct LocalLlmGenerator {
    http_client: HttpClient,
    api_url: String,
}

impl LocalLlmGenerator {
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url,
        })
    }

    fn build_prompt(input: &str, mode: PromptMode) -> String {
        match mode {
            PromptMode::Chat => format!(
                "You are MovieBot.\n\
                 Respond naturally in ONE short sentence.\n\
                 Do NOT mention movies unless asked.\n\n\
                 User: {}\nAssistant:",
                input
            ),
            PromptMode::MovieIntro => format!(
                "You are MovieBot.\n\
                 User wants movie recommendations.\n\
                 Write ONE friendly sentence.\n\
                 Do NOT list movies.\n\n\
                 User: {}\nAssistant:",
                input
            ),
            PromptMode::Generic => format!("User: {}\nAssistant:", input),
        }
    }

    /// Strips echoed prompt blocks and whitespace noise from a raw reply.
    ///
    /// Keeps only the text after the last role marker, then collapses newline
    /// runs into single spaces. Never returns an empty string.
    fn clean_response(raw: &str) -> String {
        let mut text = raw.trim();
        if let Some(idx) = text.rfind(ROLE_MARKER) {
            text = text[idx + ROLE_MARKER.len()..].trim();
        }

        let text = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            NO_ANSWER_REPLY.to_string()
        } else {
            text
        }
    }

    async fn query(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(&self.api_url)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "LLM service returned status {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.text)
    }
}

#[async_trait::async_trait]
impl TextGenerator for LocalLlmGenerator {
    async fn generate(&self, input: &str, mode: PromptMode) -> String {
        if input.trim().is_empty() {
            return EMPTY_PROMPT_REPLY.to_string();
        }

        let prompt = Self::build_prompt(input, mode);
        match self.query(&prompt).await {
            Ok(raw) => Self::clean_response(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "LLM request failed");
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }
}
