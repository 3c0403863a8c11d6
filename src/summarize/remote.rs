//! Remote summary provider
//!
//! Sends note text to an OpenAI-compatible chat completions endpoint and
//! returns the first choice's content. Works with OpenAI, Groq, Together AI,
//! local vLLM, etc.

use super::{SummaryConfig, SummaryError, Summarizer};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str =
    "You summarize personal notes. Reply with a short plain-text summary and nothing else.";

const USER_PROMPT: &str = "Summarize this note:";

pub struct RemoteSummarizer {
    client: Client,
    api_url: String,
    api_endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteSummarizer {
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("API key not configured"))?;

        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_url: config.effective_api_url().trim_end_matches('/').to_string(),
            api_endpoint: config.effective_api_endpoint().to_string(),
            api_key,
            model: config.effective_model().to_string(),
        })
    }

    /// Build the full API URL
    fn full_url(&self) -> String {
        format!("{}{}", self.api_url, self.api_endpoint)
    }

    fn request<'a>(&'a self, text: &str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: format!("{}\n\n{}", USER_PROMPT, text),
                },
            ],
        }
    }
}

/// Map a non-success HTTP status to a summary failure
pub fn classify_status(status: StatusCode, body: &str) -> SummaryError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        SummaryError::RateLimited
    } else {
        SummaryError::NetworkOrAuthFailure(format!("API error {}: {}", status, body))
    }
}

#[async_trait]
impl Summarizer for RemoteSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        let network = |e: reqwest::Error| SummaryError::NetworkOrAuthFailure(e.to_string());

        tracing::debug!(url = %self.full_url(), model = %self.model, "requesting summary");
        let response = self
            .client
            .post(self.full_url())
            .bearer_auth(&self.api_key)
            .json(&self.request(text))
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let completion: CompletionResponse = response.json().await.map_err(network)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                SummaryError::NetworkOrAuthFailure("No completion choices returned".to_string())
            })
    }

    fn name(&self) -> &str {
        "Remote API"
    }
}

// OpenAI API request/response types

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
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
