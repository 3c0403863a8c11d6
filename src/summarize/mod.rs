//! Note summarization.
//!
//! A `Summarizer` turns note text into a short summary. The remote provider
//! talks to an OpenAI-compatible endpoint; when nothing is configured the
//! disabled provider answers every request with `SummaryError::Disabled`.
//! Failures never propagate past the note: they become placeholder text in
//! its `summary` field.

mod config;
mod remote;

pub use config::{
    SummaryConfig, SETTING_AI_API_ENDPOINT, SETTING_AI_API_KEY, SETTING_AI_API_URL,
    SETTING_AI_MODEL,
};
pub use remote::{classify_status, RemoteSummarizer};

use async_trait::async_trait;
use thiserror::Error;

/// Placeholder stored when the provider rate-limits the request
pub const RATE_LIMITED_TEXT: &str = "Rate limit reached. Please wait a moment and try again.";

/// Placeholder stored for transport, auth and response errors
pub const UNAVAILABLE_TEXT: &str = "Summarize feature unavailable.";

/// Placeholder stored when no provider is configured
pub const DISABLED_TEXT: &str =
    "Summarize feature is disabled. Configure an API key to enable it.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("rate limited by summary provider")]
    RateLimited,

    #[error("summary request failed: {0}")]
    NetworkOrAuthFailure(String),

    #[error("summaries are disabled")]
    Disabled,
}

impl SummaryError {
    /// Human readable text stored in place of a summary
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::RateLimited => RATE_LIMITED_TEXT,
            Self::NetworkOrAuthFailure(_) => UNAVAILABLE_TEXT,
            Self::Disabled => DISABLED_TEXT,
        }
    }
}

/// Text to store in a note's summary field for a finished request
pub fn summary_text(outcome: Result<String, SummaryError>) -> String {
    match outcome {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "summary request failed");
            e.placeholder().to_string()
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary of `text`
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;

    /// Name of this provider for display purposes
    fn name(&self) -> &str;
}

/// Provider used when summaries are not configured
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummaryError> {
        Err(SummaryError::Disabled)
    }

    fn name(&self) -> &str {
        "Disabled"
    }
}

/// Build the provider described by `config`
pub fn summarizer_from_config(config: &SummaryConfig) -> Box<dyn Summarizer> {
    if !config.is_configured() {
        return Box::new(DisabledSummarizer);
    }
    match RemoteSummarizer::new(config) {
        Ok(remote) => Box::new(remote),
        Err(e) => {
            tracing::warn!(error = %e, "could not build summary client");
            Box::new(DisabledSummarizer)
        }
    }
}
