//! AI Provider Port - Interface for LLM completions.
//!
//! Used to enrich rule-based branch recommendations with generated text.
//! The ranking itself never depends on a provider.
//!
//! A request is one instruction block plus one prompt, answered by a single
//! reply. Streaming and multi-turn chat are not modelled.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for AI/LLM provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Shape the caller expects the reply in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyFormat {
    #[default]
    Text,
    /// A single JSON object, enforced by the provider where supported.
    JsonObject,
}

/// One instruction block and one prompt for the model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Standing instructions (the chat "system" role).
    pub instructions: String,
    /// The data and the question (the chat "user" role).
    pub prompt: String,
    pub max_tokens: Option<u32>,
    /// 0.0 = deterministic.
    pub temperature: Option<f32>,
    pub reply_format: ReplyFormat,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(
        metadata: RequestMetadata,
        instructions: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            reply_format: ReplyFormat::Text,
            metadata,
        }
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn expecting_json(mut self) -> Self {
        self.reply_format = ReplyFormat::JsonObject;
        self
    }
}

/// Correlates provider calls with the analysis that made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    pub request_id: Uuid,
    /// What the completion is used for (e.g. "branch_recommendations").
    pub purpose: &'static str,
}

impl RequestMetadata {
    pub fn new(request_id: Uuid, purpose: &'static str) -> Self {
        Self { request_id, purpose }
    }
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token counts reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt: u32,
    pub completion: u32,
}

impl TokenUsage {
    pub fn new(prompt: u32, completion: u32) -> Self {
        Self { prompt, completion }
    }

    pub fn total(&self) -> u32 {
        self.prompt.saturating_add(self.completion)
    }
}

/// Reason the model stopped generating.
///
/// A filtered reply is reported as `AIError::ContentFiltered` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// Hit max_tokens; a JSON reply is probably truncated.
    Length,
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai").
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Why a completion could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("provider rate limit hit, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("reply withheld by content filter: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("provider rejected the API key")]
    AuthenticationFailed,

    #[error("network failure: {0}")]
    Network(String),

    #[error("unreadable provider reply: {0}")]
    Parse(String),

    #[error("provider rejected the request: {0}")]
    InvalidRequest(String),

    #[error("no reply within {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            AIError::RateLimited { .. }
            | AIError::Unavailable { .. }
            | AIError::Network(_)
            | AIError::Timeout { .. } => true,
            AIError::ContentFiltered { .. }
            | AIError::AuthenticationFailed
            | AIError::Parse(_)
            | AIError::InvalidRequest(_) => false,
        }
    }
}

impl From<AIError> for DomainError {
    fn from(err: AIError) -> Self {
        let code = match err {
            AIError::RateLimited { .. } => ErrorCode::RateLimited,
            _ => ErrorCode::AIProviderError,
        };
        DomainError::new(code, err.to_string())
    }
}
