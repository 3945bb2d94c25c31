//! Scripted AI provider for tests.
//!
//! Replies are queued up front and handed out one per call, so a test can
//! script a JSON reply, a provider failure, or a slow provider and then
//! inspect the prompts the recommendation writer sent.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

const MOCK_MODEL: &str = "mock-model-1";

type Reply = Result<String, AIError>;

/// Provider that answers from a queue of scripted replies.
///
/// Clones share the queue and the call log, so a test can keep one handle
/// while the writer owns another.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply body, usually a JSON document.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.replies).push_back(Ok(content.into()));
        self
    }

    /// Queues a provider failure.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.replies).push_back(Err(error));
        self
    }

    /// Waits this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        // Separate statement: the queue lock is released before `?` returns.
        let next = lock(&self.replies).pop_front();
        let content =
            next.unwrap_or_else(|| Err(AIError::unavailable("no scripted reply left")))?;

        Ok(CompletionResponse {
            usage: TokenUsage::new(40, (content.len() / 4) as u32),
            content,
            model: MOCK_MODEL.to_string(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", MOCK_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ReplyFormat, RequestMetadata};
    use uuid::Uuid;

    fn request(body: &str) -> CompletionRequest {
        CompletionRequest::new(
            RequestMetadata::new(Uuid::nil(), "branch_recommendations"),
            "Reply in JSON",
            body,
        )
        .expecting_json()
    }

    #[tokio::test]
    async fn replies_are_handed_out_in_order() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"strategic": "first"}"#)
            .with_response(r#"{"strategic": "second"}"#);

        let first = provider.complete(request("a")).await.unwrap();
        let second = provider.complete(request("b")).await.unwrap();

        assert_eq!(first.content, r#"{"strategic": "first"}"#);
        assert_eq!(second.content, r#"{"strategic": "second"}"#);
        assert_eq!(first.model, MOCK_MODEL);
        assert_eq!(first.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn exhausted_queue_reports_unavailable() {
        let provider = MockAIProvider::new();

        let err = provider.complete(request("a")).await.unwrap_err();

        assert!(matches!(err, AIError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let provider = MockAIProvider::new()
            .with_error(AIError::rate_limited(30))
            .with_response("{}");

        let err = provider.complete(request("a")).await.unwrap_err();
        let ok = provider.complete(request("b")).await.unwrap();

        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
        assert_eq!(ok.content, "{}");
    }

    #[tokio::test]
    async fn calls_are_recorded_across_clones() {
        let provider = MockAIProvider::new().with_response("{}");
        let handle = provider.clone();

        provider.complete(request("Central ranks first")).await.unwrap();

        assert_eq!(handle.call_count(), 1);
        let calls = handle.get_calls();
        assert_eq!(calls[0].prompt, "Central ranks first");
        assert_eq!(calls[0].reply_format, ReplyFormat::JsonObject);
    }

    #[tokio::test]
    async fn delay_is_applied_before_answering() {
        let provider = MockAIProvider::new()
            .with_response("{}")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(request("a")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
