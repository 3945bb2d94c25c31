//! AnalyzeBranchesHandler - Command handler for ranking branches.
//!
//! Runs the TOPSIS engine with the stored (or per-request) weights and,
//! when a recommendation writer is configured, tries to replace the
//! rule-based recommendation text with generated text. Generated text is
//! best effort: a timeout or writer failure keeps the rule-based text.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::CriteriaStore;
use crate::domain::mcda::{
    AnalysisResult, BranchRecord, CriteriaConfig, CriterionWeights, RecommendationSource,
    TopsisAnalyzer,
};
use crate::ports::{BranchSource, RecommendationRequest, RecommendationWriter, ReportContext};

/// Default bound on recommendation generation.
pub const DEFAULT_RECOMMENDATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Command to rank a set of branches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeBranchesCommand {
    pub branches: Vec<BranchRecord>,
    /// Overrides the stored weights for this request only.
    #[serde(default)]
    pub weights: Option<CriterionWeights>,
    #[serde(default)]
    pub context: ReportContext,
}

impl AnalyzeBranchesCommand {
    pub fn new(branches: Vec<BranchRecord>) -> Self {
        Self {
            branches,
            ..Self::default()
        }
    }

    pub fn with_weights(mut self, weights: CriterionWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_context(mut self, context: ReportContext) -> Self {
        self.context = context;
        self
    }
}

/// Handler for branch analysis requests.
pub struct AnalyzeBranchesHandler {
    store: CriteriaStore,
    writer: Option<Arc<dyn RecommendationWriter>>,
    recommendation_timeout: Duration,
}

impl AnalyzeBranchesHandler {
    /// Creates a handler that produces rule-based recommendations only.
    pub fn new(store: CriteriaStore) -> Self {
        Self {
            store,
            writer: None,
            recommendation_timeout: DEFAULT_RECOMMENDATION_TIMEOUT,
        }
    }

    /// Enables generated recommendation text, bounded by `recommendation_timeout`.
    pub fn with_writer(
        mut self,
        writer: Arc<dyn RecommendationWriter>,
        recommendation_timeout: Duration,
    ) -> Self {
        self.writer = Some(writer);
        self.recommendation_timeout = recommendation_timeout;
        self
    }

    /// Ranks the command's branches.
    ///
    /// Never fails: invalid input or weights produce a result with
    /// `success == false`.
    pub async fn handle(&self, cmd: AnalyzeBranchesCommand) -> AnalysisResult {
        let request_id = Uuid::new_v4();

        let config = match cmd.weights {
            Some(weights) => match CriteriaConfig::with_weights(weights) {
                Ok(config) => config,
                Err(err) => {
                    warn!(request_id = %request_id, error = %err, "Rejected weight override");
                    return AnalysisResult::failure(&err);
                }
            },
            None => self.store.snapshot().await,
        };

        let result = TopsisAnalyzer::analyze(&cmd.branches, &config);

        if !result.success {
            warn!(
                request_id = %request_id,
                error = result.error.as_deref().unwrap_or_default(),
                "Branch analysis failed"
            );
            return result;
        }

        info!(
            request_id = %request_id,
            branches = result.ranked_branches.len(),
            top_branch = result.ranked_branches.first().map(|b| b.branch_name()).unwrap_or_default(),
            "Branch analysis completed"
        );

        self.enhance(result, cmd.context, request_id).await
    }

    /// Loads branches from `source`, then ranks them with the stored weights.
    ///
    /// A source error is reported as a failed result.
    pub async fn handle_source(
        &self,
        source: &dyn BranchSource,
        context: ReportContext,
    ) -> AnalysisResult {
        match source.load().await {
            Ok(branches) => {
                debug!(source = %source.describe(), count = branches.len(), "Branch records loaded");
                self.handle(AnalyzeBranchesCommand::new(branches).with_context(context))
                    .await
            }
            Err(err) => {
                warn!(source = %source.describe(), error = %err, "Failed to load branch records");
                AnalysisResult::failure_with_message(err.message())
            }
        }
    }

    async fn enhance(
        &self,
        result: AnalysisResult,
        context: ReportContext,
        request_id: Uuid,
    ) -> AnalysisResult {
        let Some(writer) = &self.writer else {
            return result;
        };

        let request = RecommendationRequest {
            request_id,
            ranked: result.ranked_branches.clone(),
            baseline: result.recommendations.clone(),
            context,
        };

        match timeout(self.recommendation_timeout, writer.write(&request)).await {
            Ok(Ok(recommendations)) => {
                debug!(request_id = %request_id, "Using generated recommendations");
                result.with_recommendations(recommendations, RecommendationSource::Llm)
            }
            Ok(Err(err)) => {
                warn!(
                    request_id = %request_id,
                    error = %err,
                    "Recommendation writer failed, keeping rule-based recommendations"
                );
                result
            }
            Err(_) => {
                warn!(
                    request_id = %request_id,
                    timeout_ms = self.recommendation_timeout.as_millis() as u64,
                    "Recommendation writer timed out, keeping rule-based recommendations"
                );
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::branch_source::InMemoryBranchSource;
    use crate::adapters::recommendations::LlmRecommendationWriter;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::mcda::{Category, Criterion, WeightUpdate};
    use crate::ports::AIError;
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingSource;

    #[async_trait]
    impl BranchSource for FailingSource {
        async fn load(&self) -> Result<Vec<BranchRecord>, DomainError> {
            Err(DomainError::new(ErrorCode::SourceUnavailable, "Simulated source failure"))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn branches() -> Vec<BranchRecord> {
        vec![
            BranchRecord::new("Hillside").with_figures(200_000.0, 600_000.0, -10_000.0, 40.0, -5.0),
            BranchRecord::new("Central").with_figures(700_000.0, 200_000.0, 50_000.0, 150.0, 10.0),
        ]
    }

    fn llm_handler(provider: MockAIProvider, limit: Duration) -> AnalyzeBranchesHandler {
        AnalyzeBranchesHandler::new(CriteriaStore::default())
            .with_writer(Arc::new(LlmRecommendationWriter::new(Arc::new(provider))), limit)
    }

    const LLM_REPLY: &str = r#"{"strategic": "Generated summary",
        "branchLevel": [{"branchName": "Hillside", "recommendations": ["Generated action"]}]}"#;

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn ranks_with_rule_based_recommendations() {
        let handler = AnalyzeBranchesHandler::new(CriteriaStore::default());

        let result = handler.handle(AnalyzeBranchesCommand::new(branches())).await;

        assert!(result.success);
        assert_eq!(result.ranked_branches[0].branch_name(), "Central");
        assert_eq!(result.ranked_branches[1].category, Category::NeedsImprovement);
        assert_eq!(result.recommendation_source(), Some(RecommendationSource::RuleBased));
    }

    #[tokio::test]
    async fn uses_stored_weights() {
        let store = CriteriaStore::default();
        store
            .update(
                WeightUpdate::default()
                    .with(Criterion::TotalSavings, 0.35)
                    .with(Criterion::NetInterestIncome, 0.20),
            )
            .await
            .unwrap();
        let handler = AnalyzeBranchesHandler::new(store);

        let result = handler.handle(AnalyzeBranchesCommand::new(branches())).await;

        let metadata = result.analysis_metadata.unwrap();
        assert_eq!(metadata.weights_used.total_savings, 0.35);
        assert_eq!(metadata.weights_used.net_interest_income, 0.20);
    }

    #[tokio::test]
    async fn weight_override_applies_to_single_request() {
        let store = CriteriaStore::default();
        let handler = AnalyzeBranchesHandler::new(store.clone());
        let weights = CriterionWeights {
            total_savings: 0.5,
            total_disbursements: 0.5,
            net_interest_income: 0.0,
            active_members: 0.0,
            performance_pct: 0.0,
        };

        let result = handler
            .handle(AnalyzeBranchesCommand::new(branches()).with_weights(weights))
            .await;

        assert_eq!(result.analysis_metadata.unwrap().weights_used, weights);
        assert_eq!(*store.snapshot().await.weights(), CriterionWeights::default());
    }

    #[tokio::test]
    async fn generated_recommendations_replace_rule_based() {
        let provider = MockAIProvider::new().with_response(LLM_REPLY);
        let handler = llm_handler(provider.clone(), Duration::from_secs(5));

        let result = handler
            .handle(
                AnalyzeBranchesCommand::new(branches())
                    .with_context(ReportContext::for_period("Q3 2024")),
            )
            .await;

        assert_eq!(result.recommendation_source(), Some(RecommendationSource::Llm));
        assert_eq!(result.recommendations.strategic, "Generated summary");
        let hillside = result
            .recommendations
            .branch_level
            .iter()
            .find(|b| b.branch_name == "Hillside")
            .unwrap();
        assert_eq!(hillside.recommendations, vec!["Generated action"]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn handle_source_loads_and_ranks() {
        let handler = AnalyzeBranchesHandler::new(CriteriaStore::default());
        let source = InMemoryBranchSource::new(branches());

        let result = handler.handle_source(&source, ReportContext::default()).await;

        assert!(result.success);
        assert_eq!(result.analysis_metadata.unwrap().total_branches, 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Fallback Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn provider_error_keeps_rule_based_text() {
        let provider = MockAIProvider::new().with_error(AIError::unavailable("down"));
        let handler = llm_handler(provider, Duration::from_secs(5));
        let baseline = AnalyzeBranchesHandler::new(CriteriaStore::default())
            .handle(AnalyzeBranchesCommand::new(branches()))
            .await;

        let result = handler.handle(AnalyzeBranchesCommand::new(branches())).await;

        assert!(result.success);
        assert_eq!(result.recommendation_source(), Some(RecommendationSource::RuleBased));
        assert_eq!(result.recommendations, baseline.recommendations);
    }

    #[tokio::test]
    async fn malformed_reply_keeps_rule_based_text() {
        let provider = MockAIProvider::new().with_response("not json at all");
        let handler = llm_handler(provider, Duration::from_secs(5));

        let result = handler.handle(AnalyzeBranchesCommand::new(branches())).await;

        assert_eq!(result.recommendation_source(), Some(RecommendationSource::RuleBased));
        assert!(result.recommendations.strategic.starts_with("Branch network performance"));
    }

    #[tokio::test]
    async fn slow_writer_times_out() {
        let provider = MockAIProvider::new()
            .with_response(LLM_REPLY)
            .with_delay(Duration::from_millis(500));
        let handler = llm_handler(provider, Duration::from_millis(20));

        let result = handler.handle(AnalyzeBranchesCommand::new(branches())).await;

        assert!(result.success);
        assert_eq!(result.recommendation_source(), Some(RecommendationSource::RuleBased));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn empty_input_is_reported_not_raised() {
        let provider = MockAIProvider::new();
        let handler = llm_handler(provider.clone(), Duration::from_secs(5));

        let result = handler.handle(AnalyzeBranchesCommand::new(Vec::new())).await;

        assert!(!result.success);
        assert!(result.ranked_branches.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_override_is_reported() {
        let handler = AnalyzeBranchesHandler::new(CriteriaStore::default());
        let weights = WeightUpdate::default()
            .with(Criterion::TotalSavings, 0.9)
            .merged_over(&CriterionWeights::default());

        let result = handler
            .handle(AnalyzeBranchesCommand::new(branches()).with_weights(weights))
            .await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid weights"));
    }

    #[tokio::test]
    async fn source_failure_is_reported() {
        let handler = AnalyzeBranchesHandler::new(CriteriaStore::default());

        let result = handler.handle_source(&FailingSource, ReportContext::default()).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Simulated source failure"));
    }

    #[test]
    fn command_deserializes_with_optional_fields() {
        let cmd: AnalyzeBranchesCommand =
            serde_json::from_str(r#"{"branches": [{"branch_name": "A"}]}"#).unwrap();
        assert_eq!(cmd.branches.len(), 1);
        assert!(cmd.weights.is_none());
        assert_eq!(cmd.context, ReportContext::default());
    }
}
