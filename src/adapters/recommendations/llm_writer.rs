//! AI-powered RecommendationWriter implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mcda::{BranchRecommendation, Criterion, RankedBranch, Recommendations};
use crate::ports::{
    AIProvider, CompletionRequest, RecommendationRequest, RecommendationWriter, RequestMetadata,
};

const SYSTEM_PROMPT: &str = "You are a financial analyst for a cooperative. \
You write concise, actionable recommendations for branch managers based on a \
TOPSIS performance ranking. Reply with a single JSON object and nothing else.";

const DEFAULT_MAX_TOKENS: u32 = 1500;

/// Writes recommendations with an LLM, anchored on the rule-based baseline.
pub struct LlmRecommendationWriter {
    ai_provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl LlmRecommendationWriter {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn create_prompt(&self, request: &RecommendationRequest) -> String {
        let branches = request
            .ranked
            .iter()
            .map(Self::describe_branch)
            .collect::<Vec<_>>()
            .join("\n");

        let period = request
            .context
            .period
            .as_deref()
            .unwrap_or("the current period");
        let notes = request
            .context
            .notes
            .as_deref()
            .map(|n| format!("\nAnalyst notes: {}\n", n))
            .unwrap_or_default();

        format!(
            r#"Branch performance ranking for {period}.
{notes}
Ranked branches (score 0-100, higher is better):
{branches}

Baseline assessment:
{baseline}

Respond with JSON:
{{
  "strategic": "2-4 sentence network-wide summary",
  "branchLevel": [
    {{ "branchName": "exact branch name", "recommendations": ["action 1", "action 2"] }}
  ]
}}

Give 2-4 specific actions per branch. Use the exact branch names listed above."#,
            period = period,
            notes = notes,
            branches = branches,
            baseline = request.baseline.strategic,
        )
    }

    fn describe_branch(branch: &RankedBranch) -> String {
        let record = &branch.record;
        format!(
            "{}. {} - score {} ({}); savings {:.2}, disbursements {:.2}, net interest income {:.2}, active members {}, performance {:.2}%",
            branch.rank,
            record.branch_name,
            branch.score_percentage.value(),
            branch.category.label(),
            record.figure(Criterion::TotalSavings),
            record.figure(Criterion::TotalDisbursements),
            record.figure(Criterion::NetInterestIncome),
            record.figure(Criterion::ActiveMembers),
            record.figure(Criterion::PerformancePct),
        )
    }

    /// Parses the model reply and overlays it on the baseline.
    ///
    /// Branches missing from the reply, or given no bullets, keep their
    /// baseline text. Rank, category and priority always come from the baseline.
    fn parse_response(
        &self,
        response: &str,
        baseline: &Recommendations,
    ) -> Result<Recommendations, DomainError> {
        let reply: LlmReply = serde_json::from_str(strip_code_fence(response)).map_err(|e| {
            DomainError::new(
                ErrorCode::AIProviderError,
                format!("Failed to parse AI response: {}", e),
            )
        })?;

        let strategic = reply.strategic.trim();
        if strategic.is_empty() {
            return Err(DomainError::new(
                ErrorCode::AIProviderError,
                "Missing strategic summary in AI response",
            ));
        }

        let branch_level = baseline
            .branch_level
            .iter()
            .map(|base| {
                let generated = reply
                    .branch_level
                    .iter()
                    .find(|b| b.branch_name.trim() == base.branch_name)
                    .map(|b| clean_bullets(&b.recommendations))
                    .filter(|bullets| !bullets.is_empty());

                match generated {
                    Some(recommendations) => BranchRecommendation {
                        recommendations,
                        ..base.clone()
                    },
                    None => base.clone(),
                }
            })
            .collect();

        Ok(Recommendations {
            strategic: strategic.to_string(),
            branch_level,
        })
    }
}

#[async_trait]
impl RecommendationWriter for LlmRecommendationWriter {
    async fn write(&self, request: &RecommendationRequest) -> Result<Recommendations, DomainError> {
        let completion = CompletionRequest::new(
            RequestMetadata::new(request.request_id, "branch_recommendations"),
            SYSTEM_PROMPT,
            self.create_prompt(request),
        )
        .with_max_tokens(self.max_tokens)
        .with_temperature(0.3)
        .expecting_json();

        let response = self.ai_provider.complete(completion).await?;

        debug!(
            request_id = %request.request_id,
            provider = %self.ai_provider.provider_info().name,
            model = %response.model,
            total_tokens = response.usage.total(),
            "Recommendation text generated"
        );

        self.parse_response(&response.content, &request.baseline)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmReply {
    #[serde(default)]
    strategic: String,
    #[serde(default)]
    branch_level: Vec<LlmBranchReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmBranchReply {
    branch_name: String,
    #[serde(default)]
    recommendations: Vec<String>,
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn clean_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect()
}
