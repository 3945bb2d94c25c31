//! The outcome of one analysis run.

use serde::{Deserialize, Serialize};

use super::criteria::{CriterionSpec, CriterionWeights};
use super::errors::McdaError;
use super::ranking::RankedBranch;
use super::recommendations::Recommendations;
use crate::domain::foundation::Timestamp;

/// Which path produced the recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    #[default]
    RuleBased,
    Llm,
}

/// Context describing how an analysis was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub total_branches: usize,
    pub criteria_used: Vec<CriterionSpec>,
    pub weights_used: CriterionWeights,
    pub timestamp: Timestamp,
    pub recommendation_source: RecommendationSource,
}

/// Result of ranking a set of branches.
///
/// A failed analysis still produces a well-formed value: `success` is false,
/// `error` carries the message and every collection is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub ranked_branches: Vec<RankedBranch>,
    /// Scores in input order.
    pub topsis_scores: Vec<f64>,
    pub ideal_solution: Vec<f64>,
    pub negative_ideal_solution: Vec<f64>,
    pub recommendations: Recommendations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_metadata: Option<AnalysisMetadata>,
}

impl AnalysisResult {
    /// Builds the failure value for an error.
    pub fn failure(error: &McdaError) -> Self {
        Self::failure_with_message(error.to_string())
    }

    pub fn failure_with_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ranked_branches: Vec::new(),
            topsis_scores: Vec::new(),
            ideal_solution: Vec::new(),
            negative_ideal_solution: Vec::new(),
            recommendations: Recommendations::unavailable(),
            analysis_metadata: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Replaces the recommendation text and records where it came from.
    pub fn with_recommendations(
        mut self,
        recommendations: Recommendations,
        source: RecommendationSource,
    ) -> Self {
        self.recommendations = recommendations;
        if let Some(metadata) = self.analysis_metadata.as_mut() {
            metadata.recommendation_source = source;
        }
        self
    }

    pub fn recommendation_source(&self) -> Option<RecommendationSource> {
        self.analysis_metadata
            .as_ref()
            .map(|m| m.recommendation_source)
    }
}
