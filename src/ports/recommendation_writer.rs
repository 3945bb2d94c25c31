//! Recommendation writer port - optional generated recommendation text.
//!
//! Writers receive the finished ranking together with the rule-based
//! recommendations and return replacement text. Failures are never fatal:
//! callers keep the rule-based text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::mcda::{RankedBranch, Recommendations};

/// Produces recommendation text for a ranking.
#[async_trait]
pub trait RecommendationWriter: Send + Sync {
    async fn write(&self, request: &RecommendationRequest) -> Result<Recommendations, DomainError>;
}

/// Free-form context for the report the recommendations appear in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    /// Reporting period label, e.g. "Q3 2024".
    #[serde(default)]
    pub period: Option<String>,
    /// Extra notes from the analyst.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReportContext {
    pub fn for_period(period: impl Into<String>) -> Self {
        Self {
            period: Some(period.into()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Everything a writer needs to produce recommendations.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub request_id: Uuid,
    /// Branches in rank order.
    pub ranked: Vec<RankedBranch>,
    /// Rule-based recommendations for the same ranking.
    pub baseline: Recommendations,
    pub context: ReportContext,
}

impl RecommendationRequest {
    pub fn new(ranked: Vec<RankedBranch>, baseline: Recommendations, context: ReportContext) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            ranked,
            baseline,
            context,
        }
    }
}
