//! Rule-based recommendations derived from a ranking.
//!
//! The text produced here is always available and serves as the fallback
//! whenever richer, generated text cannot be obtained.

use serde::{Deserialize, Serialize};

use super::criteria::Criterion;
use super::ranking::{Category, RankedBranch, EXCELLENT_THRESHOLD, GOOD_THRESHOLD};
use crate::domain::foundation::{BranchId, Percentage};

/// Minimum active membership before recruitment is recommended.
pub const MEMBERSHIP_FLOOR: f64 = 100.0;

/// Share of Excellent branches for a "strong" outlook.
const STRONG_SHARE: f64 = 0.50;

/// Share of Excellent branches for a "moderate" outlook.
const MODERATE_SHARE: f64 = 0.25;

/// Urgency of a branch's recommendations.
///
/// Follows the same score thresholds as [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_score(score: f64) -> Self {
        if score < GOOD_THRESHOLD {
            Priority::High
        } else if score < EXCELLENT_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Returns the display label for this priority.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Overall reading of the branch network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceOutlook {
    Strong,
    Moderate,
    ImprovementNeeded,
}

impl PerformanceOutlook {
    /// Classifies the share of Excellent branches (a fraction in [0, 1]).
    pub fn from_excellent_share(share: f64) -> Self {
        if share >= STRONG_SHARE {
            PerformanceOutlook::Strong
        } else if share >= MODERATE_SHARE {
            PerformanceOutlook::Moderate
        } else {
            PerformanceOutlook::ImprovementNeeded
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            PerformanceOutlook::Strong => "strong",
            PerformanceOutlook::Moderate => "moderate",
            PerformanceOutlook::ImprovementNeeded => "significant improvement opportunities",
        }
    }
}

/// Recommendations for one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecommendation {
    pub branch_id: Option<BranchId>,
    pub branch_name: String,
    pub rank: usize,
    pub category: Category,
    pub score_percentage: Percentage,
    pub priority: Priority,
    pub recommendations: Vec<String>,
}

/// Strategic summary plus per-branch recommendations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub strategic: String,
    pub branch_level: Vec<BranchRecommendation>,
}

impl Recommendations {
    /// Placeholder used when no analysis could be performed.
    pub fn unavailable() -> Self {
        Self {
            strategic: "Unable to generate recommendations: no branch data was available for analysis."
                .to_string(),
            branch_level: Vec::new(),
        }
    }
}

/// Rule-based recommendation text.
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Builds the strategic summary and per-branch bullets for a ranking.
    pub fn generate(ranked: &[RankedBranch]) -> Recommendations {
        Recommendations {
            strategic: Self::strategic_summary(ranked),
            branch_level: ranked.iter().map(Self::for_branch).collect(),
        }
    }

    /// Summarizes the network: outlook, Excellent share, and names per category.
    ///
    /// # Edge Cases
    /// - Empty ranking: returns the "unavailable" message
    /// - Empty categories are left out of the summary
    pub fn strategic_summary(ranked: &[RankedBranch]) -> String {
        if ranked.is_empty() {
            return Recommendations::unavailable().strategic;
        }

        let names_in = |category: Category| -> Vec<&str> {
            ranked
                .iter()
                .filter(|b| b.category == category)
                .map(|b| b.branch_name())
                .collect()
        };
        let excellent = names_in(Category::Excellent);
        let good = names_in(Category::Good);
        let needs_improvement = names_in(Category::NeedsImprovement);

        let share = excellent.len() as f64 / ranked.len() as f64;
        let outlook = PerformanceOutlook::from_excellent_share(share);

        let mut summary = format!(
            "Branch network performance shows {}: {} of {} branches ({}) are rated Excellent.",
            outlook.phrase(),
            excellent.len(),
            ranked.len(),
            Percentage::from_fraction(share)
        );

        if !excellent.is_empty() {
            summary.push_str(&format!(
                " Top performers ({}) should document and share their practices across the network.",
                excellent.join(", ")
            ));
        }
        if !good.is_empty() {
            summary.push_str(&format!(
                " Solid performers ({}) can reach Excellent with targeted improvements.",
                good.join(", ")
            ));
        }
        if !needs_improvement.is_empty() {
            summary.push_str(&format!(
                " Branches needing improvement ({}) require focused intervention plans.",
                needs_improvement.join(", ")
            ));
        }

        summary
    }

    /// Rule-based bullets for one branch.
    pub fn for_branch(branch: &RankedBranch) -> BranchRecommendation {
        BranchRecommendation {
            branch_id: branch.record.branch_id.clone(),
            branch_name: branch.record.branch_name.clone(),
            rank: branch.rank,
            category: branch.category,
            score_percentage: branch.score_percentage,
            priority: Priority::from_score(branch.topsis_score),
            recommendations: Self::bullets(branch),
        }
    }

    fn bullets(branch: &RankedBranch) -> Vec<String> {
        let record = &branch.record;
        let savings = record.figure(Criterion::TotalSavings);
        let disbursements = record.figure(Criterion::TotalDisbursements);
        let members = record.figure(Criterion::ActiveMembers);
        let net_interest = record.figure(Criterion::NetInterestIncome);
        let performance = record.figure(Criterion::PerformancePct);

        let mut bullets = Vec::new();

        if savings < disbursements {
            bullets.push(
                "Strengthen savings mobilization: disbursements currently exceed total savings, \
                 increasing reliance on external funding."
                    .to_string(),
            );
        }
        if members < MEMBERSHIP_FLOOR {
            bullets.push(format!(
                "Expand membership through community outreach and referral campaigns \
                 ({} active members, below the {} target).",
                members, MEMBERSHIP_FLOOR
            ));
        }
        if net_interest < 0.0 {
            bullets.push(
                "Review loan pricing and operating costs to restore positive net interest income."
                    .to_string(),
            );
        }
        if performance < 0.0 {
            bullets.push(
                "Investigate the causes of negative performance and set monthly recovery targets."
                    .to_string(),
            );
        }
        if branch.topsis_score < GOOD_THRESHOLD {
            bullets.push(
                "Prepare a comprehensive performance improvement plan with management oversight."
                    .to_string(),
            );
        }
        if branch.topsis_score >= EXCELLENT_THRESHOLD {
            bullets.push(
                "Maintain current strategies and mentor other branches on proven practices."
                    .to_string(),
            );
        }

        if bullets.is_empty() {
            bullets.push(
                "Maintain current operations and monitor key indicators for further gains."
                    .to_string(),
            );
        }

        bullets
    }
}
