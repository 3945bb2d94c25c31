//! Ranking and categorization of scored branches.

use serde::{Deserialize, Serialize};

use super::branch::BranchRecord;
use crate::domain::foundation::Percentage;

/// Minimum score for the Excellent category.
pub const EXCELLENT_THRESHOLD: f64 = 0.75;

/// Minimum score for the Good category.
pub const GOOD_THRESHOLD: f64 = 0.50;

/// Performance band derived from a TOPSIS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Category {
    /// Maps a score onto its band.
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Category::Excellent
        } else if score >= GOOD_THRESHOLD {
            Category::Good
        } else {
            Category::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Excellent => "Excellent",
            Category::Good => "Good",
            Category::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// A branch record with its score, rank and category attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBranch {
    #[serde(flatten)]
    pub record: BranchRecord,
    #[serde(rename = "topsisScore")]
    pub topsis_score: f64,
    pub rank: usize,
    pub category: Category,
    #[serde(rename = "scorePercentage")]
    pub score_percentage: Percentage,
}

impl RankedBranch {
    pub fn branch_name(&self) -> &str {
        &self.record.branch_name
    }
}

/// Orders branches by descending score and assigns ranks 1..N.
///
/// `scores[i]` belongs to `branches[i]`. Equal scores keep their input order.
/// Records are cloned into the output; the input is never modified.
pub fn rank_branches(branches: &[BranchRecord], scores: &[f64]) -> Vec<RankedBranch> {
    let mut order: Vec<usize> = (0..branches.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    order
        .into_iter()
        .enumerate()
        .map(|(position, index)| {
            let score = scores[index];
            RankedBranch {
                record: branches[index].clone(),
                topsis_score: score,
                rank: position + 1,
                category: Category::from_score(score),
                score_percentage: Percentage::from_fraction(score),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BranchId;

    fn branches(names: &[&str]) -> Vec<BranchRecord> {
        names.iter().map(|n| BranchRecord::new(*n)).collect()
    }

    #[test]
    fn category_thresholds_are_inclusive_at_lower_bound() {
        assert_eq!(Category::from_score(1.0), Category::Excellent);
        assert_eq!(Category::from_score(0.75), Category::Excellent);
        assert_eq!(Category::from_score(0.7499), Category::Good);
        assert_eq!(Category::from_score(0.50), Category::Good);
        assert_eq!(Category::from_score(0.4999), Category::NeedsImprovement);
        assert_eq!(Category::from_score(0.0), Category::NeedsImprovement);
    }

    #[test]
    fn category_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_string(&Category::NeedsImprovement).unwrap(),
            "\"Needs Improvement\""
        );
        assert_eq!(serde_json::to_string(&Category::Good).unwrap(), "\"Good\"");
    }

    #[test]
    fn rank_sorts_descending_by_score() {
        let input = branches(&["A", "B", "C"]);
        let ranked = rank_branches(&input, &[0.2, 0.9, 0.6]);

        let names: Vec<&str> = ranked.iter().map(|r| r.branch_name()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn rank_keeps_input_order_for_ties() {
        let input = branches(&["First", "Second", "Third"]);
        let ranked = rank_branches(&input, &[0.5, 0.5, 0.5]);

        let names: Vec<&str> = ranked.iter().map(|r| r.branch_name()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn rank_attaches_category_and_percentage() {
        let input = branches(&["A", "B"]);
        let ranked = rank_branches(&input, &[0.756, 0.31]);

        assert_eq!(ranked[0].category, Category::Excellent);
        assert_eq!(ranked[0].score_percentage.value(), 76);
        assert_eq!(ranked[1].category, Category::NeedsImprovement);
        assert_eq!(ranked[1].score_percentage.value(), 31);
    }

    #[test]
    fn ranked_branch_serializes_flat_with_derived_fields() {
        let input = vec![BranchRecord::new("Main")
            .with_id(BranchId::Numeric(1))
            .with_figures(1.0, 2.0, 3.0, 4.0, 5.0)];
        let ranked = rank_branches(&input, &[0.8]);

        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["branch_name"], "Main");
        assert_eq!(json["branch_id"], 1);
        assert_eq!(json["total_savings"], 1.0);
        assert_eq!(json["topsisScore"], 0.8);
        assert_eq!(json["rank"], 1);
        assert_eq!(json["category"], "Excellent");
        assert_eq!(json["scorePercentage"], 80);
    }
}
