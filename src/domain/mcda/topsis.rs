//! TOPSIS ranking engine.
//!
//! Ranks branches by their relative closeness to an ideal branch built from
//! the best value of every criterion. The pipeline is a sequence of total
//! functions: degenerate data (zero columns, identical branches) resolves to
//! a score of 0 instead of an error.
//!
//! # Pipeline
//!
//! 1. Decision matrix: one row per branch, one column per [`Criterion`]
//! 2. Vector normalization per column
//! 3. Weighting
//! 4. Ideal and negative-ideal solutions
//! 5. Euclidean distances to both
//! 6. Relative closeness score in [0, 1]
//! 7. Ranking and categorization
//! 8. Rule-based recommendations

use super::branch::BranchRecord;
use super::criteria::{CriteriaConfig, Criterion, CriterionWeights, Direction};
use super::errors::McdaError;
use super::ranking::rank_branches;
use super::recommendations::RecommendationGenerator;
use super::result::{AnalysisMetadata, AnalysisResult, RecommendationSource};
use crate::domain::foundation::Timestamp;

/// Number of criteria (matrix columns).
pub const CRITERIA_COUNT: usize = 5;

/// One row of the decision matrix.
pub type Row = [f64; CRITERIA_COUNT];

/// Ideal and negative-ideal points in weighted space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealSolutions {
    pub ideal: Row,
    pub negative_ideal: Row,
}

/// Stateless TOPSIS analyzer.
pub struct TopsisAnalyzer;

impl TopsisAnalyzer {
    /// Runs the full analysis, reporting failures inside the result.
    ///
    /// Never panics and never returns an error; an empty branch list gives
    /// a result with `success == false`.
    pub fn analyze(branches: &[BranchRecord], config: &CriteriaConfig) -> AnalysisResult {
        match Self::try_analyze(branches, config) {
            Ok(result) => result,
            Err(err) => AnalysisResult::failure(&err),
        }
    }

    /// Runs the full analysis.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `branches` is empty
    pub fn try_analyze(
        branches: &[BranchRecord],
        config: &CriteriaConfig,
    ) -> Result<AnalysisResult, McdaError> {
        if branches.is_empty() {
            return Err(McdaError::InvalidInput(
                "no branch data provided for analysis".to_string(),
            ));
        }

        let weights = config.weights();
        let matrix = Self::decision_matrix(branches);
        let normalized = Self::normalize(&matrix);
        let weighted = Self::apply_weights(&normalized, weights);
        let solutions = Self::ideal_solutions(&weighted);
        let scores = Self::closeness(&weighted, &solutions);

        let ranked = rank_branches(branches, &scores);
        let recommendations = RecommendationGenerator::generate(&ranked);

        Ok(AnalysisResult {
            success: true,
            error: None,
            ranked_branches: ranked,
            topsis_scores: scores,
            ideal_solution: solutions.ideal.to_vec(),
            negative_ideal_solution: solutions.negative_ideal.to_vec(),
            recommendations,
            analysis_metadata: Some(AnalysisMetadata {
                total_branches: branches.len(),
                criteria_used: config.specs(),
                weights_used: *weights,
                timestamp: Timestamp::now(),
                recommendation_source: RecommendationSource::RuleBased,
            }),
        })
    }

    /// Coerces every branch's figures into a matrix row.
    pub fn decision_matrix(branches: &[BranchRecord]) -> Vec<Row> {
        branches
            .iter()
            .map(|branch| {
                let mut row = [0.0; CRITERIA_COUNT];
                for (j, criterion) in Criterion::ALL.iter().enumerate() {
                    row[j] = branch.figure(*criterion);
                }
                row
            })
            .collect()
    }

    /// Divides each column by its Euclidean norm; zero-norm columns become 0.
    ///
    /// The norm is folded with `hypot` so very large figures do not overflow
    /// the sum of squares.
    pub fn normalize(matrix: &[Row]) -> Vec<Row> {
        let mut norms = [0.0; CRITERIA_COUNT];
        for (j, norm) in norms.iter_mut().enumerate() {
            *norm = matrix.iter().fold(0.0, |acc: f64, row| acc.hypot(row[j]));
        }

        matrix
            .iter()
            .map(|row| {
                let mut out = [0.0; CRITERIA_COUNT];
                for j in 0..CRITERIA_COUNT {
                    out[j] = if norms[j] != 0.0 && norms[j].is_finite() {
                        row[j] / norms[j]
                    } else {
                        0.0
                    };
                }
                out
            })
            .collect()
    }

    pub fn apply_weights(normalized: &[Row], weights: &CriterionWeights) -> Vec<Row> {
        let w = weights.as_array();
        normalized
            .iter()
            .map(|row| {
                let mut out = [0.0; CRITERIA_COUNT];
                for j in 0..CRITERIA_COUNT {
                    out[j] = row[j] * w[j];
                }
                out
            })
            .collect()
    }

    /// Best and worst value per column, respecting each criterion's direction.
    ///
    /// An empty matrix yields all-zero points.
    pub fn ideal_solutions(weighted: &[Row]) -> IdealSolutions {
        let mut ideal = [0.0; CRITERIA_COUNT];
        let mut negative_ideal = [0.0; CRITERIA_COUNT];

        if weighted.is_empty() {
            return IdealSolutions {
                ideal,
                negative_ideal,
            };
        }

        for (j, criterion) in Criterion::ALL.iter().enumerate() {
            let max = weighted
                .iter()
                .map(|row| row[j])
                .fold(f64::NEG_INFINITY, f64::max);
            let min = weighted
                .iter()
                .map(|row| row[j])
                .fold(f64::INFINITY, f64::min);

            let (best, worst) = match criterion.direction() {
                Direction::Benefit => (max, min),
                Direction::Cost => (min, max),
            };
            ideal[j] = best;
            negative_ideal[j] = worst;
        }

        IdealSolutions {
            ideal,
            negative_ideal,
        }
    }

    /// Euclidean distance of each row to the ideal and negative-ideal points.
    pub fn distances(weighted: &[Row], solutions: &IdealSolutions) -> Vec<(f64, f64)> {
        weighted
            .iter()
            .map(|row| {
                (
                    euclidean(row, &solutions.ideal),
                    euclidean(row, &solutions.negative_ideal),
                )
            })
            .collect()
    }

    /// Relative closeness `d- / (d+ + d-)` per row, in input order.
    pub fn closeness(weighted: &[Row], solutions: &IdealSolutions) -> Vec<f64> {
        Self::distances(weighted, solutions)
            .into_iter()
            .map(|(to_ideal, to_negative)| closeness_score(to_ideal, to_negative))
            .collect()
    }
}

/// Ranks `branches` with the default criteria, optionally overriding weights.
///
/// An invalid override gives a failed result carrying the weight error.
pub fn analyze(branches: &[BranchRecord], weights: Option<CriterionWeights>) -> AnalysisResult {
    let config = match weights {
        Some(weights) => match CriteriaConfig::with_weights(weights) {
            Ok(config) => config,
            Err(err) => return AnalysisResult::failure(&err),
        },
        None => CriteriaConfig::default(),
    };
    TopsisAnalyzer::analyze(branches, &config)
}

fn euclidean(a: &Row, b: &Row) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn closeness_score(to_ideal: f64, to_negative: f64) -> f64 {
    let denominator = to_ideal + to_negative;
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let score = to_negative / denominator;
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
