//! Criteria and weight configuration for the ranking engine.

use serde::{Deserialize, Serialize};

use super::errors::McdaError;

/// Allowed distance of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// The five branch figures used as ranking criteria, in decision-matrix column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TotalSavings,
    TotalDisbursements,
    NetInterestIncome,
    ActiveMembers,
    PerformancePct,
}

impl Criterion {
    /// All criteria in column order.
    pub const ALL: [Criterion; 5] = [
        Criterion::TotalSavings,
        Criterion::TotalDisbursements,
        Criterion::NetInterestIncome,
        Criterion::ActiveMembers,
        Criterion::PerformancePct,
    ];

    /// Field name on the branch record.
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::TotalSavings => "total_savings",
            Criterion::TotalDisbursements => "total_disbursements",
            Criterion::NetInterestIncome => "net_interest_income",
            Criterion::ActiveMembers => "active_members",
            Criterion::PerformancePct => "performance_pct",
        }
    }

    /// Display label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::TotalSavings => "Total Savings",
            Criterion::TotalDisbursements => "Total Disbursements",
            Criterion::NetInterestIncome => "Net Interest Income",
            Criterion::ActiveMembers => "Active Members",
            Criterion::PerformancePct => "Performance %",
        }
    }

    /// Whether higher or lower values are preferred.
    ///
    /// Disbursements are scored as a cost under the cooperative's convention.
    pub fn direction(&self) -> Direction {
        match self {
            Criterion::TotalDisbursements => Direction::Cost,
            _ => Direction::Benefit,
        }
    }
}

/// Preference direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    Cost,
}

/// Weights for all five criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub total_savings: f64,
    pub total_disbursements: f64,
    pub net_interest_income: f64,
    pub active_members: f64,
    pub performance_pct: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            total_savings: 0.25,
            total_disbursements: 0.20,
            net_interest_income: 0.30,
            active_members: 0.15,
            performance_pct: 0.10,
        }
    }
}

impl CriterionWeights {
    /// Returns the weight of one criterion.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::TotalSavings => self.total_savings,
            Criterion::TotalDisbursements => self.total_disbursements,
            Criterion::NetInterestIncome => self.net_interest_income,
            Criterion::ActiveMembers => self.active_members,
            Criterion::PerformancePct => self.performance_pct,
        }
    }

    /// Weights in column order.
    pub fn as_array(&self) -> [f64; 5] {
        Criterion::ALL.map(|c| self.get(c))
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Checks that every weight lies in [0, 1] and the set sums to 1.0 within tolerance.
    pub fn validate(&self) -> Result<(), McdaError> {
        for criterion in Criterion::ALL {
            let weight = self.get(criterion);
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(McdaError::InvalidWeights(format!(
                    "weight for {} must be between 0 and 1, got {}",
                    criterion.key(),
                    weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(McdaError::InvalidWeights(format!(
                "weights must sum to 1.0 (±{}), got {:.4}",
                WEIGHT_SUM_TOLERANCE, sum
            )));
        }

        Ok(())
    }
}

/// A partial weight change; unset criteria keep their current weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightUpdate {
    #[serde(default)]
    pub total_savings: Option<f64>,
    #[serde(default)]
    pub total_disbursements: Option<f64>,
    #[serde(default)]
    pub net_interest_income: Option<f64>,
    #[serde(default)]
    pub active_members: Option<f64>,
    #[serde(default)]
    pub performance_pct: Option<f64>,
}

impl WeightUpdate {
    /// Sets one criterion's weight.
    pub fn with(mut self, criterion: Criterion, weight: f64) -> Self {
        let slot = match criterion {
            Criterion::TotalSavings => &mut self.total_savings,
            Criterion::TotalDisbursements => &mut self.total_disbursements,
            Criterion::NetInterestIncome => &mut self.net_interest_income,
            Criterion::ActiveMembers => &mut self.active_members,
            Criterion::PerformancePct => &mut self.performance_pct,
        };
        *slot = Some(weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == WeightUpdate::default()
    }

    /// Applies the update over `base`.
    pub fn merged_over(&self, base: &CriterionWeights) -> CriterionWeights {
        CriterionWeights {
            total_savings: self.total_savings.unwrap_or(base.total_savings),
            total_disbursements: self.total_disbursements.unwrap_or(base.total_disbursements),
            net_interest_income: self.net_interest_income.unwrap_or(base.net_interest_income),
            active_members: self.active_members.unwrap_or(base.active_members),
            performance_pct: self.performance_pct.unwrap_or(base.performance_pct),
        }
    }
}

impl From<CriterionWeights> for WeightUpdate {
    fn from(weights: CriterionWeights) -> Self {
        Self {
            total_savings: Some(weights.total_savings),
            total_disbursements: Some(weights.total_disbursements),
            net_interest_income: Some(weights.net_interest_income),
            active_members: Some(weights.active_members),
            performance_pct: Some(weights.performance_pct),
        }
    }
}

/// One criterion as used in an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub key: Criterion,
    pub label: String,
    pub direction: Direction,
    pub weight: f64,
}

/// Read-only view of the active criteria and weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaConfiguration {
    pub criteria: Vec<CriterionSpec>,
    pub weights: CriterionWeights,
}

/// The active weight configuration.
///
/// Weights only change through [`CriteriaConfig::update_weights`], which
/// validates the merged set before committing it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CriteriaConfig {
    weights: CriterionWeights,
}

impl CriteriaConfig {
    /// Creates a configuration with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from a full, validated weight set.
    pub fn with_weights(weights: CriterionWeights) -> Result<Self, McdaError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &CriterionWeights {
        &self.weights
    }

    /// Criteria with their direction and current weight, in column order.
    pub fn specs(&self) -> Vec<CriterionSpec> {
        Criterion::ALL
            .iter()
            .map(|c| CriterionSpec {
                key: *c,
                label: c.label().to_string(),
                direction: c.direction(),
                weight: self.weights.get(*c),
            })
            .collect()
    }

    /// Merges `update` over the current weights and commits if valid.
    ///
    /// On error the current weights are left untouched.
    pub fn update_weights(&mut self, update: WeightUpdate) -> Result<(), McdaError> {
        let merged = update.merged_over(&self.weights);
        merged.validate()?;
        self.weights = merged;
        Ok(())
    }

    pub fn criteria_configuration(&self) -> CriteriaConfiguration {
        CriteriaConfiguration {
            criteria: self.specs(),
            weights: self.weights,
        }
    }
}
