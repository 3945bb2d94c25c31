//! Branch performance records - the engine's input.

use serde::{Deserialize, Serialize};

use super::criteria::Criterion;
use super::metric::{to_finite_float, MetricValue};
use crate::domain::foundation::BranchId;

/// One branch's performance figures for a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub total_savings: MetricValue,
    #[serde(default)]
    pub total_disbursements: MetricValue,
    #[serde(default)]
    pub net_interest_income: MetricValue,
    #[serde(default)]
    pub active_members: MetricValue,
    #[serde(default)]
    pub performance_pct: MetricValue,
}

impl BranchRecord {
    /// Creates a record with a name and no figures.
    pub fn new(branch_name: impl Into<String>) -> Self {
        Self {
            branch_id: None,
            branch_name: branch_name.into(),
            total_savings: MetricValue::Missing,
            total_disbursements: MetricValue::Missing,
            net_interest_income: MetricValue::Missing,
            active_members: MetricValue::Missing,
            performance_pct: MetricValue::Missing,
        }
    }

    /// Sets the branch identifier.
    pub fn with_id(mut self, id: BranchId) -> Self {
        self.branch_id = Some(id);
        self
    }

    /// Sets all five figures from plain numbers.
    pub fn with_figures(
        mut self,
        total_savings: f64,
        total_disbursements: f64,
        net_interest_income: f64,
        active_members: f64,
        performance_pct: f64,
    ) -> Self {
        self.total_savings = total_savings.into();
        self.total_disbursements = total_disbursements.into();
        self.net_interest_income = net_interest_income.into();
        self.active_members = active_members.into();
        self.performance_pct = performance_pct.into();
        self
    }

    /// Sets a single figure.
    pub fn with_metric(mut self, criterion: Criterion, value: impl Into<MetricValue>) -> Self {
        *self.metric_mut(criterion) = value.into();
        self
    }

    /// Returns the raw value for a criterion.
    pub fn metric(&self, criterion: Criterion) -> &MetricValue {
        match criterion {
            Criterion::TotalSavings => &self.total_savings,
            Criterion::TotalDisbursements => &self.total_disbursements,
            Criterion::NetInterestIncome => &self.net_interest_income,
            Criterion::ActiveMembers => &self.active_members,
            Criterion::PerformancePct => &self.performance_pct,
        }
    }

    fn metric_mut(&mut self, criterion: Criterion) -> &mut MetricValue {
        match criterion {
            Criterion::TotalSavings => &mut self.total_savings,
            Criterion::TotalDisbursements => &mut self.total_disbursements,
            Criterion::NetInterestIncome => &mut self.net_interest_income,
            Criterion::ActiveMembers => &mut self.active_members,
            Criterion::PerformancePct => &mut self.performance_pct,
        }
    }

    /// Returns the coerced value for a criterion (missing or invalid = 0.0).
    pub fn figure(&self, criterion: Criterion) -> f64 {
        to_finite_float(self.metric(criterion), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_string_figures_and_missing_fields() {
        let json = r#"{
            "branch_id": 3,
            "branch_name": "Poblacion",
            "total_savings": "125000.75",
            "total_disbursements": 90000,
            "net_interest_income": null
        }"#;

        let record: BranchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.branch_id, Some(BranchId::Numeric(3)));
        assert_eq!(record.figure(Criterion::TotalSavings), 125000.75);
        assert_eq!(record.figure(Criterion::TotalDisbursements), 90000.0);
        assert_eq!(record.figure(Criterion::NetInterestIncome), 0.0);
        assert!(record.active_members.is_missing());
        assert_eq!(record.figure(Criterion::PerformancePct), 0.0);
    }

    #[test]
    fn deserializes_without_identifier() {
        let record: BranchRecord =
            serde_json::from_str(r#"{"branch_id": null, "branch_name": "Annex"}"#).unwrap();
        assert!(record.branch_id.is_none());
        assert_eq!(record.branch_name, "Annex");
    }

    #[test]
    fn with_figures_sets_every_criterion() {
        let record = BranchRecord::new("Main").with_figures(1.0, 2.0, 3.0, 4.0, 5.0);
        let figures: Vec<f64> = Criterion::ALL.iter().map(|c| record.figure(*c)).collect();
        assert_eq!(figures, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn with_metric_overrides_one_criterion() {
        let record = BranchRecord::new("Main")
            .with_figures(1.0, 2.0, 3.0, 4.0, 5.0)
            .with_metric(Criterion::ActiveMembers, "250");
        assert_eq!(record.figure(Criterion::ActiveMembers), 250.0);
        assert_eq!(record.metric(Criterion::ActiveMembers), &MetricValue::from("250"));
    }
}
