//! CriteriaStore - Shared, caller-owned weight configuration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::mcda::{CriteriaConfig, CriteriaConfiguration, McdaError, WeightUpdate};

/// Holds the active [`CriteriaConfig`] for concurrent handlers.
///
/// Readers take a copy of the configuration; writers hold the write lock
/// across validate-then-commit, so a partially applied weight set is never
/// observable.
#[derive(Debug, Clone, Default)]
pub struct CriteriaStore {
    inner: Arc<RwLock<CriteriaConfig>>,
}

impl CriteriaStore {
    pub fn new(config: CriteriaConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current configuration.
    pub async fn snapshot(&self) -> CriteriaConfig {
        *self.inner.read().await
    }

    /// Applies a weight update; on error the stored weights are unchanged.
    pub async fn update(&self, update: WeightUpdate) -> Result<CriteriaConfiguration, McdaError> {
        let mut config = self.inner.write().await;
        config.update_weights(update)?;
        Ok(config.criteria_configuration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mcda::{Criterion, CriterionWeights};

    #[tokio::test]
    async fn default_store_holds_default_weights() {
        let store = CriteriaStore::default();
        assert_eq!(*store.snapshot().await.weights(), CriterionWeights::default());
    }

    #[tokio::test]
    async fn clones_share_the_same_configuration() {
        let store = CriteriaStore::default();
        let other = store.clone();

        other
            .update(
                WeightUpdate::default()
                    .with(Criterion::TotalSavings, 0.30)
                    .with(Criterion::PerformancePct, 0.05),
            )
            .await
            .unwrap();

        assert_eq!(store.snapshot().await.weights().total_savings, 0.30);
    }

    #[tokio::test]
    async fn rejected_update_keeps_previous_weights() {
        let store = CriteriaStore::default();

        let err = store
            .update(WeightUpdate::default().with(Criterion::TotalSavings, 0.9))
            .await
            .unwrap_err();

        assert!(matches!(err, McdaError::InvalidWeights(_)));
        assert_eq!(*store.snapshot().await.weights(), CriterionWeights::default());
    }

    #[tokio::test]
    async fn concurrent_updates_never_expose_partial_sets() {
        let store = CriteriaStore::default();
        let savings_heavy = WeightUpdate::from(CriterionWeights {
            total_savings: 0.5,
            total_disbursements: 0.5,
            net_interest_income: 0.0,
            active_members: 0.0,
            performance_pct: 0.0,
        });
        let income_heavy = WeightUpdate::from(CriterionWeights {
            total_savings: 0.0,
            total_disbursements: 0.0,
            net_interest_income: 0.6,
            active_members: 0.2,
            performance_pct: 0.2,
        });

        let mut tasks = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let update = if i % 2 == 0 { savings_heavy } else { income_heavy };
            tasks.push(tokio::spawn(async move {
                store.update(update).await.unwrap();
                store.snapshot().await.weights().validate()
            }));
        }

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }
        assert!(store.snapshot().await.weights().validate().is_ok());
    }
}
