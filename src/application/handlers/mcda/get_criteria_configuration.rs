//! GetCriteriaConfigurationHandler - Query handler for the active criteria.

use super::CriteriaStore;
use crate::domain::mcda::CriteriaConfiguration;

/// Returns the active criteria, directions and weights.
pub struct GetCriteriaConfigurationHandler {
    store: CriteriaStore,
}

impl GetCriteriaConfigurationHandler {
    pub fn new(store: CriteriaStore) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> CriteriaConfiguration {
        self.store.snapshot().await.criteria_configuration()
    }
}
