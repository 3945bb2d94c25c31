//! UpdateWeightsHandler - Command handler for changing criterion weights.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::CriteriaStore;
use crate::domain::foundation::DomainError;
use crate::domain::mcda::{CriteriaConfiguration, WeightUpdate};

/// Command to change some or all criterion weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWeightsCommand {
    #[serde(flatten)]
    pub update: WeightUpdate,
}

impl UpdateWeightsCommand {
    pub fn new(update: WeightUpdate) -> Self {
        Self { update }
    }
}

/// Handler for weight updates.
///
/// The update is merged over the current weights and committed only if the
/// merged set is valid.
pub struct UpdateWeightsHandler {
    store: CriteriaStore,
}

impl UpdateWeightsHandler {
    pub fn new(store: CriteriaStore) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateWeightsCommand,
    ) -> Result<CriteriaConfiguration, DomainError> {
        match self.store.update(cmd.update).await {
            Ok(configuration) => {
                info!(weights = ?configuration.weights, "Criterion weights updated");
                Ok(configuration)
            }
            Err(err) => {
                warn!(error = %err, "Rejected criterion weight update");
                Err(err.into())
            }
        }
    }
}
