//! Branch source port - supplies branch performance records.
//!
//! The engine ranks whatever slice it is handed; this port is how hosts
//! plug in the system that actually holds the figures (a JSON export, a
//! database query, a fixture).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::mcda::BranchRecord;

/// Supplier of branch records for one reporting period.
#[async_trait]
pub trait BranchSource: Send + Sync {
    /// Loads all branch records.
    ///
    /// An empty list is not an error here; the analysis reports it.
    async fn load(&self) -> Result<Vec<BranchRecord>, DomainError>;

    /// Human-readable description of where records come from, for logging.
    fn describe(&self) -> String;
}
