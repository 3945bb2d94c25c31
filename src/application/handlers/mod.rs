//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod mcda;

pub use mcda::{
    AnalyzeBranchesCommand, AnalyzeBranchesHandler, CriteriaStore,
    GetCriteriaConfigurationHandler, UpdateWeightsCommand, UpdateWeightsHandler,
    DEFAULT_RECOMMENDATION_TIMEOUT,
};
