//! Branch ranking handlers.
//!
//! ## Commands
//! - Analyze branches (TOPSIS ranking plus recommendations)
//! - Update criterion weights
//!
//! ## Queries
//! - Get the active criteria configuration

mod analyze_branches;
mod criteria_store;
mod get_criteria_configuration;
mod update_weights;

pub use criteria_store::CriteriaStore;

// Commands
pub use analyze_branches::{
    AnalyzeBranchesCommand, AnalyzeBranchesHandler, DEFAULT_RECOMMENDATION_TIMEOUT,
};
pub use update_weights::{UpdateWeightsCommand, UpdateWeightsHandler};

// Queries
pub use get_criteria_configuration::GetCriteriaConfigurationHandler;
