//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (analysis, weight updates) are separated from query
//! handlers (criteria configuration).

pub mod handlers;

pub use handlers::{
    AnalyzeBranchesCommand, AnalyzeBranchesHandler, CriteriaStore,
    GetCriteriaConfigurationHandler, UpdateWeightsCommand, UpdateWeightsHandler,
    DEFAULT_RECOMMENDATION_TIMEOUT,
};
