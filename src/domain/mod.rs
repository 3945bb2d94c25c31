//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `mcda` - TOPSIS branch ranking, weight configuration and recommendations

pub mod foundation;
pub mod mcda;
