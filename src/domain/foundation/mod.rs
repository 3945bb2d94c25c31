//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the branch analysis domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::BranchId;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
