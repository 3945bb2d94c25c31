//! Identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a cooperative branch.
///
/// Upstream records carry either a numeric database key or a textual code,
/// so both shapes are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchId {
    Numeric(i64),
    Code(String),
}

impl BranchId {
    /// Creates a textual branch identifier.
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }
}

impl From<i64> for BranchId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchId::Numeric(id) => write!(f, "{}", id),
            BranchId::Code(code) => write!(f, "{}", code),
        }
    }
}
