//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers (OpenAI, mock)
//! - `branch_source` - Branch record suppliers (JSON file, in-memory)
//! - `recommendations` - Generated recommendation text

pub mod ai;
pub mod branch_source;
pub mod recommendations;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use branch_source::{InMemoryBranchSource, JsonFileBranchSource};
pub use recommendations::LlmRecommendationWriter;
