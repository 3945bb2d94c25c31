//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BranchSource` - Supplies branch performance records
//! - `RecommendationWriter` - Optional generated recommendation text
//! - `AIProvider` - LLM completions used by recommendation writers

mod ai_provider;
mod branch_source;
mod recommendation_writer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    ReplyFormat, RequestMetadata, TokenUsage,
};
pub use branch_source::BranchSource;
pub use recommendation_writer::{RecommendationRequest, RecommendationWriter, ReportContext};
