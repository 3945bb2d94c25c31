//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockAIProvider;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
