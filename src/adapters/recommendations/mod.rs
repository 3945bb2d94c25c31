//! Recommendation writer adapters.
//!
//! - `LlmRecommendationWriter` - Generated text via an `AIProvider`

mod llm_writer;

pub use llm_writer::LlmRecommendationWriter;
