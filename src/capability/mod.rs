//! Capability Provider
//!
//! A capability is a named external operation an agent may invoke through a
//! uniform `query(text) -> text` interface. The pipeline core never knows
//! what sits behind it; today that is web search, anything else slots in by
//! implementing the trait.

pub mod web_search;

pub use web_search::WebSearchCapability;

use crate::types::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait Capability: Send + Sync {
    /// Short name used when labeling capability output in agent prompts
    fn name(&self) -> &str;

    /// Run the capability against free-form text, returning free-form text.
    /// Fails with `AppError::Capability` on network/auth failure.
    async fn query(&self, text: &str) -> AppResult<String>;
}
