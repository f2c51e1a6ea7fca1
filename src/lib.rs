// Kids Research Helper - agent pipeline for age-appropriate research output

pub mod agents;
pub mod capability; // Uniform query(text) -> text interface over external tools
pub mod config;
pub mod history;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod search; // Search APIs (SerpAPI)
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use pipeline::{Orchestrator, PipelineRun, RunStatus};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
