use crate::agents::AgentFactory;
use crate::capability::WebSearchCapability;
use crate::config::Config;
use crate::history::SessionHistoryStore;
use crate::pipeline::{AgentRoster, Orchestrator};
use crate::types::AppResult;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
    pub history: Arc<SessionHistoryStore>,
}

impl AppState {
    /// Wire the full pipeline from configuration. Fails with a
    /// `Configuration` error before anything runs when a required
    /// credential is missing.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let credentials = config.credentials()?;

        let web_search = config
            .search
            .enabled
            .then(|| WebSearchCapability::from_credentials(&credentials, config.search.max_results));

        let factory = AgentFactory::new(&credentials, &config.llm, web_search)?;
        let roster = AgentRoster::from_factory(&factory);
        let orchestrator = Orchestrator::new(roster, config.pipeline.max_stage_retries);

        Ok(Self {
            config,
            orchestrator: Arc::new(orchestrator),
            history: Arc::new(SessionHistoryStore::new()),
        })
    }
}

// Request/response DTOs for the HTTP surface

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResearchRequest {
    pub topic: String,
    pub age: u8,
    #[serde(default)]
    pub include_visual: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<crate::history::SessionHistoryEntry>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
