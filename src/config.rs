use anyhow::Result;
use serde::Deserialize;
use std::env;

use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub api_key: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serpapi_key: String,
    pub enabled: bool,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Extra attempts per failed stage before the run transitions to Failed.
    /// 0 keeps the baseline no-retry behavior.
    pub max_stage_retries: u32,
}

/// Credential strings handed to the capability provider and agent factory
/// by constructor injection. Core logic never reads the process environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub reasoning_api_key: String,
    pub search_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            llm: LLMConfig {
                api_key: env::var("LLM_API_KEY").unwrap_or_default(),
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            search: SearchConfig {
                serpapi_key: env::var("SERPAPI_KEY").unwrap_or_default(),
                enabled: env::var("SEARCH_ENABLED")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()?,
                max_results: env::var("SEARCH_MAX_RESULTS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
            },
            pipeline: PipelineConfig {
                max_stage_retries: env::var("MAX_STAGE_RETRIES")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()?,
            },
        })
    }

    /// Extract injectable credentials, failing before any stage runs when a
    /// required key is absent. The search key is required unless search is
    /// explicitly disabled; `SEARCH_ENABLED=false` is the opt-out.
    pub fn credentials(&self) -> AppResult<Credentials> {
        if self.llm.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "LLM_API_KEY must be set before the pipeline can run".to_string(),
            ));
        }

        if self.search.enabled && self.search.serpapi_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "SERPAPI_KEY must be set while search is enabled (SEARCH_ENABLED=false opts out)"
                    .to_string(),
            ));
        }

        Ok(Credentials {
            reasoning_api_key: self.llm.api_key.clone(),
            search_api_key: self.search.serpapi_key.clone(),
        })
    }
}
