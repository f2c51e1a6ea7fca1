use crate::capability::Capability;
use crate::config::Credentials;
use crate::search::serpapi::{self, SerpApiClient};
use crate::types::{AppError, AppResult};
use async_trait::async_trait;
use tracing::debug;

/// Web search behind the uniform capability interface.
///
/// Results come back as a numbered plain-text list ready to drop into an
/// agent prompt.
pub struct WebSearchCapability {
    client: SerpApiClient,
}

impl WebSearchCapability {
    pub fn new(client: SerpApiClient) -> Self {
        Self { client }
    }

    /// Build from injected credentials. The key is a validated precondition
    /// by the time credentials exist, so construction cannot fail.
    pub fn from_credentials(credentials: &Credentials, max_results: usize) -> Self {
        Self::new(
            SerpApiClient::new(credentials.search_api_key.clone()).with_max_results(max_results),
        )
    }
}

#[async_trait]
impl Capability for WebSearchCapability {
    fn name(&self) -> &str {
        "web_search"
    }

    async fn query(&self, text: &str) -> AppResult<String> {
        let results = self
            .client
            .search(text)
            .await
            .map_err(|e| AppError::Capability(e.to_string()))?;

        debug!(count = results.len(), "Web search capability returned results");
        Ok(serpapi::format_results(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn credentials(search_key: &str) -> Credentials {
        Credentials {
            reasoning_api_key: "llm-key".to_string(),
            search_api_key: search_key.to_string(),
        }
    }

    #[test]
    fn configured_key_yields_capability() {
        let capability = WebSearchCapability::from_credentials(&credentials("serp-key"), 5);
        assert_eq!(capability.name(), "web_search");
    }
}
