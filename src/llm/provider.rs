use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};
use async_trait::async_trait;

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let adapter: Box<dyn LLMAdapter> = match provider.name.as_str() {
            "openai" => Box::new(crate::llm::openai::OpenAIAdapter::new(&provider.api_key)),
            "anthropic" => Box::new(crate::llm::anthropic::AnthropicAdapter::new(&provider.api_key)),
            _ => {
                return Err(AppError::Configuration(format!(
                    "Unsupported LLM provider: {}",
                    provider.name
                )))
            }
        };

        Ok(Self {
            adapter,
            provider_name: provider.name,
        })
    }

    /// Wrap a pre-built adapter. Used by tests to inject stubs.
    pub fn from_adapter(adapter: Box<dyn LLMAdapter>, provider_name: impl Into<String>) -> Self {
        Self {
            adapter,
            provider_name: provider_name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_a_configuration_error() {
        let err = LLM::new(LLMProviderConfig {
            name: "palmtree".to_string(),
            api_key: "key".to_string(),
        })
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn known_providers_construct() {
        for name in ["openai", "anthropic"] {
            let llm = LLM::new(LLMProviderConfig {
                name: name.to_string(),
                api_key: "key".to_string(),
            })
            .unwrap();
            assert_eq!(llm.provider_name(), name);
        }
    }
}
