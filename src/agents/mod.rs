//! Agent System
//!
//! The fixed roster of research agents behind the pipeline:
//!
//! - **Research Expert**: finds accurate, age-appropriate information
//! - **Content Writer**: turns findings into an engaging explanation
//! - **Visual Storyteller**: renders the topic as a textual flowchart
//!
//! An [`Agent`] is a role with a goal, a backstory, and a set of bound
//! capabilities. Agents hold no per-run state, so one roster is safely
//! reused across many pipeline runs.

pub mod researcher;
pub mod storyteller;
pub mod writer;

use crate::capability::{Capability, WebSearchCapability};
use crate::config::{Credentials, LLMConfig};
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

const AGENT_MAX_TOKENS: u32 = 2048;
const AGENT_TEMPERATURE: f32 = 0.7;

/// A role-bound executor that turns an instruction plus context into text,
/// optionally grounding itself through its capabilities first.
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    capabilities: Vec<Arc<dyn Capability>>,
    llm: Arc<LLM>,
    provider: String,
    model: String,
}

impl Agent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        capabilities: Vec<Arc<dyn Capability>>,
        llm: Arc<LLM>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            capabilities,
            llm,
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Execute one instruction against this agent.
    ///
    /// Bound capabilities are queried first and their output is folded into
    /// the prompt as reference material. A single capability failure is
    /// tolerated; when every capability fails, or the reasoning call fails,
    /// the agent signals failure. No retry happens here, that policy belongs
    /// to the orchestrator.
    pub async fn invoke(&self, instruction: &str, context: &str) -> AppResult<String> {
        debug!(role = %self.role, instruction_len = instruction.len(), "Agent invoked");

        let mut material: Vec<(String, String)> = Vec::new();
        let mut capability_failures: Vec<String> = Vec::new();

        for capability in &self.capabilities {
            match capability.query(instruction).await {
                Ok(output) => material.push((capability.name().to_string(), output)),
                Err(e) => {
                    warn!(role = %self.role, capability = capability.name(), error = %e, "Capability call failed");
                    capability_failures.push(format!("{}: {}", capability.name(), e));
                }
            }
        }

        if !self.capabilities.is_empty() && material.is_empty() {
            return Err(AppError::Agent {
                role: self.role.clone(),
                cause: format!(
                    "all capability calls failed ({})",
                    capability_failures.join("; ")
                ),
            });
        }

        let request = LLMRequest {
            provider: self.provider.clone(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(self.build_prompt(
                instruction,
                context,
                &material,
            ))],
            max_tokens: Some(AGENT_MAX_TOKENS),
            temperature: Some(AGENT_TEMPERATURE),
            system_instruction: Some(self.persona()),
        };

        let response = self
            .llm
            .create_chat_completion(&request)
            .await
            .map_err(|e| AppError::Agent {
                role: self.role.clone(),
                cause: e.to_string(),
            })?;

        info!(role = %self.role, response_len = response.content.len(), "Agent completed");
        Ok(response.content)
    }

    fn persona(&self) -> String {
        format!(
            "You are a {}. {} Your goal: {}.",
            self.role, self.backstory, self.goal
        )
    }

    fn build_prompt(
        &self,
        instruction: &str,
        context: &str,
        material: &[(String, String)],
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(instruction);

        if !context.trim().is_empty() {
            prompt.push_str("\n\n## Context from earlier work\n");
            prompt.push_str(context);
        }

        for (name, output) in material {
            prompt.push_str(&format!("\n\n## Reference material ({})\n", name));
            prompt.push_str(output);
        }

        prompt
    }
}

/// Builds the agent roster from injected credentials and configuration.
///
/// One factory per process: the shared `LLM` front and web search capability
/// are constructed once and handed to every agent.
pub struct AgentFactory {
    llm: Arc<LLM>,
    provider: String,
    model: String,
    web_search: Option<Arc<dyn Capability>>,
}

impl AgentFactory {
    pub fn new(
        credentials: &Credentials,
        llm_config: &LLMConfig,
        web_search: Option<WebSearchCapability>,
    ) -> AppResult<Self> {
        let llm = LLM::new(LLMProviderConfig {
            name: llm_config.provider.clone(),
            api_key: credentials.reasoning_api_key.clone(),
        })?;

        Ok(Self {
            llm: Arc::new(llm),
            provider: llm_config.provider.clone(),
            model: llm_config.model.clone(),
            web_search: web_search.map(|ws| Arc::new(ws) as Arc<dyn Capability>),
        })
    }

    pub fn researcher(&self) -> Agent {
        researcher::build(self)
    }

    pub fn writer(&self) -> Agent {
        writer::build(self)
    }

    pub fn storyteller(&self) -> Agent {
        storyteller::build(self)
    }

    pub(crate) fn assemble(&self, role: &str, goal: &str, backstory: &str) -> Agent {
        let capabilities = self.web_search.iter().map(Arc::clone).collect();

        Agent::new(
            role,
            goal,
            backstory,
            capabilities,
            Arc::clone(&self.llm),
            self.provider.clone(),
            self.model.clone(),
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Stub adapters and capabilities shared by the pipeline tests.

    use super::*;
    use crate::llm::provider::LLMAdapter;
    use crate::types::{LLMResponse, TokenUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// LLM stub that echoes the full prompt back, prefixed with the role it
    /// saw, and counts invocations.
    pub struct EchoAdapter {
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LLMAdapter for EchoAdapter {
        async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let prompt = request
                .messages
                .first()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(LLMResponse {
                content: format!("echo: {}", prompt),
                finish_reason: "stop".to_string(),
                usage: TokenUsage::default(),
            })
        }
    }

    /// LLM stub that always fails, counting invocations.
    pub struct FailingAdapter {
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LLMAdapter for FailingAdapter {
        async fn create_chat_completion(&self, _request: &LLMRequest) -> AppResult<LLMResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::LLMApi("stub reasoning outage".to_string()))
        }
    }

    /// Capability stub with a canned answer and a call counter.
    pub struct StubCapability {
        pub answer: AppResult<String>,
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Capability for StubCapability {
        fn name(&self) -> &str {
            "stub_search"
        }

        async fn query(&self, _text: &str) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(AppError::Capability("stub capability outage".to_string())),
            }
        }
    }

    pub fn echo_agent(role: &str, calls: Arc<AtomicUsize>) -> Agent {
        Agent::new(
            role,
            "test goal",
            "test backstory",
            Vec::new(),
            Arc::new(LLM::from_adapter(Box::new(EchoAdapter { calls }), "stub")),
            "stub",
            "stub-model",
        )
    }

    pub fn failing_agent(role: &str, calls: Arc<AtomicUsize>) -> Agent {
        Agent::new(
            role,
            "test goal",
            "test backstory",
            Vec::new(),
            Arc::new(LLM::from_adapter(
                Box::new(FailingAdapter { calls }),
                "stub",
            )),
            "stub",
            "stub-model",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::llm::provider::LLM;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn invoke_threads_instruction_and_context_into_prompt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let agent = echo_agent("Research Expert", Arc::clone(&calls));

        let output = agent
            .invoke("Research volcanoes", "Earlier notes about magma")
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(output.contains("Research volcanoes"));
        assert!(output.contains("Earlier notes about magma"));
    }

    #[tokio::test]
    async fn capability_output_lands_in_prompt() {
        let llm_calls = Arc::new(AtomicUsize::new(0));
        let cap_calls = Arc::new(AtomicUsize::new(0));

        let agent = Agent::new(
            "Research Expert",
            "goal",
            "backstory",
            vec![Arc::new(StubCapability {
                answer: Ok("1. Volcano facts from the web".to_string()),
                calls: Arc::clone(&cap_calls),
            })],
            Arc::new(LLM::from_adapter(
                Box::new(EchoAdapter {
                    calls: Arc::clone(&llm_calls),
                }),
                "stub",
            )),
            "stub",
            "stub-model",
        );

        let output = agent.invoke("Research volcanoes", "").await.unwrap();

        assert_eq!(cap_calls.load(Ordering::SeqCst), 1);
        assert!(output.contains("Volcano facts from the web"));
        assert!(output.contains("stub_search"));
    }

    #[tokio::test]
    async fn all_capabilities_failing_is_an_agent_failure() {
        let llm_calls = Arc::new(AtomicUsize::new(0));
        let cap_calls = Arc::new(AtomicUsize::new(0));

        let agent = Agent::new(
            "Research Expert",
            "goal",
            "backstory",
            vec![Arc::new(StubCapability {
                answer: Err(AppError::Capability("down".to_string())),
                calls: Arc::clone(&cap_calls),
            })],
            Arc::new(LLM::from_adapter(
                Box::new(EchoAdapter {
                    calls: Arc::clone(&llm_calls),
                }),
                "stub",
            )),
            "stub",
            "stub-model",
        );

        let err = agent.invoke("Research volcanoes", "").await.unwrap_err();

        match err {
            AppError::Agent { role, cause } => {
                assert_eq!(role, "Research Expert");
                assert!(cause.contains("capability"));
            }
            other => panic!("expected Agent error, got {:?}", other),
        }
        // Reasoning is never reached when grounding is impossible
        assert_eq!(llm_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reasoning_failure_becomes_agent_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let agent = failing_agent("Content Writer", Arc::clone(&calls));

        let err = agent.invoke("Write about volcanoes", "").await.unwrap_err();

        assert!(matches!(err, AppError::Agent { .. }));
        // No internal retry
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
