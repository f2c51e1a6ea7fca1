//! Pipeline stages
//!
//! A [`Stage`] is one unit of pipeline work: an agent, a description rendered
//! from the submission, an expected-output hint, and a context builder over
//! prior stage results. Stages are created fresh per run and discarded when
//! the run ends.

use crate::agents::Agent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    Success,
    Failed { reason: String },
}

/// Produced exactly once per stage per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_id: String,
    pub role: String,
    /// Empty on failure; a failed stage's text is diagnostic only and never
    /// surfaced as final output.
    pub output: String,
    pub status: StageStatus,
}

impl StageResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, StageStatus::Success)
    }
}

pub struct Stage {
    pub id: String,
    agent: Arc<Agent>,
    topic: String,
    age: u8,
    /// Instruction rendered from topic and age
    pub description: String,
    /// Plain-text hint describing the required shape of the result. Passed
    /// to the agent as an instruction, never parsed or enforced.
    pub expected_output: String,
}

impl Stage {
    pub fn new(
        id: impl Into<String>,
        agent: Arc<Agent>,
        topic: impl Into<String>,
        age: u8,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agent,
            topic: topic.into(),
            age,
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Concatenate all prior stage outputs, in order, labeled by role, under
    /// a header restating the original inputs. Failed prior stages never
    /// reach this point: the orchestrator stops the run first.
    pub fn build_context(&self, prior_results: &[StageResult]) -> String {
        let mut context = format!(
            "Topic: {} (for a {}-year-old reader)\n",
            self.topic, self.age
        );

        for result in prior_results {
            context.push_str(&format!("\n### {}\n{}\n", result.role, result.output));
        }

        context
    }

    /// Run this stage's agent. Any agent failure is wrapped into a
    /// `Failed` result rather than propagated, so the orchestrator decides
    /// whether the run continues.
    pub async fn execute(&self, prior_results: &[StageResult]) -> StageResult {
        info!(stage_id = %self.id, role = %self.agent.role, "Executing stage");

        let instruction = format!(
            "{}\n\nExpected output: {}",
            self.description, self.expected_output
        );
        let context = self.build_context(prior_results);

        match self.agent.invoke(&instruction, &context).await {
            Ok(output) => {
                info!(stage_id = %self.id, output_len = output.len(), "Stage succeeded");
                StageResult {
                    stage_id: self.id.clone(),
                    role: self.agent.role.clone(),
                    output,
                    status: StageStatus::Success,
                }
            }
            Err(e) => {
                warn!(stage_id = %self.id, error = %e, "Stage failed");
                StageResult {
                    stage_id: self.id.clone(),
                    role: self.agent.role.clone(),
                    output: String::new(),
                    status: StageStatus::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::{echo_agent, failing_agent};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn stage_with(agent: crate::agents::Agent) -> Stage {
        Stage::new(
            "research",
            Arc::new(agent),
            "volcanoes",
            10,
            "Research volcanoes and provide information suitable for age 10",
            "A factual summary",
        )
    }

    #[test]
    fn context_restates_inputs_and_labels_prior_outputs_by_role() {
        let stage = stage_with(echo_agent("Content Writer", Arc::new(AtomicUsize::new(0))));

        let prior = vec![StageResult {
            stage_id: "research".to_string(),
            role: "Research Expert".to_string(),
            output: "Volcanoes are openings in the crust.".to_string(),
            status: StageStatus::Success,
        }];

        let context = stage.build_context(&prior);
        assert!(context.contains("Topic: volcanoes (for a 10-year-old reader)"));
        assert!(context.contains("### Research Expert"));
        assert!(context.contains("openings in the crust"));
    }

    #[tokio::test]
    async fn execute_wraps_agent_failure_instead_of_propagating() {
        let stage = stage_with(failing_agent(
            "Research Expert",
            Arc::new(AtomicUsize::new(0)),
        ));

        let result = stage.execute(&[]).await;

        assert_eq!(result.stage_id, "research");
        assert!(!result.is_success());
        assert!(result.output.is_empty());
        match result.status {
            StageStatus::Failed { reason } => assert!(reason.contains("Research Expert")),
            StageStatus::Success => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn execute_passes_description_and_expected_output_to_agent() {
        let stage = stage_with(echo_agent("Research Expert", Arc::new(AtomicUsize::new(0))));

        let result = stage.execute(&[]).await;

        assert!(result.is_success());
        assert!(result.output.contains("Research volcanoes"));
        assert!(result.output.contains("Expected output: A factual summary"));
    }
}
