//! Pipeline Orchestrator
//!
//! Owns a run from submission to terminal state. State machine per run:
//!
//! ```text
//! Pending → Running(0) → Running(1) → ... → Completed
//!                 │
//!                 └──────────────────────→ Failed
//! ```
//!
//! Stages execute strictly sequentially; no stage begins before its
//! predecessor reaches a terminal status. A stage failure (after the
//! configured retries) is terminal for the run: later stages never execute
//! and the failed stage's result is retained as diagnostic only.

use crate::pipeline::stage::{StageResult, StageStatus};
use crate::pipeline::{build_stages, AgentRoster};
use crate::types::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const MIN_AGE: u8 = 8;
pub const MAX_AGE: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running { stage_index: usize },
    Completed,
    Failed { stage_id: String, reason: String },
}

/// One end-to-end execution of the stage sequence for one submission.
/// Read-only once the orchestrator hands it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: Uuid,
    pub topic: String,
    pub age: u8,
    pub include_visual: bool,
    pub stage_results: Vec<StageResult>,
    /// Set only when the run completed; a failed run never surfaces partial
    /// output here.
    pub final_output: Option<String>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
}

impl PipelineRun {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

pub struct Orchestrator {
    roster: AgentRoster,
    /// Extra attempts per failed stage, with the same context, before the
    /// run transitions to Failed. 0 = baseline no-retry behavior.
    max_stage_retries: u32,
}

impl Orchestrator {
    pub fn new(roster: AgentRoster, max_stage_retries: u32) -> Self {
        Self {
            roster,
            max_stage_retries,
        }
    }

    /// Execute one pipeline run.
    ///
    /// Returns `Err` only for invalid input, raised before any stage is
    /// constructed or capability called. Stage-level failure comes back as
    /// an `Ok` run in the `Failed` state so the caller sees a consistent,
    /// fully-terminal run either way.
    pub async fn run(&self, topic: &str, age: u8, include_visual: bool) -> AppResult<PipelineRun> {
        validate_submission(topic, age)?;
        let topic = topic.trim();

        let stages = build_stages(&self.roster, topic, age, include_visual);

        let mut run = PipelineRun {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            age,
            include_visual,
            stage_results: Vec::new(),
            final_output: None,
            status: RunStatus::Pending,
            created_at: Utc::now(),
        };

        info!(
            run_id = %run.id,
            topic = %run.topic,
            age = run.age,
            stage_count = stages.len(),
            "Starting pipeline run"
        );

        let mut results: Vec<StageResult> = Vec::with_capacity(stages.len());

        for (stage_index, stage) in stages.iter().enumerate() {
            run.status = RunStatus::Running { stage_index };

            let mut result = stage.execute(&results).await;
            let mut attempt = 0;
            while !result.is_success() && attempt < self.max_stage_retries {
                attempt += 1;
                warn!(
                    run_id = %run.id,
                    stage_id = %stage.id,
                    attempt,
                    "Retrying failed stage"
                );
                // Prior results are unchanged, so the retry sees the same context
                result = stage.execute(&results).await;
            }

            if let StageStatus::Failed { reason } = &result.status {
                let stage_id = result.stage_id.clone();
                let reason = reason.clone();
                error!(
                    run_id = %run.id,
                    stage_id = %stage_id,
                    reason = %reason,
                    "Pipeline run failed"
                );
                results.push(result);
                run.stage_results = results;
                run.status = RunStatus::Failed { stage_id, reason };
                return Ok(run);
            }

            results.push(result);
        }

        run.final_output = Some(aggregate_output(&results));
        run.stage_results = results;
        run.status = RunStatus::Completed;

        info!(run_id = %run.id, "Pipeline run completed");
        Ok(run)
    }
}

/// Concatenate all stage outputs with section headers, in stage order.
fn aggregate_output(results: &[StageResult]) -> String {
    results
        .iter()
        .map(|r| format!("## {}\n\n{}", r.role, r.output))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn validate_submission(topic: &str, age: u8) -> AppResult<()> {
    if topic.trim().is_empty() {
        return Err(AppError::Validation(
            "topic must not be empty".to_string(),
        ));
    }

    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::Validation(format!(
            "age must be between {MIN_AGE} and {MAX_AGE}, got {age}"
        )));
    }

    Ok(())
}
