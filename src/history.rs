//! Session History Store
//!
//! Append-only record of completed pipeline runs for the interactive surface
//! to replay. Entries are never mutated or deleted by the core; append order
//! is submission order. The store is guarded by a single-writer lock so the
//! HTTP surface can serve concurrent sessions safely.

use crate::pipeline::{PipelineRun, RunStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

/// How one submission ended, as recorded for replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed { output: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistoryEntry {
    pub topic: String,
    pub age: u8,
    pub outcome: RunOutcome,
    pub created_at: DateTime<Utc>,
}

impl SessionHistoryEntry {
    /// Snapshot a terminal pipeline run. Returns `None` for a run that is
    /// not terminal; those never belong in history.
    pub fn from_run(run: &PipelineRun) -> Option<Self> {
        let outcome = match &run.status {
            RunStatus::Completed => RunOutcome::Completed {
                output: run.final_output.clone().unwrap_or_default(),
            },
            RunStatus::Failed { stage_id, reason } => RunOutcome::Failed {
                reason: format!("stage {stage_id}: {reason}"),
            },
            RunStatus::Pending | RunStatus::Running { .. } => return None,
        };

        Some(Self {
            topic: run.topic.clone(),
            age: run.age,
            outcome,
            created_at: run.created_at,
        })
    }
}

#[derive(Default)]
pub struct SessionHistoryStore {
    entries: RwLock<Vec<SessionHistoryEntry>>,
}

impl SessionHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Never fails under normal operation.
    pub fn append(&self, entry: SessionHistoryEntry) {
        debug!(topic = %entry.topic, "Appending session history entry");
        // A poisoned lock means a writer panicked mid-append; continuing
        // with the inner state keeps the store append-only and usable.
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(entry);
    }

    /// All entries in submission order.
    pub fn all(&self) -> Vec<SessionHistoryEntry> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
