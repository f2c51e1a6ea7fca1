//! Task Pipeline
//!
//! One pipeline run turns a (topic, age) submission into research output
//! through an ordered list of stages:
//!
//! ```text
//! (topic, age, include_visual)
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Research   │  → age-appropriate findings
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Write     │  → engaging explanation
//! └─────────────┘
//!      │
//!      ▼ (only when include_visual)
//! ┌─────────────┐
//! │  Visualize  │  → textual flowchart
//! └─────────────┘
//! ```
//!
//! Stages run strictly sequentially; each stage's context is built from the
//! outputs of the stages before it plus the original inputs, never from a
//! later stage.

pub mod orchestrator;
pub mod stage;
pub mod template;

pub use orchestrator::{Orchestrator, PipelineRun, RunStatus};
pub use stage::{Stage, StageResult, StageStatus};
pub use template::build_stages;

use crate::agents::{Agent, AgentFactory};
use std::sync::Arc;

/// The fixed agent roster the stage template draws from. Built once and
/// shared across runs; agents are stateless.
pub struct AgentRoster {
    pub researcher: Arc<Agent>,
    pub writer: Arc<Agent>,
    pub storyteller: Arc<Agent>,
}

impl AgentRoster {
    pub fn from_factory(factory: &AgentFactory) -> Self {
        Self {
            researcher: Arc::new(factory.researcher()),
            writer: Arc::new(factory.writer()),
            storyteller: Arc::new(factory.storyteller()),
        }
    }
}
