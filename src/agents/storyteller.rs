//! Visual Storyteller
//!
//! Optional third stage: breaks the topic down into a step-by-step textual
//! flowchart a young reader can follow.

use crate::agents::{Agent, AgentFactory};

pub const STORYTELLER_ROLE: &str = "Visual Storyteller";

const GOAL: &str = "Create engaging visual explanations of research topics";
const BACKSTORY: &str = "Expert at breaking down complex topics into visual stories";

pub(crate) fn build(factory: &AgentFactory) -> Agent {
    factory.assemble(STORYTELLER_ROLE, GOAL, BACKSTORY)
}
