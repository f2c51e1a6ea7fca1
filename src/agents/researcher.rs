//! Research Expert
//!
//! First stage of the pipeline: gathers accurate, age-appropriate facts on
//! the submitted topic, using web search when a key is configured.

use crate::agents::{Agent, AgentFactory};

pub const RESEARCHER_ROLE: &str = "Research Expert";

const GOAL: &str = "Find accurate and age-appropriate information on given topics";
const BACKSTORY: &str = "Expert at finding reliable information for children and teens";

pub(crate) fn build(factory: &AgentFactory) -> Agent {
    factory.assemble(RESEARCHER_ROLE, GOAL, BACKSTORY)
}
