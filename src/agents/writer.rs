//! Content Writer
//!
//! Second stage of the pipeline: turns the researcher's findings into an
//! engaging explanation pitched at the reader's age.

use crate::agents::{Agent, AgentFactory};

pub const WRITER_ROLE: &str = "Content Writer";

const GOAL: &str = "Write engaging and educational content for young audiences";
const BACKSTORY: &str = "Experienced in writing for children aged 8-16";

pub(crate) fn build(factory: &AgentFactory) -> Agent {
    factory.assemble(WRITER_ROLE, GOAL, BACKSTORY)
}
