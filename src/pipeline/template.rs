//! Stage template
//!
//! The single parametrized builder for the run's stage list. The set is
//! fixed at {Research, Write, [Visualize]}; including the visual stage is
//! the only branching in stage composition.

use crate::pipeline::{AgentRoster, Stage};
use std::sync::Arc;

pub const RESEARCH_STAGE_ID: &str = "research";
pub const WRITE_STAGE_ID: &str = "write";
pub const VISUALIZE_STAGE_ID: &str = "visualize";

/// Assemble the ordered stage list for one run.
pub fn build_stages(
    roster: &AgentRoster,
    topic: &str,
    age: u8,
    include_visual: bool,
) -> Vec<Stage> {
    let mut stages = vec![
        Stage::new(
            RESEARCH_STAGE_ID,
            Arc::clone(&roster.researcher),
            topic,
            age,
            format!("Research {topic} and provide information suitable for age {age}"),
            "A factual, source-grounded summary of the topic a young reader can trust",
        ),
        Stage::new(
            WRITE_STAGE_ID,
            Arc::clone(&roster.writer),
            topic,
            age,
            format!("Write an engaging explanation about {topic} for a {age}-year-old"),
            "A friendly, clearly structured explanation built on the research findings",
        ),
    ];

    if include_visual {
        stages.push(Stage::new(
            VISUALIZE_STAGE_ID,
            Arc::clone(&roster.storyteller),
            topic,
            age,
            format!("Create a flowchart explaining {topic} for a {age}-year-old"),
            "A step-by-step textual flowchart (one step per line, arrows between steps)",
        ));
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::echo_agent;
    use std::sync::atomic::AtomicUsize;

    fn roster() -> AgentRoster {
        AgentRoster {
            researcher: Arc::new(echo_agent(
                "Research Expert",
                Arc::new(AtomicUsize::new(0)),
            )),
            writer: Arc::new(echo_agent("Content Writer", Arc::new(AtomicUsize::new(0)))),
            storyteller: Arc::new(echo_agent(
                "Visual Storyteller",
                Arc::new(AtomicUsize::new(0)),
            )),
        }
    }

    #[test]
    fn without_visual_yields_two_stages_in_fixed_order() {
        let stages = build_stages(&roster(), "volcanoes", 10, false);
        let ids: Vec<&str> = stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![RESEARCH_STAGE_ID, WRITE_STAGE_ID]);
    }

    #[test]
    fn with_visual_yields_three_stages_in_fixed_order() {
        let stages = build_stages(&roster(), "volcanoes", 10, true);
        let ids: Vec<&str> = stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![RESEARCH_STAGE_ID, WRITE_STAGE_ID, VISUALIZE_STAGE_ID]);
    }

    #[test]
    fn descriptions_render_topic_and_age() {
        let stages = build_stages(&roster(), "volcanoes", 12, true);
        for stage in &stages {
            assert!(stage.description.contains("volcanoes"));
            assert!(stage.description.contains("12"));
        }
    }
}
