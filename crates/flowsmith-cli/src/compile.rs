//! `flowsmith compile`: run one compiler stage and render it as JSON.
//!
//! The output of each stage is wrapped the same way the matching HTTP
//! endpoint wraps it, so scripts can switch between the two.

use serde_json::{Value, json};

use flowsmith_compiler::WorkflowGenerator;

use crate::cli::Stage;

/// Compile `prompt` at `stage`.
pub fn render(generator: &WorkflowGenerator, stage: Stage, prompt: &str) -> Value {
    match stage {
        Stage::Full => json!({ "workflow": generator.generate_workflow(prompt) }),
        Stage::Nodes => json!({ "nodes": generator.compile_nodes(prompt) }),
        Stage::Trigger => json!({ "trigger": generator.generate_trigger(prompt) }),
        Stage::Connections => {
            let nodes = generator.compile_nodes(prompt);
            json!({ "connections": generator.compile_connections(&nodes, prompt) })
        }
    }
}
