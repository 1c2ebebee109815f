//! Prompt-to-workflow-graph compiler for Flowsmith.
//!
//! This crate turns a free-text automation request ("email the user and add
//! them to the CRM when they sign up") into a [`WorkflowDefinition`]: typed
//! nodes, the edges between them, and the trigger that starts a run.
//!
//! - **Prompt parsing**: ordered keyword/regex cue tables extract the trigger
//!   intent, actions, conditions and data sources via [`PromptParser`].
//! - **Node synthesis**: [`NodeGenerator`] lays tags out as canvas nodes with
//!   deterministic ids, driven by the tag catalog in [`catalog`].
//! - **Edge synthesis**: sequential, conditional and fan-out strategies in
//!   [`ConnectionGenerator`].
//! - **Triggers**: webhook, cron and named-event descriptors via
//!   [`TriggerGenerator`].
//! - **Orchestration**: [`WorkflowGenerator`] assembles the full definition.
//!
//! Compiling is synchronous, pure and infallible; only construction (cue
//! compilation, config validation) can fail.

pub mod catalog;
pub mod config;
pub mod connections;
pub mod cue;
pub mod definition;
pub mod error;
pub mod generator;
pub mod model;
pub mod nodes;
pub mod parser;
pub mod trigger;

pub use catalog::{ActionKind, ConditionKind, DataSource, NodeTag, TriggerIntent};
pub use config::CompilerConfig;
pub use connections::ConnectionGenerator;
pub use definition::WorkflowDefinition;
pub use error::{CompileError, Result};
pub use generator::WorkflowGenerator;
pub use model::{
    NodeHandle, NodeRef, NodeType, Position, TriggerKind, WorkflowCondition, WorkflowConnection,
    WorkflowMetadata, WorkflowNode, WorkflowParameter, WorkflowTrigger,
};
pub use nodes::NodeGenerator;
pub use parser::{PromptAnalysis, PromptParser};
pub use trigger::TriggerGenerator;
