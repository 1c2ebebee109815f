//! Workflow graph value types.
//!
//! Everything here is created fresh by one compile call and never mutated
//! afterwards.  Field names serialize in camelCase to match the canvas
//! front end (`fromNode`, `executionOrder`, `createdAt`).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{ConditionKind, TriggerIntent};

/// Output port used by plain edges.
pub const OUT_PORT: &str = "out";
/// Input port used by every edge.
pub const IN_PORT: &str = "in";
/// Output port of a condition node's true branch.
pub const TRUE_PORT: &str = "true";

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// The kind of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Trigger,
    Action,
    Condition,
    Utility,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Condition => "condition",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One step in a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    /// Unique within one definition, derived from type and tag
    /// (e.g. `action_send_email_0`).
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Human-readable label.
    pub name: String,
    /// Free-form payload carrying the node's semantic tag.
    pub config: Map<String, Value>,
    pub position: Position,
}

/// Anything that can stand in for a node when wiring edges.
///
/// Edge synthesis only needs an id and, where available, a type; this lets
/// the connection strategies run over full [`WorkflowNode`]s as well as the
/// lighter [`NodeRef`]s accepted over HTTP.
pub trait NodeHandle {
    fn node_id(&self) -> &str;
    fn node_type(&self) -> Option<NodeType>;
}

impl NodeHandle for WorkflowNode {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> Option<NodeType> {
        Some(self.node_type)
    }
}

impl<N: NodeHandle + ?Sized> NodeHandle for &N {
    fn node_id(&self) -> &str {
        (**self).node_id()
    }

    fn node_type(&self) -> Option<NodeType> {
        (**self).node_type()
    }
}

/// A node reduced to what edge synthesis needs: `{ id[, type] }`.
///
/// Unknown fields are ignored on deserialization, so full nodes can be
/// passed where a `NodeRef` is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
}

impl NodeRef {
    pub fn new(id: impl Into<String>, node_type: Option<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_type,
        }
    }
}

impl NodeHandle for NodeRef {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConnection {
    pub id: String,
    pub from_node: String,
    pub from_port: String,
    pub to_node: String,
    pub to_port: String,
    /// `Some(true)` marks the true branch of a condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<bool>,
}

impl WorkflowConnection {
    /// Create a plain `out -> in` edge.
    pub fn link(from: &str, to: &str) -> Self {
        Self::new(from, OUT_PORT, to, IN_PORT, None)
    }

    /// Create a branch edge leaving `from` on its true port.
    pub fn true_branch(from: &str, to: &str) -> Self {
        Self::new(from, TRUE_PORT, to, IN_PORT, Some(true))
    }

    fn new(from: &str, from_port: &str, to: &str, to_port: &str, condition: Option<bool>) -> Self {
        Self {
            id: format!("conn_{from}_{to}"),
            from_node: from.to_string(),
            from_port: from_port.to_string(),
            to_node: to.to_string(),
            to_port: to_port.to_string(),
            condition,
        }
    }

    /// Return `true` if this edge is a conditional branch.
    pub fn is_branch(&self) -> bool {
        self.condition.is_some()
    }
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// The three trigger families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Webhook,
    Cron,
    Event,
}

/// HTTP method a webhook trigger listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronConfig {
    pub cron: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub event: TriggerIntent,
}

/// The descriptor of what starts a workflow run.
///
/// Serializes as `{ "type": "cron", "config": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum WorkflowTrigger {
    Webhook(WebhookConfig),
    Cron(CronConfig),
    Event(EventConfig),
}

impl WorkflowTrigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Webhook(_) => TriggerKind::Webhook,
            Self::Cron(_) => TriggerKind::Cron,
            Self::Event(_) => TriggerKind::Event,
        }
    }
}

// ---------------------------------------------------------------------------
// Conditions, parameters, metadata
// ---------------------------------------------------------------------------

/// A condition attached to the workflow; `id` is the id of its node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowCondition {
    pub id: String,
    #[serde(rename = "type")]
    pub condition_type: ConditionKind,
    pub params: Map<String, Value>,
}

/// Primitive type tag of a workflow parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Object,
}

/// A typed input a node expects at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl WorkflowParameter {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub name: String,
    /// The prompt the workflow was compiled from.
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
