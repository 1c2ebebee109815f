//! Node synthesis.
//!
//! Turns extracted tags into [`WorkflowNode`]s with deterministic ids and a
//! column-per-type canvas layout:
//!
//! | Node type | Column x | Id |
//! |-----------|----------|----|
//! | trigger   | 100 | `trigger_<intent>` |
//! | action    | 300 | `action_<tag>_<index>` |
//! | condition | 500 | `condition_<tag>_<index>` |
//! | utility   | 700 | `utility_<tag>_<index>` |
//!
//! Within a column nodes stack downwards from y = 100 in steps of 120.

use serde_json::{Map, Value};

use crate::catalog::{ActionKind, ConditionKind, DataSource, NodeTag, TriggerIntent};
use crate::model::{NodeType, Position, WorkflowNode};
use crate::parser::PromptAnalysis;

/// y of the first node in every column.
pub const TOP_Y: i32 = 100;
/// Vertical distance between stacked nodes.
pub const ROW_SPACING: i32 = 120;

/// Canvas column for each node type.
pub const fn column_x(node_type: NodeType) -> i32 {
    match node_type {
        NodeType::Trigger => 100,
        NodeType::Action => 300,
        NodeType::Condition => 500,
        NodeType::Utility => 700,
    }
}

/// Id of the node synthesized for `tag` at stacking position `index`.
pub fn node_id<T: NodeTag>(tag: T, index: usize) -> String {
    format!("{}_{}_{index}", T::NODE_TYPE, tag.as_str())
}

/// Stateless node factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeGenerator;

impl NodeGenerator {
    /// One trigger node at the top of the trigger column.
    pub fn create_trigger_node(intent: TriggerIntent) -> WorkflowNode {
        WorkflowNode {
            id: format!("{}_{}", NodeType::Trigger, intent.as_str()),
            ..template_node(intent, 0)
        }
    }

    /// One action node per tag, stacked in synthesis order.
    pub fn create_action_nodes(actions: &[ActionKind]) -> Vec<WorkflowNode> {
        stack(actions)
    }

    /// One condition node per tag, stacked in synthesis order.
    pub fn create_condition_nodes(conditions: &[ConditionKind]) -> Vec<WorkflowNode> {
        stack(conditions)
    }

    /// One utility node per data source, stacked in synthesis order.
    pub fn create_utility_nodes(sources: &[DataSource]) -> Vec<WorkflowNode> {
        stack(sources)
    }

    /// Every node for an analysed prompt: trigger, then actions, then
    /// conditions, then utilities.
    pub fn create_nodes(analysis: &PromptAnalysis) -> Vec<WorkflowNode> {
        let mut nodes = vec![Self::create_trigger_node(analysis.trigger_intent)];
        nodes.extend(Self::create_action_nodes(&analysis.actions));
        nodes.extend(Self::create_condition_nodes(&analysis.conditions));
        nodes.extend(Self::create_utility_nodes(&analysis.data_sources));
        tracing::debug!(count = nodes.len(), "synthesized nodes");
        nodes
    }
}

fn stack<T: NodeTag>(tags: &[T]) -> Vec<WorkflowNode> {
    tags.iter()
        .enumerate()
        .map(|(index, tag)| template_node(*tag, index))
        .collect()
}

fn template_node<T: NodeTag>(tag: T, index: usize) -> WorkflowNode {
    let mut config = Map::new();
    config.insert(T::CONFIG_KEY.to_string(), Value::from(tag.as_str()));

    let row = i32::try_from(index).unwrap_or(i32::MAX / ROW_SPACING);
    WorkflowNode {
        id: node_id(tag, index),
        node_type: T::NODE_TYPE,
        name: tag.label().to_string(),
        config,
        position: Position::new(
            column_x(T::NODE_TYPE),
            TOP_Y.saturating_add(row.saturating_mul(ROW_SPACING)),
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
