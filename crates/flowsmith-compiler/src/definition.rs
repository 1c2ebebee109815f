//! The compiled workflow artifact.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};
use crate::model::{
    NodeType, WorkflowCondition, WorkflowConnection, WorkflowMetadata, WorkflowNode,
    WorkflowParameter, WorkflowTrigger,
};

/// A complete workflow graph produced by one compile call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Nodes in synthesis order.
    pub nodes: Vec<WorkflowNode>,
    pub connections: Vec<WorkflowConnection>,
    /// Always exactly one entry today.
    pub triggers: Vec<WorkflowTrigger>,
    /// The action nodes of `nodes`, in the same order.
    pub actions: Vec<WorkflowNode>,
    pub conditions: Vec<WorkflowCondition>,
    pub parameters: Vec<WorkflowParameter>,
    /// Node ids in synthesis order.  This is not a dependency order; see
    /// [`WorkflowDefinition::topological_order`].
    pub execution_order: Vec<String>,
    pub metadata: WorkflowMetadata,
}

impl WorkflowDefinition {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Iterate over the nodes of one type.
    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Check that node ids are unique and every connection endpoint names a
    /// node of this definition.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(CompileError::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }

        for conn in &self.connections {
            for endpoint in [&conn.from_node, &conn.to_node] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(CompileError::DanglingConnection {
                        connection: conn.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Order node ids so that every connection points forward.
    ///
    /// Kahn's algorithm; among nodes that are ready at the same time the
    /// one synthesized first goes first, so an unconnected graph keeps its
    /// synthesis order.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        self.validate()?;

        let position: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for conn in &self.connections {
            let from = position[conn.from_node.as_str()];
            let to = position[conn.to_node.as_str()];
            successors[from].push(to);
            in_degree[to] += 1;
        }

        let mut ready: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(i) = ready.pop_front() {
            order.push(self.nodes[i].id.clone());
            let mut released = Vec::new();
            for &next in &successors[i] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    released.push(next);
                }
            }
            released.sort_unstable();
            for next in released {
                let at = ready.partition_point(|&queued| queued < next);
                ready.insert(at, next);
            }
        }

        if order.len() < self.nodes.len() {
            let remaining = (0..self.nodes.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.nodes[i].id.clone())
                .collect();
            return Err(CompileError::CycleDetected { remaining });
        }
        Ok(order)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ActionKind, ConditionKind, TriggerIntent};
    use crate::model::EventConfig;
    use crate::nodes::NodeGenerator;
    use chrono::Utc;

    fn definition(nodes: Vec<WorkflowNode>, connections: Vec<WorkflowConnection>) -> WorkflowDefinition {
        WorkflowDefinition {
            execution_order: nodes.iter().map(|n| n.id.clone()).collect(),
            actions: Vec::new(),
            nodes,
            connections,
            triggers: vec![WorkflowTrigger::Event(EventConfig {
                event: TriggerIntent::GenericEvent,
            })],
            conditions: Vec::new(),
            parameters: Vec::new(),
            metadata: WorkflowMetadata {
                name: "test".into(),
                description: "test".into(),
                created_by: "tests".into(),
                created_at: Utc::now(),
            },
        }
    }

    fn sample_nodes() -> Vec<WorkflowNode> {
        let mut nodes = vec![NodeGenerator::create_trigger_node(TriggerIntent::UserSignup)];
        nodes.extend(NodeGenerator::create_action_nodes(&[
            ActionKind::SendEmail,
            ActionKind::AddToCrm,
        ]));
        nodes.extend(NodeGenerator::create_condition_nodes(&[ConditionKind::PlanCheck]));
        nodes
    }

    #[test]
    fn validate_accepts_consistent_graph() {
        let def = definition(
            sample_nodes(),
            vec![WorkflowConnection::link("trigger_user_signup", "action_send_email_0")],
        );
        assert!(def.validate().is_ok());
        assert_eq!(def.nodes_of_type(NodeType::Action).count(), 2);
        assert!(def.node("condition_plan_check_0").is_some());
    }

    #[test]
    fn validate_rejects_dangling_edge() {
        let def = definition(
            sample_nodes(),
            vec![WorkflowConnection::link("trigger_user_signup", "missing")],
        );
        match def.validate() {
            Err(CompileError::DanglingConnection { node, .. }) => assert_eq!(node, "missing"),
            other => panic!("expected DanglingConnection, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut nodes = sample_nodes();
        nodes.push(nodes[0].clone());
        let def = definition(nodes, Vec::new());
        assert!(matches!(
            def.validate(),
            Err(CompileError::DuplicateNodeId { .. })
        ));
    }

    #[test]
    fn topological_order_follows_edges() {
        // a0 -> c0 -(true)-> a1, declared out of synthesis order.
        let def = definition(
            sample_nodes(),
            vec![
                WorkflowConnection::true_branch("condition_plan_check_0", "action_send_email_0"),
                WorkflowConnection::link("action_add_to_crm_1", "condition_plan_check_0"),
            ],
        );
        let order = def.topological_order().unwrap();
        assert_eq!(
            order,
            vec![
                "trigger_user_signup",
                "action_add_to_crm_1",
                "condition_plan_check_0",
                "action_send_email_0",
            ]
        );
    }

    #[test]
    fn unconnected_graph_keeps_synthesis_order() {
        let def = definition(sample_nodes(), Vec::new());
        assert_eq!(def.topological_order().unwrap(), def.execution_order);
    }

    #[test]
    fn cycle_is_reported() {
        let def = definition(
            sample_nodes(),
            vec![
                WorkflowConnection::link("action_send_email_0", "action_add_to_crm_1"),
                WorkflowConnection::link("action_add_to_crm_1", "action_send_email_0"),
            ],
        );
        match def.topological_order() {
            Err(CompileError::CycleDetected { remaining }) => assert_eq!(remaining.len(), 2),
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }
}
