//! Edge synthesis strategies.
//!
//! Strategies only look at node ids and types, never mutate their input, and
//! keep input order.  Choosing a strategy is the caller's job.

use tracing::debug;

use crate::model::{NodeHandle, NodeType, WorkflowConnection};

/// Stateless edge factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionGenerator;

impl ConnectionGenerator {
    /// Chain the nodes in order: `n` nodes give `n - 1` edges
    /// `node[i] -> node[i + 1]`.
    pub fn connect_sequential<N: NodeHandle>(nodes: &[N]) -> Vec<WorkflowConnection> {
        let edges: Vec<_> = nodes
            .windows(2)
            .map(|pair| WorkflowConnection::link(pair[0].node_id(), pair[1].node_id()))
            .collect();
        debug!(edges = edges.len(), "connected nodes sequentially");
        edges
    }

    /// Route the first action through the first condition into the second
    /// action: `action[0] -> condition[0] -(true)-> action[1]`.
    ///
    /// Actions are located by type in `nodes`; the condition is the first
    /// entry of `conditions`.  If any of the three is missing no edges are
    /// produced and the condition stays unconnected.
    pub fn connect_conditional<N: NodeHandle, C: NodeHandle>(
        nodes: &[N],
        conditions: &[C],
    ) -> Vec<WorkflowConnection> {
        let mut actions = nodes
            .iter()
            .filter(|n| n.node_type() == Some(NodeType::Action));

        let (Some(first), Some(condition), Some(second)) =
            (actions.next(), conditions.first(), actions.next())
        else {
            debug!("conditional wiring skipped: need two actions and a condition");
            return Vec::new();
        };

        debug!(
            condition = condition.node_id(),
            "connected nodes through condition"
        );
        vec![
            WorkflowConnection::link(first.node_id(), condition.node_id()),
            WorkflowConnection::true_branch(condition.node_id(), second.node_id()),
        ]
    }

    /// Fan the first node out to every other node.
    pub fn connect_parallel<N: NodeHandle>(nodes: &[N]) -> Vec<WorkflowConnection> {
        let Some((head, rest)) = nodes.split_first() else {
            return Vec::new();
        };
        let edges: Vec<_> = rest
            .iter()
            .map(|n| WorkflowConnection::link(head.node_id(), n.node_id()))
            .collect();
        debug!(edges = edges.len(), "fanned out nodes");
        edges
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeRef;

    fn node(id: &str, node_type: NodeType) -> NodeRef {
        NodeRef::new(id, Some(node_type))
    }

    #[test]
    fn sequential_chains_k_minus_one_edges() {
        let nodes: Vec<NodeRef> = (0..4).map(|i| NodeRef::new(format!("n{i}"), None)).collect();
        let edges = ConnectionGenerator::connect_sequential(&nodes);

        assert_eq!(edges.len(), 3);
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.from_node, format!("n{i}"));
            assert_eq!(edge.to_node, format!("n{}", i + 1));
            assert_eq!(edge.from_port, "out");
            assert_eq!(edge.to_port, "in");
        }
    }

    #[test]
    fn sequential_with_fewer_than_two_nodes() {
        let empty: Vec<NodeRef> = Vec::new();
        assert!(ConnectionGenerator::connect_sequential(&empty).is_empty());
        assert!(ConnectionGenerator::connect_sequential(&[NodeRef::new("only", None)]).is_empty());
    }

    #[test]
    fn conditional_wires_true_branch_to_second_action() {
        let nodes = vec![
            node("t", NodeType::Trigger),
            node("a0", NodeType::Action),
            node("a1", NodeType::Action),
            node("c0", NodeType::Condition),
        ];
        let conditions = vec![&nodes[3]];

        let edges = ConnectionGenerator::connect_conditional(&nodes, &conditions);
        assert_eq!(edges.len(), 2);

        assert_eq!(edges[0].from_node, "a0");
        assert_eq!(edges[0].to_node, "c0");
        assert_eq!(edges[0].condition, None);

        assert_eq!(edges[1].from_node, "c0");
        assert_eq!(edges[1].from_port, "true");
        assert_eq!(edges[1].to_node, "a1");
        assert_eq!(edges[1].condition, Some(true));
    }

    #[test]
    fn conditional_needs_two_actions() {
        let nodes = vec![node("a0", NodeType::Action), node("c0", NodeType::Condition)];
        let conditions = vec![&nodes[1]];
        assert!(ConnectionGenerator::connect_conditional(&nodes, &conditions).is_empty());
    }

    #[test]
    fn conditional_needs_a_condition() {
        let nodes = vec![node("a0", NodeType::Action), node("a1", NodeType::Action)];
        let conditions: Vec<NodeRef> = Vec::new();
        assert!(ConnectionGenerator::connect_conditional(&nodes, &conditions).is_empty());
    }

    #[test]
    fn untyped_nodes_are_not_actions() {
        let nodes = vec![NodeRef::new("x", None), NodeRef::new("y", None)];
        let conditions = vec![node("c", NodeType::Condition)];
        assert!(ConnectionGenerator::connect_conditional(&nodes, &conditions).is_empty());
    }

    #[test]
    fn parallel_fans_out_from_first() {
        let nodes = vec![
            NodeRef::new("hub", None),
            NodeRef::new("a", None),
            NodeRef::new("b", None),
        ];
        let edges = ConnectionGenerator::connect_parallel(&nodes);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.from_node == "hub"));
        assert_eq!(edges[1].to_node, "b");
        assert!(ConnectionGenerator::connect_parallel::<NodeRef>(&[]).is_empty());
    }
}
