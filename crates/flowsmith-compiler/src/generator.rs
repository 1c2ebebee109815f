//! Workflow generator — compiles a prompt into a [`WorkflowDefinition`].
//!
//! The generator owns the prompt parser and trigger generator and drives
//! the stateless node and connection factories.  It is the only component
//! that sees the whole graph.  Besides the full compile it exposes the
//! single-stage operations the HTTP surface serves (nodes, connections,
//! trigger), so a caller can request any one artifact on its own.

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::catalog::{ActionKind, ConditionKind, NodeTag};
use crate::config::CompilerConfig;
use crate::connections::ConnectionGenerator;
use crate::definition::WorkflowDefinition;
use crate::error::{CompileError, Result};
use crate::model::{
    NodeHandle, NodeType, WorkflowCondition, WorkflowConnection, WorkflowMetadata, WorkflowNode,
    WorkflowParameter, WorkflowTrigger,
};
use crate::nodes::{NodeGenerator, node_id};
use crate::parser::PromptParser;
use crate::trigger::TriggerGenerator;

/// Plan tier named right before the word "plan" (e.g. "the pro plan").
const PLAN_TIER_PATTERN: &str =
    r"\b(free|basic|starter|pro|premium|business|enterprise)\s+plan\b";

/// The prompt-to-workflow compiler.
///
/// Construct once at startup and share behind an `Arc`; compiling takes
/// `&self` and keeps nothing between calls.
#[derive(Debug, Clone)]
pub struct WorkflowGenerator {
    parser: PromptParser,
    triggers: TriggerGenerator,
    plan_tier: Regex,
    config: CompilerConfig,
}

impl WorkflowGenerator {
    /// Build a generator with the given configuration.
    pub fn new(config: CompilerConfig) -> Result<Self> {
        let plan_tier = RegexBuilder::new(PLAN_TIER_PATTERN)
            .case_insensitive(true)
            .build()
            .map_err(|e| CompileError::InvalidCue {
                pattern: PLAN_TIER_PATTERN.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            parser: PromptParser::new()?,
            triggers: TriggerGenerator::new(config.clone())?,
            plan_tier,
            config,
        })
    }

    /// The prompt parser used by this generator.
    pub fn parser(&self) -> &PromptParser {
        &self.parser
    }

    /// The trigger generator used by this generator.
    pub fn triggers(&self) -> &TriggerGenerator {
        &self.triggers
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    // -- Full compile --------------------------------------------------------

    /// Compile a prompt, stamping the metadata with the current time.
    pub fn generate_workflow(&self, prompt: &str) -> WorkflowDefinition {
        self.generate_workflow_at(prompt, Utc::now())
    }

    /// Compile a prompt with an explicit creation timestamp.
    ///
    /// Two calls with the same prompt and timestamp return equal
    /// definitions.
    pub fn generate_workflow_at(&self, prompt: &str, created_at: DateTime<Utc>) -> WorkflowDefinition {
        let nodes = self.generate_nodes(prompt);
        let connections = self.generate_connections(&nodes);
        let triggers = vec![self.generate_trigger(prompt)];
        let conditions = self.generate_conditions(prompt);
        let parameters = nodes.iter().flat_map(generate_node_params).collect();
        let actions = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Action)
            .cloned()
            .collect();
        let execution_order = nodes.iter().map(|n| n.id.clone()).collect();

        let definition = WorkflowDefinition {
            nodes,
            connections,
            triggers,
            actions,
            conditions,
            parameters,
            execution_order,
            metadata: WorkflowMetadata {
                name: self.config.workflow_name.clone(),
                description: prompt.to_string(),
                created_by: self.config.created_by.clone(),
                created_at,
            },
        };

        info!(
            nodes = definition.nodes.len(),
            connections = definition.connections.len(),
            trigger = ?definition.triggers[0].kind(),
            "compiled workflow"
        );
        definition
    }

    /// The nodes of the full graph: the trigger, one node per action, and
    /// one node per plan condition.
    ///
    /// With no cues at all this is `trigger_generic_event` followed by
    /// `action_log_event_0`, because both extractors fall back to those tags.
    pub fn generate_nodes(&self, prompt: &str) -> Vec<WorkflowNode> {
        let intent = self.parser.extract_trigger_intent(prompt);
        let actions = self.parser.extract_actions(prompt);
        let conditions = self.plan_conditions(prompt);

        let mut nodes = vec![NodeGenerator::create_trigger_node(intent)];
        nodes.extend(NodeGenerator::create_action_nodes(&actions));
        nodes.extend(NodeGenerator::create_condition_nodes(&conditions));
        nodes
    }

    /// Wire the full graph: trigger to first action, then the first action
    /// through the first condition to the second action when both exist.
    pub fn generate_connections(&self, nodes: &[WorkflowNode]) -> Vec<WorkflowConnection> {
        let mut connections = Vec::new();

        let trigger = nodes.iter().find(|n| n.node_type == NodeType::Trigger);
        let first_action = nodes.iter().find(|n| n.node_type == NodeType::Action);
        if let (Some(trigger), Some(action)) = (trigger, first_action) {
            connections.push(WorkflowConnection::link(&trigger.id, &action.id));
        }

        let condition_nodes: Vec<&WorkflowNode> = nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Condition)
            .collect();
        connections.extend(ConnectionGenerator::connect_conditional(
            nodes,
            &condition_nodes,
        ));

        debug!(count = connections.len(), "generated connections");
        connections
    }

    /// The trigger descriptor for a prompt.
    pub fn generate_trigger(&self, prompt: &str) -> WorkflowTrigger {
        self.triggers.generate(prompt)
    }

    /// Plan conditions cued by the prompt.  Each condition shares its id with
    /// the condition node [`generate_nodes`](Self::generate_nodes) creates.
    pub fn generate_conditions(&self, prompt: &str) -> Vec<WorkflowCondition> {
        self.plan_conditions(prompt)
            .into_iter()
            .enumerate()
            .map(|(index, kind)| WorkflowCondition {
                id: node_id(kind, index),
                condition_type: kind,
                params: self.condition_params(kind, prompt),
            })
            .collect()
    }

    // -- Single-stage operations ---------------------------------------------

    /// Every node the prompt cues: trigger, actions, all conditions, and
    /// data-source utilities, in that order.
    pub fn compile_nodes(&self, prompt: &str) -> Vec<WorkflowNode> {
        NodeGenerator::create_nodes(&self.parser.analyze(prompt))
    }

    /// Wire an externally supplied node list.
    ///
    /// If the prompt cues any condition the conditional strategy is used,
    /// with the list's condition nodes as candidates; otherwise the nodes
    /// are chained sequentially.
    pub fn compile_connections<N: NodeHandle>(
        &self,
        nodes: &[N],
        prompt: &str,
    ) -> Vec<WorkflowConnection> {
        if self.parser.extract_conditions(prompt).is_empty() {
            return ConnectionGenerator::connect_sequential(nodes);
        }

        let condition_nodes: Vec<&N> = nodes
            .iter()
            .filter(|n| n.node_type() == Some(NodeType::Condition))
            .collect();
        ConnectionGenerator::connect_conditional(nodes, &condition_nodes)
    }

    // -- Internals -----------------------------------------------------------

    fn plan_conditions(&self, prompt: &str) -> Vec<ConditionKind> {
        self.parser
            .extract_conditions(prompt)
            .into_iter()
            .filter(|c| *c == ConditionKind::PlanCheck)
            .collect()
    }

    fn condition_params(&self, kind: ConditionKind, prompt: &str) -> Map<String, Value> {
        let mut params = Map::new();
        if kind == ConditionKind::PlanCheck
            && let Some(caps) = self.plan_tier.captures(prompt)
        {
            params.insert("plan".into(), Value::from(caps[1].to_lowercase()));
        }
        params
    }
}

/// Parameter declarations a node needs, taken from the node catalog.
pub fn generate_node_params(node: &WorkflowNode) -> Vec<WorkflowParameter> {
    let tag = |key: &str| node.config.get(key).and_then(Value::as_str);

    let specs = match node.node_type {
        NodeType::Action => tag(ActionKind::CONFIG_KEY)
            .and_then(|s| s.parse::<ActionKind>().ok())
            .map(|a| a.parameters()),
        NodeType::Condition => tag(ConditionKind::CONFIG_KEY)
            .and_then(|s| s.parse::<ConditionKind>().ok())
            .map(|c| c.parameters()),
        NodeType::Trigger | NodeType::Utility => None,
    };

    specs
        .unwrap_or_default()
        .iter()
        .map(|(name, ty)| WorkflowParameter::new(*name, *ty))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
