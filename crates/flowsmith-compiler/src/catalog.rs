//! Node catalog — the closed vocabulary of workflow primitives.
//!
//! Every tag the prompt parser can produce is an enum value here, and every
//! enum implements [`NodeTag`], which is the single node template table used
//! wherever nodes are synthesized: node type, label, the config key that
//! carries the tag, and the parameter declarations the node contributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::model::{NodeType, ParamType};

/// A parameter declaration contributed by a node template.
pub type ParamSpec = (&'static str, ParamType);

/// Template data shared by every tag that can become a node.
pub trait NodeTag: Copy + fmt::Debug + 'static {
    /// The node type produced for this tag.
    const NODE_TYPE: NodeType;

    /// The key under which the tag is stored in the node's `config`.
    const CONFIG_KEY: &'static str;

    /// Every tag of this kind, in declaration order.
    const ALL: &'static [Self];

    /// The wire name of the tag (e.g. `send_email`).
    fn as_str(&self) -> &'static str;

    /// Human-readable label used as the node name.
    fn label(&self) -> &'static str;

    /// Parameter declarations required by nodes of this tag.
    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }
}

// ---------------------------------------------------------------------------
// Trigger intents
// ---------------------------------------------------------------------------

/// The event class a prompt asks the workflow to start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerIntent {
    UserSignup,
    UserLogin,
    PaymentSuccess,
    ErrorEvent,
    GenericEvent,
}

impl NodeTag for TriggerIntent {
    const NODE_TYPE: NodeType = NodeType::Trigger;
    const CONFIG_KEY: &'static str = "triggerType";
    const ALL: &'static [Self] = &[
        Self::UserSignup,
        Self::UserLogin,
        Self::PaymentSuccess,
        Self::ErrorEvent,
        Self::GenericEvent,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::UserSignup => "user_signup",
            Self::UserLogin => "user_login",
            Self::PaymentSuccess => "payment_success",
            Self::ErrorEvent => "error_event",
            Self::GenericEvent => "generic_event",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::UserSignup => "User Signup",
            Self::UserLogin => "User Login",
            Self::PaymentSuccess => "Payment Success",
            Self::ErrorEvent => "Error Event",
            Self::GenericEvent => "Generic Event",
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A step the workflow performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SendEmail,
    AddToCrm,
    LogEvent,
    CallWebhook,
}

impl NodeTag for ActionKind {
    const NODE_TYPE: NodeType = NodeType::Action;
    const CONFIG_KEY: &'static str = "actionType";
    const ALL: &'static [Self] = &[
        Self::SendEmail,
        Self::AddToCrm,
        Self::LogEvent,
        Self::CallWebhook,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::SendEmail => "send_email",
            Self::AddToCrm => "add_to_crm",
            Self::LogEvent => "log_event",
            Self::CallWebhook => "call_webhook",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SendEmail => "Send Email",
            Self::AddToCrm => "Add to CRM",
            Self::LogEvent => "Log Event",
            Self::CallWebhook => "Call Webhook",
        }
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            Self::SendEmail => &[("user.email", ParamType::String), ("template", ParamType::String)],
            Self::AddToCrm => &[("user.id", ParamType::String)],
            Self::CallWebhook => &[("payload", ParamType::Object)],
            Self::LogEvent => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// A guard the prompt places on part of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    PlanCheck,
    CustomCondition,
    AmountCheck,
}

impl NodeTag for ConditionKind {
    const NODE_TYPE: NodeType = NodeType::Condition;
    const CONFIG_KEY: &'static str = "conditionType";
    const ALL: &'static [Self] = &[
        Self::PlanCheck,
        Self::CustomCondition,
        Self::AmountCheck,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::PlanCheck => "plan_check",
            Self::CustomCondition => "custom_condition",
            Self::AmountCheck => "amount_check",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::PlanCheck => "Plan Check",
            Self::CustomCondition => "Custom Condition",
            Self::AmountCheck => "Amount Check",
        }
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            Self::PlanCheck => &[("plan", ParamType::String)],
            Self::AmountCheck => &[("amount", ParamType::Number)],
            Self::CustomCondition => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// An external system the prompt refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Database,
    Api,
    Spreadsheet,
    Crm,
}

impl NodeTag for DataSource {
    const NODE_TYPE: NodeType = NodeType::Utility;
    const CONFIG_KEY: &'static str = "dataSource";
    const ALL: &'static [Self] = &[
        Self::Database,
        Self::Api,
        Self::Spreadsheet,
        Self::Crm,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Api => "api",
            Self::Spreadsheet => "spreadsheet",
            Self::Crm => "crm",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Database => "Database",
            Self::Api => "External API",
            Self::Spreadsheet => "Spreadsheet",
            Self::Crm => "CRM",
        }
    }
}

macro_rules! wire_name_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = CompileError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::ALL
                        .iter()
                        .copied()
                        .find(|tag| tag.as_str() == s)
                        .ok_or_else(|| CompileError::UnknownTag {
                            kind: Self::NODE_TYPE.as_str(),
                            tag: s.to_string(),
                        })
                }
            }
        )*
    };
}

wire_name_conversions!(TriggerIntent, ActionKind, ConditionKind, DataSource);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
