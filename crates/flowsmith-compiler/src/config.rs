//! Compiler configuration.
//!
//! The defaults reproduce the fixed placeholder values the canvas expects,
//! so a compiler built from `CompilerConfig::default()` needs no config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};

/// Settings for [`crate::WorkflowGenerator`] and [`crate::TriggerGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Name stamped into every workflow's metadata.
    pub workflow_name: String,
    /// Author stamped into every workflow's metadata.
    pub created_by: String,
    /// Placeholder URL for webhook triggers.
    pub webhook_url: String,
    /// Headers attached to webhook triggers.
    pub webhook_headers: BTreeMap<String, String>,
    /// Timezone for cron triggers.
    pub timezone: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            workflow_name: "AI Generated Workflow".into(),
            created_by: "ai-generator".into(),
            webhook_url: "https://api.example.com/webhook".into(),
            webhook_headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            timezone: "UTC".into(),
        }
    }
}

impl CompilerConfig {
    /// Reject configurations with blank required fields.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("workflow_name", &self.workflow_name),
            ("created_by", &self.created_by),
            ("webhook_url", &self.webhook_url),
            ("timezone", &self.timezone),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CompileError::Config {
                    reason: format!("`{field}` must not be empty"),
                });
            }
        }
        Ok(())
    }
}
