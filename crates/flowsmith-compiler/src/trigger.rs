//! Trigger synthesis — decide how a workflow starts.
//!
//! A prompt selects exactly one trigger family:
//!
//! 1. a `webhook` cue gives a webhook trigger;
//! 2. otherwise a `cron`, `schedule` or `every` cue gives a cron trigger;
//! 3. otherwise a named-event trigger is produced.
//!
//! Webhook URLs and headers are placeholders from [`CompilerConfig`]; real
//! endpoint provisioning happens elsewhere.

use tracing::debug;

use crate::catalog::TriggerIntent;
use crate::config::CompilerConfig;
use crate::cue::{CueSpec, CueTable};
use crate::error::Result;
use crate::model::{
    CronConfig, EventConfig, HttpMethod, TriggerKind, WebhookConfig, WorkflowTrigger,
};
use crate::parser::EVENT_CUES;

/// Cron expression used when no frequency cue is present.
pub const DAILY: &str = "0 0 * * *";

const KIND_CUES: &[(CueSpec, TriggerKind)] = &[
    (CueSpec::Keywords(&["webhook"]), TriggerKind::Webhook),
    (CueSpec::Keywords(&["cron", "schedule", "every"]), TriggerKind::Cron),
];

const METHOD_CUES: &[(CueSpec, HttpMethod)] =
    &[(CueSpec::Keywords(&["post", "create"]), HttpMethod::Post)];

const SCHEDULE_CUES: &[(CueSpec, &str)] = &[
    (CueSpec::Keywords(&["hour"]), "0 * * * *"),
    (CueSpec::Keywords(&["week"]), "0 0 * * 0"),
    (CueSpec::Keywords(&["month"]), "0 0 1 * *"),
];

/// Builds [`WorkflowTrigger`] descriptors from prompts.
#[derive(Debug, Clone)]
pub struct TriggerGenerator {
    kind_cues: CueTable<TriggerKind>,
    method_cues: CueTable<HttpMethod>,
    schedule_cues: CueTable<&'static str>,
    event_cues: CueTable<TriggerIntent>,
    config: CompilerConfig,
}

impl TriggerGenerator {
    /// Compile the trigger cue tables.
    pub fn new(config: CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kind_cues: CueTable::build(KIND_CUES)?,
            method_cues: CueTable::build(METHOD_CUES)?,
            schedule_cues: CueTable::build(SCHEDULE_CUES)?,
            event_cues: CueTable::build(EVENT_CUES)?,
            config,
        })
    }

    /// Pick the trigger family cued by the prompt.
    pub fn select_kind(&self, prompt: &str) -> TriggerKind {
        self.kind_cues
            .first_match(prompt)
            .unwrap_or(TriggerKind::Event)
    }

    /// Build the single trigger for a prompt using the dispatch rule above.
    pub fn generate(&self, prompt: &str) -> WorkflowTrigger {
        let kind = self.select_kind(prompt);
        debug!(?kind, "selected trigger kind");
        match kind {
            TriggerKind::Webhook => self.generate_webhook_trigger(prompt),
            TriggerKind::Cron => self.generate_cron_trigger(prompt),
            TriggerKind::Event => self.generate_event_trigger(prompt),
        }
    }

    /// A webhook trigger; `POST` if the prompt mentions posting or creating,
    /// `GET` otherwise.
    pub fn generate_webhook_trigger(&self, prompt: &str) -> WorkflowTrigger {
        let method = self
            .method_cues
            .first_match(prompt)
            .unwrap_or(HttpMethod::Get);
        WorkflowTrigger::Webhook(WebhookConfig {
            url: self.config.webhook_url.clone(),
            method,
            headers: self.config.webhook_headers.clone(),
        })
    }

    /// A cron trigger: hourly, weekly or monthly by keyword, daily otherwise.
    pub fn generate_cron_trigger(&self, prompt: &str) -> WorkflowTrigger {
        let cron = self.schedule_cues.first_match(prompt).unwrap_or(DAILY);
        WorkflowTrigger::Cron(CronConfig {
            cron: cron.to_string(),
            timezone: self.config.timezone.clone(),
        })
    }

    /// A named-event trigger (`user_signup`, `user_login`,
    /// `payment_success`, else `generic_event`).
    pub fn generate_event_trigger(&self, prompt: &str) -> WorkflowTrigger {
        let event = self
            .event_cues
            .first_match(prompt)
            .unwrap_or(TriggerIntent::GenericEvent);
        WorkflowTrigger::Event(EventConfig { event })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> TriggerGenerator {
        TriggerGenerator::new(CompilerConfig::default()).unwrap()
    }

    #[test]
    fn every_hour_is_hourly_cron() {
        let trigger = generator().generate("run this every hour");
        assert_eq!(
            serde_json::to_value(&trigger).unwrap(),
            json!({ "type": "cron", "config": { "cron": "0 * * * *", "timezone": "UTC" } })
        );
    }

    #[test]
    fn cron_frequencies() {
        let g = generator();
        let cron = |prompt: &str| match g.generate_cron_trigger(prompt) {
            WorkflowTrigger::Cron(c) => c.cron,
            other => panic!("expected cron trigger, got {other:?}"),
        };
        assert_eq!(cron("weekly digest"), "0 0 * * 0");
        assert_eq!(cron("monthly report"), "0 0 1 * *");
        assert_eq!(cron("on a schedule"), DAILY);
    }

    #[test]
    fn webhook_takes_priority_over_schedule() {
        let trigger = generator().generate("every time the webhook fires");
        assert_eq!(trigger.kind(), TriggerKind::Webhook);
    }

    #[test]
    fn webhook_method_follows_cues() {
        let g = generator();
        match g.generate_webhook_trigger("create a record from the webhook") {
            WorkflowTrigger::Webhook(cfg) => {
                assert_eq!(cfg.method, HttpMethod::Post);
                assert_eq!(cfg.url, "https://api.example.com/webhook");
                assert_eq!(cfg.headers["Content-Type"], "application/json");
            }
            other => panic!("expected webhook trigger, got {other:?}"),
        }
        match g.generate_webhook_trigger("poll the webhook") {
            WorkflowTrigger::Webhook(cfg) => assert_eq!(cfg.method, HttpMethod::Get),
            other => panic!("expected webhook trigger, got {other:?}"),
        }
    }

    #[test]
    fn event_trigger_uses_named_events() {
        let g = generator();
        assert_eq!(
            g.generate("when someone signs up"),
            WorkflowTrigger::Event(EventConfig {
                event: TriggerIntent::UserSignup
            })
        );
        assert_eq!(
            g.generate_event_trigger("after a payment"),
            WorkflowTrigger::Event(EventConfig {
                event: TriggerIntent::PaymentSuccess
            })
        );
    }

    #[test]
    fn error_cues_do_not_name_events() {
        assert_eq!(
            generator().generate_event_trigger("when the import fails"),
            WorkflowTrigger::Event(EventConfig {
                event: TriggerIntent::GenericEvent
            })
        );
    }

    #[test]
    fn configured_timezone_is_used() {
        let config = CompilerConfig {
            timezone: "Europe/Berlin".into(),
            ..CompilerConfig::default()
        };
        let g = TriggerGenerator::new(config).unwrap();
        match g.generate_cron_trigger("every day") {
            WorkflowTrigger::Cron(c) => assert_eq!(c.timezone, "Europe/Berlin"),
            other => panic!("expected cron trigger, got {other:?}"),
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CompilerConfig {
            webhook_url: String::new(),
            ..CompilerConfig::default()
        };
        assert!(TriggerGenerator::new(config).is_err());
    }
}
