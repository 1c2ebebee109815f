//! Prompt parser — extracts workflow facts from free text.
//!
//! Four independent extractors run over the whole prompt:
//!
//! | Extractor | Policy | Fallback |
//! |-----------|--------|----------|
//! | trigger intent | first match wins | `generic_event` |
//! | actions | every match kept | `[log_event]` |
//! | conditions | every match kept | `[]` |
//! | data sources | every match kept | `[]` |
//!
//! Matching is substring/regex based with no tokenization or negation
//! handling: "don't email them" still yields `send_email`, and "notify"
//! cues `custom_condition` because it contains "if".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{ActionKind, ConditionKind, DataSource, TriggerIntent};
use crate::cue::{CueSpec, CueTable};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Cue tables
// ---------------------------------------------------------------------------

/// Named-event cues, in priority order.  Shared with the event trigger.
pub(crate) const EVENT_CUES: &[(CueSpec, TriggerIntent)] = &[
    (
        CueSpec::Pattern(r"sign(s|ed|ing)?[\s-]?up|register"),
        TriggerIntent::UserSignup,
    ),
    (
        CueSpec::Pattern(r"log(s|ged|ging)?[\s-]?in|sign(s|ed|ing)?[\s-]?in"),
        TriggerIntent::UserLogin,
    ),
    (CueSpec::Keywords(&["payment", "purchase"]), TriggerIntent::PaymentSuccess),
];

/// Checked after [`EVENT_CUES`] when extracting a trigger intent.
const ERROR_CUE: (CueSpec, TriggerIntent) =
    (CueSpec::Keywords(&["error", "fail"]), TriggerIntent::ErrorEvent);

const ACTION_CUES: &[(CueSpec, ActionKind)] = &[
    (CueSpec::Keywords(&["email", "notify"]), ActionKind::SendEmail),
    (CueSpec::Keywords(&["crm", "customer"]), ActionKind::AddToCrm),
    (CueSpec::Keywords(&["log", "record"]), ActionKind::LogEvent),
    (CueSpec::Keywords(&["webhook"]), ActionKind::CallWebhook),
];

const CONDITION_CUES: &[(CueSpec, ConditionKind)] = &[
    (CueSpec::Keywords(&["plan", "upgrade"]), ConditionKind::PlanCheck),
    (
        CueSpec::Keywords(&["if", "when", "unless", "only if"]),
        ConditionKind::CustomCondition,
    ),
    (CueSpec::Keywords(&["amount", "greater", "less"]), ConditionKind::AmountCheck),
];

const DATA_SOURCE_CUES: &[(CueSpec, DataSource)] = &[
    (CueSpec::Keywords(&["database", "db"]), DataSource::Database),
    (CueSpec::Keywords(&["api", "external"]), DataSource::Api),
    (CueSpec::Keywords(&["spreadsheet", "sheet"]), DataSource::Spreadsheet),
    (CueSpec::Keywords(&["crm"]), DataSource::Crm),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The four facts extracted from one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAnalysis {
    pub trigger_intent: TriggerIntent,
    pub actions: Vec<ActionKind>,
    pub conditions: Vec<ConditionKind>,
    pub data_sources: Vec<DataSource>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Keyword-driven prompt parser.
///
/// Build once with [`PromptParser::new`] and share; every extractor takes
/// `&self` and is a pure function of the prompt.
#[derive(Debug, Clone)]
pub struct PromptParser {
    trigger_cues: CueTable<TriggerIntent>,
    action_cues: CueTable<ActionKind>,
    condition_cues: CueTable<ConditionKind>,
    data_source_cues: CueTable<DataSource>,
}

impl PromptParser {
    /// Compile the cue tables.
    pub fn new() -> Result<Self> {
        let trigger_specs: Vec<_> = EVENT_CUES.iter().copied().chain([ERROR_CUE]).collect();

        Ok(Self {
            trigger_cues: CueTable::build(&trigger_specs)?,
            action_cues: CueTable::build(ACTION_CUES)?,
            condition_cues: CueTable::build(CONDITION_CUES)?,
            data_source_cues: CueTable::build(DATA_SOURCE_CUES)?,
        })
    }

    /// Return the highest-priority trigger intent cued by the prompt, or
    /// `generic_event` if none is.
    pub fn extract_trigger_intent(&self, prompt: &str) -> TriggerIntent {
        let intent = self
            .trigger_cues
            .first_match(prompt)
            .unwrap_or(TriggerIntent::GenericEvent);
        debug!(%intent, "extracted trigger intent");
        intent
    }

    /// Return every action cued by the prompt, or `[log_event]` if none is.
    pub fn extract_actions(&self, prompt: &str) -> Vec<ActionKind> {
        let mut actions = self.action_cues.all_matches(prompt);
        if actions.is_empty() {
            actions.push(ActionKind::LogEvent);
        }
        debug!(?actions, "extracted actions");
        actions
    }

    /// Return every condition cued by the prompt.
    pub fn extract_conditions(&self, prompt: &str) -> Vec<ConditionKind> {
        let conditions = self.condition_cues.all_matches(prompt);
        debug!(?conditions, "extracted conditions");
        conditions
    }

    /// Return every data source referenced by the prompt.
    pub fn extract_data_sources(&self, prompt: &str) -> Vec<DataSource> {
        let sources = self.data_source_cues.all_matches(prompt);
        debug!(?sources, "extracted data sources");
        sources
    }

    /// Run all four extractors.
    pub fn analyze(&self, prompt: &str) -> PromptAnalysis {
        PromptAnalysis {
            trigger_intent: self.extract_trigger_intent(prompt),
            actions: self.extract_actions(prompt),
            conditions: self.extract_conditions(prompt),
            data_sources: self.extract_data_sources(prompt),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> PromptParser {
        PromptParser::new().expect("cue tables compile")
    }

    #[test]
    fn signup_intent() {
        let p = parser();
        assert_eq!(
            p.extract_trigger_intent("email the user when they sign up"),
            TriggerIntent::UserSignup
        );
        assert_eq!(
            p.extract_trigger_intent("after someone registers"),
            TriggerIntent::UserSignup
        );
    }

    #[test]
    fn login_and_payment_intents() {
        let p = parser();
        assert_eq!(p.extract_trigger_intent("on every Login"), TriggerIntent::UserLogin);
        assert_eq!(p.extract_trigger_intent("after sign-in"), TriggerIntent::UserLogin);
        assert_eq!(
            p.extract_trigger_intent("after a purchase"),
            TriggerIntent::PaymentSuccess
        );
        assert_eq!(
            p.extract_trigger_intent("when the job fails"),
            TriggerIntent::ErrorEvent
        );
    }

    #[test]
    fn earlier_cue_wins_on_tie() {
        let p = parser();
        assert_eq!(
            p.extract_trigger_intent("on payment or signup"),
            TriggerIntent::UserSignup
        );
        assert_eq!(
            p.extract_trigger_intent("payment error"),
            TriggerIntent::PaymentSuccess
        );
    }

    #[test]
    fn unmatched_intent_is_generic() {
        assert_eq!(parser().extract_trigger_intent("hello"), TriggerIntent::GenericEvent);
    }

    #[test]
    fn actions_accumulate_in_table_order() {
        let actions = parser().extract_actions("call the webhook, add to CRM and email them");
        assert_eq!(
            actions,
            vec![ActionKind::SendEmail, ActionKind::AddToCrm, ActionKind::CallWebhook]
        );
    }

    #[test]
    fn actions_fall_back_to_log_event() {
        assert_eq!(parser().extract_actions("hello"), vec![ActionKind::LogEvent]);
    }

    #[test]
    fn negation_is_not_understood() {
        let actions = parser().extract_actions("do not send any email");
        assert_eq!(actions, vec![ActionKind::SendEmail]);
    }

    #[test]
    fn login_also_cues_log_event() {
        let actions = parser().extract_actions("when a user logs in, notify them");
        assert!(actions.contains(&ActionKind::LogEvent));
        assert!(actions.contains(&ActionKind::SendEmail));
    }

    #[test]
    fn conditions_accumulate() {
        let conditions =
            parser().extract_conditions("if the amount is greater than 100 and they upgrade");
        assert_eq!(
            conditions,
            vec![
                ConditionKind::PlanCheck,
                ConditionKind::CustomCondition,
                ConditionKind::AmountCheck
            ]
        );
    }

    #[test]
    fn conditional_words_match_inside_words() {
        let p = parser();
        assert_eq!(
            p.extract_conditions("email them whenever they sign up"),
            vec![ConditionKind::CustomCondition]
        );
        // "notify" contains "if".
        assert_eq!(
            p.extract_conditions("notify the team"),
            vec![ConditionKind::CustomCondition]
        );
    }

    #[test]
    fn data_sources_have_no_fallback() {
        let p = parser();
        assert!(p.extract_data_sources("hello").is_empty());
        assert_eq!(
            p.extract_data_sources("sync the db with the spreadsheet via the API"),
            vec![DataSource::Database, DataSource::Api, DataSource::Spreadsheet]
        );
    }

    #[test]
    fn analyze_runs_all_extractors() {
        let analysis = parser().analyze("if the user is on the pro plan, add them to the CRM");
        assert_eq!(analysis.trigger_intent, TriggerIntent::GenericEvent);
        assert_eq!(analysis.actions, vec![ActionKind::AddToCrm]);
        assert_eq!(
            analysis.conditions,
            vec![ConditionKind::PlanCheck, ConditionKind::CustomCondition]
        );
        assert_eq!(analysis.data_sources, vec![DataSource::Crm]);
    }
}
