//! Cost aggregation over message sets.

use crate::analytics::window::TimeWindow;
use crate::pricing::{multiplier, RateQuery, RateTable, Resolution, TokenClass};
use crate::store::MessageRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Display marker appended to a model name borrowed from a reply.
pub const INFERRED_MARKER: &str = " (inferred)";

/// Aggregated token and cost totals. Computed fresh on every query, never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub prompt_cost: f64,
    pub completion_cost: f64,
    pub total_cost: f64,
    pub message_count: usize,
}

/// The model a message is priced under, possibly borrowed from its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveModel {
    pub name: String,
    pub inferred: bool,
}

impl EffectiveModel {
    /// Display form; inferred models carry [`INFERRED_MARKER`].
    pub fn display(&self) -> String {
        if self.inferred {
            format!("{}{}", self.name, INFERRED_MARKER)
        } else {
            self.name.clone()
        }
    }

    /// Name used for pricing; any inferred marker is stripped.
    pub fn pricing_name(&self) -> &str {
        self.name.strip_suffix(INFERRED_MARKER).unwrap_or(&self.name)
    }
}

/// Per-message pricing outcome for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedMessage {
    pub token_class: TokenClass,
    pub tokens: u32,
    /// Display model, marker included when inferred; `None` when unknown.
    pub model: Option<String>,
    pub cost: f64,
    pub resolution: Resolution,
}

fn own_model(msg: &MessageRecord) -> Option<&str> {
    msg.model.as_deref().filter(|m| !m.is_empty())
}

/// Effective model of `msg` within `set`.
///
/// A user prompt without a model borrows the model of its reply: the first
/// non-user-authored message in `set` whose parent id equals this message's
/// id. The search is confined to `set` on purpose; a windowed aggregation
/// cannot see a reply outside its window and reports the model as unknown.
pub fn effective_model(msg: &MessageRecord, set: &[&MessageRecord]) -> Option<EffectiveModel> {
    if let Some(name) = own_model(msg) {
        return Some(EffectiveModel {
            name: name.to_string(),
            inferred: false,
        });
    }
    if !msg.is_user_authored {
        return None;
    }
    set.iter()
        .find(|reply| {
            !reply.is_user_authored && reply.parent_message_id.as_deref() == Some(&msg.message_id)
        })
        .and_then(|reply| own_model(reply))
        .map(|name| EffectiveModel {
            name: name.to_string(),
            inferred: true,
        })
}

/// Stateless cost aggregator over an injected rate table.
///
/// Cheap to clone and safe to share; every call reads only its arguments.
#[derive(Debug, Clone)]
pub struct CostEngine {
    table: Arc<RateTable>,
}

impl CostEngine {
    pub fn new(table: Arc<RateTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Price one message against an inference set (usually the rest of its
    /// conversation). Malformed records degrade to zero cost, never an error.
    pub fn price_message(&self, msg: &MessageRecord, set: &[&MessageRecord]) -> PricedMessage {
        let token_class = if msg.is_user_authored {
            TokenClass::Prompt
        } else {
            TokenClass::Completion
        };
        let tokens = msg.token_count.unwrap_or(0);

        match effective_model(msg, set) {
            Some(model) => {
                let m = multiplier(
                    &self.table,
                    RateQuery::ForModel {
                        model: model.pricing_name(),
                        endpoint: msg.endpoint.as_deref(),
                        class: token_class,
                    },
                );
                PricedMessage {
                    token_class,
                    tokens,
                    model: Some(model.display()),
                    cost: f64::from(tokens) / 1_000_000.0 * m.rate,
                    resolution: m.resolution,
                }
            }
            None => PricedMessage {
                token_class,
                tokens,
                model: None,
                cost: 0.0,
                resolution: Resolution::Neutral,
            },
        }
    }

    /// Aggregate totals over `messages`; model inference searches the same
    /// set.
    pub fn aggregate(&self, messages: &[MessageRecord]) -> CostTotals {
        let refs: Vec<&MessageRecord> = messages.iter().collect();
        self.aggregate_refs(&refs)
    }

    /// Aggregate only the messages created inside `window` (anchored at
    /// `now`). Inference is confined to the windowed subset.
    pub fn aggregate_window(
        &self,
        messages: &[MessageRecord],
        window: TimeWindow,
        now: DateTime<Utc>,
    ) -> CostTotals {
        match window.cutoff(now) {
            Some(cutoff) => {
                let refs: Vec<&MessageRecord> = messages
                    .iter()
                    .filter(|m| m.created_at.is_some_and(|t| t >= cutoff))
                    .collect();
                self.aggregate_refs(&refs)
            }
            None => self.aggregate(messages),
        }
    }

    fn aggregate_refs(&self, messages: &[&MessageRecord]) -> CostTotals {
        let mut totals = CostTotals::default();
        for msg in messages {
            let priced = self.price_message(msg, messages);
            totals.message_count += 1;
            match priced.token_class {
                TokenClass::Prompt => {
                    totals.input_tokens += u64::from(priced.tokens);
                    totals.prompt_cost += priced.cost;
                }
                TokenClass::Completion => {
                    totals.output_tokens += u64::from(priced.tokens);
                    totals.completion_cost += priced.cost;
                }
            }
        }
        totals.total_cost = totals.prompt_cost + totals.completion_cost;
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CostEngine {
        CostEngine::new(Arc::new(RateTable::default_table()))
    }

    fn msg(id: &str, parent: Option<&str>, user_authored: bool, tokens: u32) -> MessageRecord {
        MessageRecord {
            message_id: id.to_string(),
            parent_message_id: parent.map(str::to_string),
            conversation_id: "c1".to_string(),
            is_user_authored: user_authored,
            token_count: Some(tokens),
            ..MessageRecord::default()
        }
    }

    fn with_model(mut m: MessageRecord, model: &str) -> MessageRecord {
        m.model = Some(model.to_string());
        m
    }

    #[test]
    fn test_empty_set_all_zero() {
        let totals = engine().aggregate(&[]);
        assert_eq!(totals, CostTotals::default());
    }

    #[test]
    fn test_prompt_and_completion_split() {
        let messages = vec![
            with_model(msg("m1", None, true, 1_000_000), "gpt-4o"),
            with_model(msg("m2", Some("m1"), false, 2_000_000), "gpt-4o"),
        ];
        let totals = engine().aggregate(&messages);
        assert_eq!(totals.input_tokens, 1_000_000);
        assert_eq!(totals.output_tokens, 2_000_000);
        assert_eq!(totals.prompt_cost, 2.5);
        assert_eq!(totals.completion_cost, 20.0);
        assert_eq!(totals.total_cost, 22.5);
        assert_eq!(totals.message_count, 2);
    }

    #[test]
    fn test_model_inferred_from_reply() {
        let messages = vec![
            msg("m1", None, true, 1000),
            with_model(msg("m2", Some("m1"), false, 0), "gpt-4o-mini"),
        ];
        let totals = engine().aggregate(&messages);
        // 1000 / 1e6 * 0.15
        assert_eq!(totals.prompt_cost, 0.00015);
        assert_eq!(totals.input_tokens, 1000);
    }

    #[test]
    fn test_inferred_model_display_and_pricing_name() {
        let messages = vec![
            msg("m1", None, true, 1000),
            with_model(msg("m2", Some("m1"), false, 0), "gpt-4o-mini"),
        ];
        let refs: Vec<&MessageRecord> = messages.iter().collect();
        let model = effective_model(&messages[0], &refs).unwrap();
        assert!(model.inferred);
        assert_eq!(model.display(), "gpt-4o-mini (inferred)");
        assert_eq!(model.pricing_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_no_model_no_reply_costs_zero() {
        let messages = vec![msg("m1", None, true, 5000)];
        let totals = engine().aggregate(&messages);
        assert_eq!(totals.prompt_cost, 0.0);
        // Tokens still counted.
        assert_eq!(totals.input_tokens, 5000);
        assert_eq!(totals.message_count, 1);
    }

    #[test]
    fn test_assistant_message_never_infers() {
        // A completion without a model gets no borrowed model even when a
        // child message exists.
        let messages = vec![
            msg("m1", None, false, 700),
            with_model(msg("m2", Some("m1"), false, 0), "gpt-4o"),
        ];
        let totals = engine().aggregate(&messages);
        assert_eq!(totals.completion_cost, 0.0);
        assert_eq!(totals.output_tokens, 700);
    }

    #[test]
    fn test_unknown_model_billed_at_default_rate() {
        let messages = vec![with_model(
            msg("m1", None, false, 2_000_000),
            "some-custom-llm-v9",
        )];
        let totals = engine().aggregate(&messages);
        assert_eq!(totals.completion_cost, 12.0);
        assert_eq!(totals.total_cost, 12.0);
    }

    #[test]
    fn test_missing_token_count_treated_as_zero() {
        let mut m = with_model(msg("m1", None, true, 0), "gpt-4o");
        m.token_count = None;
        let totals = engine().aggregate(&[m]);
        assert_eq!(totals.input_tokens, 0);
        assert_eq!(totals.total_cost, 0.0);
        assert_eq!(totals.message_count, 1);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let messages = vec![
            msg("m1", None, true, 1000),
            with_model(msg("m2", Some("m1"), false, 2500), "claude-3-5-sonnet-20240620"),
        ];
        let e = engine();
        assert_eq!(e.aggregate(&messages), e.aggregate(&messages));
    }

    #[test]
    fn test_zero_token_message_only_bumps_count() {
        let mut messages = vec![
            with_model(msg("m1", None, true, 1000), "gpt-4o"),
            with_model(msg("m2", Some("m1"), false, 2000), "gpt-4o"),
        ];
        let before = engine().aggregate(&messages);

        messages.push(with_model(msg("m3", Some("m2"), true, 0), "gpt-4o"));
        let after = engine().aggregate(&messages);

        assert_eq!(after.prompt_cost, before.prompt_cost);
        assert_eq!(after.completion_cost, before.completion_cost);
        assert_eq!(after.total_cost, before.total_cost);
        assert_eq!(after.message_count, before.message_count + 1);
    }

    #[test]
    fn test_windowed_inference_cannot_reach_outside_window() {
        let now: DateTime<Utc> = "2025-06-30T12:00:00Z".parse().unwrap();
        let mut prompt = msg("m1", None, true, 1000);
        prompt.created_at = Some("2025-06-30T09:00:00Z".parse().unwrap());
        // Reply exists but predates the 24h window.
        let mut reply = with_model(msg("m2", Some("m1"), false, 500), "gpt-4o");
        reply.created_at = Some("2025-06-01T09:00:00Z".parse().unwrap());

        let messages = vec![prompt, reply];
        let e = engine();

        let windowed = e.aggregate_window(&messages, TimeWindow::Last24Hours, now);
        assert_eq!(windowed.message_count, 1);
        assert_eq!(windowed.input_tokens, 1000);
        // Reply invisible, model unknown, zero cost by design.
        assert_eq!(windowed.total_cost, 0.0);

        let lifetime = e.aggregate_window(&messages, TimeWindow::AllTime, now);
        assert_eq!(lifetime.message_count, 2);
        assert!(lifetime.total_cost > 0.0);
    }

    #[test]
    fn test_price_message_resolution_tags() {
        let e = engine();

        let known = with_model(msg("m1", None, false, 100), "gpt-4o");
        let priced = e.price_message(&known, &[]);
        assert_eq!(priced.resolution, Resolution::Exact);

        let legacy = with_model(msg("m2", None, false, 100), "gpt-4-0613");
        let priced = e.price_message(&legacy, &[]);
        assert_eq!(priced.resolution, Resolution::Aliased);

        let unknown = with_model(msg("m3", None, false, 100), "zzz-9000");
        let priced = e.price_message(&unknown, &[]);
        assert_eq!(priced.resolution, Resolution::Default);

        let modelless = msg("m4", None, false, 100);
        let priced = e.price_message(&modelless, &[]);
        assert_eq!(priced.resolution, Resolution::Neutral);
        assert_eq!(priced.cost, 0.0);
    }
}
