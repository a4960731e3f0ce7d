//! Rate lookup: criteria to USD-per-million-token multiplier.

use crate::pricing::resolver::{resolve, MatchKind};
use crate::pricing::table::{RateEntry, RateTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat rate applied when no pricing pattern resolves.
///
/// Unknown models are billed at a conservative flat rate rather than failing
/// the calculation; these numbers feed an operator dashboard, not a ledger.
pub const DEFAULT_RATE: f64 = 6.0;

/// Multiplier returned when the token class or model is missing entirely and
/// cost math would otherwise be meaningless.
pub const NEUTRAL_RATE: f64 = 1.0;

/// Token class a rate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// User-authored input tokens.
    Prompt,
    /// Model-authored output tokens.
    Completion,
}

impl RateEntry {
    /// Rate for one token class.
    pub fn rate(&self, class: TokenClass) -> f64 {
        match class {
            TokenClass::Prompt => self.prompt,
            TokenClass::Completion => self.completion,
        }
    }
}

/// Per-endpoint rate overrides, keyed by model name.
pub type EndpointOverrides = HashMap<String, RateEntry>;

/// Where a multiplier came from.
///
/// The numeric outcome is the contract; the tag exists so callers and tests
/// can tell confident pricing apart from fallback pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// A table entry matched (exactly or by containment).
    Exact,
    /// Matched through the legacy size-class aliases.
    Aliased,
    /// Nothing matched; [`DEFAULT_RATE`] applied.
    Default,
    /// Missing token class or model; [`NEUTRAL_RATE`] applied.
    Neutral,
}

/// A rate lookup result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multiplier {
    /// USD per million tokens.
    pub rate: f64,
    pub resolution: Resolution,
}

/// Lookup criteria, one variant per supported call shape.
#[derive(Debug, Clone, Copy)]
pub enum RateQuery<'a> {
    /// Endpoint-specific override table; falls back to [`DEFAULT_RATE`] when
    /// the model has no override.
    ForEndpoint {
        overrides: &'a EndpointOverrides,
        model: &'a str,
        class: TokenClass,
    },
    /// A key already produced by the resolver.
    ForKey { key: &'a str, class: TokenClass },
    /// A raw model name; runs the resolver first. `endpoint` is carried for
    /// parity with the override variant but does not affect this branch.
    ForModel {
        model: &'a str,
        endpoint: Option<&'a str>,
        class: TokenClass,
    },
    /// Token class or model unknown; yields exactly [`NEUTRAL_RATE`].
    Unpriceable,
}

/// Return the applicable multiplier for `query` against `table`.
///
/// Never fails: every path degrades to [`DEFAULT_RATE`] or [`NEUTRAL_RATE`].
pub fn multiplier(table: &RateTable, query: RateQuery<'_>) -> Multiplier {
    match query {
        RateQuery::ForEndpoint {
            overrides,
            model,
            class,
        } => match overrides.get(model) {
            Some(entry) => Multiplier {
                rate: entry.rate(class),
                resolution: Resolution::Exact,
            },
            None => Multiplier {
                rate: DEFAULT_RATE,
                resolution: Resolution::Default,
            },
        },
        RateQuery::ForKey { key, class } => match table.lookup_entry(key) {
            Some(entry) => Multiplier {
                rate: entry.rate(class),
                resolution: Resolution::Exact,
            },
            None => Multiplier {
                rate: DEFAULT_RATE,
                resolution: Resolution::Default,
            },
        },
        RateQuery::ForModel { model, class, .. } => match resolve(table, model) {
            Some(resolved) => {
                let resolution = match resolved.via {
                    MatchKind::Exact | MatchKind::Substring => Resolution::Exact,
                    MatchKind::LegacyAlias => Resolution::Aliased,
                };
                match table.lookup_entry(resolved.pattern) {
                    Some(entry) => Multiplier {
                        rate: entry.rate(class),
                        resolution,
                    },
                    None => Multiplier {
                        rate: DEFAULT_RATE,
                        resolution: Resolution::Default,
                    },
                }
            }
            None => Multiplier {
                rate: DEFAULT_RATE,
                resolution: Resolution::Default,
            },
        },
        RateQuery::Unpriceable => Multiplier {
            rate: NEUTRAL_RATE,
            resolution: Resolution::Neutral,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::table::RateTable;

    fn table() -> RateTable {
        RateTable::default_table()
    }

    #[test]
    fn test_for_model_exact() {
        let m = multiplier(
            &table(),
            RateQuery::ForModel {
                model: "gpt-4o-mini",
                endpoint: None,
                class: TokenClass::Prompt,
            },
        );
        assert_eq!(m.rate, 0.15);
        assert_eq!(m.resolution, Resolution::Exact);
    }

    #[test]
    fn test_for_model_completion_class() {
        let m = multiplier(
            &table(),
            RateQuery::ForModel {
                model: "claude-3-5-sonnet-20240620",
                endpoint: None,
                class: TokenClass::Completion,
            },
        );
        assert_eq!(m.rate, 15.0);
        assert_eq!(m.resolution, Resolution::Exact);
    }

    #[test]
    fn test_for_model_legacy_alias() {
        let m = multiplier(
            &table(),
            RateQuery::ForModel {
                model: "gpt-4-0613",
                endpoint: None,
                class: TokenClass::Prompt,
            },
        );
        assert_eq!(m.rate, 30.0);
        assert_eq!(m.resolution, Resolution::Aliased);
    }

    #[test]
    fn test_for_model_unknown_defaults() {
        let m = multiplier(
            &table(),
            RateQuery::ForModel {
                model: "some-custom-llm-v9",
                endpoint: None,
                class: TokenClass::Completion,
            },
        );
        assert_eq!(m.rate, DEFAULT_RATE);
        assert_eq!(m.resolution, Resolution::Default);
    }

    #[test]
    fn test_for_key_hit_and_miss() {
        let t = table();
        let m = multiplier(
            &t,
            RateQuery::ForKey {
                key: "16k",
                class: TokenClass::Prompt,
            },
        );
        assert_eq!(m.rate, 3.0);

        let m = multiplier(
            &t,
            RateQuery::ForKey {
                key: "no-such-key",
                class: TokenClass::Prompt,
            },
        );
        assert_eq!(m.rate, DEFAULT_RATE);
        assert_eq!(m.resolution, Resolution::Default);
    }

    #[test]
    fn test_endpoint_override_beats_table() {
        let t = table();
        let mut overrides = EndpointOverrides::new();
        overrides.insert(
            "gpt-4o".to_string(),
            RateEntry {
                prompt: 1.0,
                completion: 2.0,
            },
        );

        let m = multiplier(
            &t,
            RateQuery::ForEndpoint {
                overrides: &overrides,
                model: "gpt-4o",
                class: TokenClass::Completion,
            },
        );
        assert_eq!(m.rate, 2.0);
        assert_eq!(m.resolution, Resolution::Exact);

        // A model absent from the override table gets the default rate even
        // though the main table knows it.
        let m = multiplier(
            &t,
            RateQuery::ForEndpoint {
                overrides: &overrides,
                model: "gpt-4o-mini",
                class: TokenClass::Prompt,
            },
        );
        assert_eq!(m.rate, DEFAULT_RATE);
        assert_eq!(m.resolution, Resolution::Default);
    }

    #[test]
    fn test_unpriceable_is_exactly_one() {
        let m = multiplier(&table(), RateQuery::Unpriceable);
        assert_eq!(m.rate, 1.0);
        assert_eq!(m.resolution, Resolution::Neutral);
    }

    #[test]
    fn test_rate_always_from_known_set() {
        let t = table();
        let declared: Vec<f64> = t
            .iter()
            .flat_map(|(_, e)| [e.prompt, e.completion])
            .collect();

        for model in ["gpt-4o", "gpt-4-0613", "zzz", "claude-2.1", ""] {
            for class in [TokenClass::Prompt, TokenClass::Completion] {
                let m = multiplier(
                    &t,
                    RateQuery::ForModel {
                        model,
                        endpoint: None,
                        class,
                    },
                );
                assert!(
                    declared.contains(&m.rate) || m.rate == DEFAULT_RATE,
                    "unexpected rate {} for {model}",
                    m.rate
                );
            }
        }
    }
}
