//! Static rate table mapping model-name patterns to per-million-token rates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// USD-per-million-token rates for one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Rate applied to user-authored (input) tokens.
    pub prompt: f64,
    /// Rate applied to model-authored (output) tokens.
    pub completion: f64,
}

const fn rate(prompt: f64, completion: f64) -> RateEntry {
    RateEntry { prompt, completion }
}

/// Declared pattern list, in match-priority order.
///
/// Order is load-bearing: when several patterns are substrings of a queried
/// model name, the earliest one wins. Within a family the longer, more
/// specific keys come before any key that is their prefix, and the loose
/// family fallbacks sit at the tail, so a dated release name such as
/// `gpt-4o-mini-2024-07-18` or `claude-3-5-sonnet-20240620` resolves to its
/// own key rather than `gpt-4o` or the `claude-` catch-all.
const DEFAULT_ENTRIES: &[(&str, RateEntry)] = &[
    // Legacy context-size classes (pre-2024 naming)
    ("8k", rate(30.0, 60.0)),
    ("32k", rate(60.0, 120.0)),
    ("4k", rate(1.5, 2.0)),
    ("16k", rate(3.0, 4.0)),
    // OpenAI
    ("gpt-3.5-turbo-0125", rate(0.5, 1.5)),
    ("gpt-3.5-turbo-1106", rate(1.0, 2.0)),
    ("gpt-4-1106", rate(10.0, 30.0)),
    ("gpt-4.1-nano", rate(0.1, 0.4)),
    ("gpt-4.1-mini", rate(0.4, 1.6)),
    ("gpt-4.1", rate(2.0, 8.0)),
    ("gpt-4.5", rate(75.0, 150.0)),
    ("gpt-4o-2024-05-13", rate(5.0, 15.0)),
    ("gpt-4o-mini", rate(0.15, 0.6)),
    ("gpt-4o", rate(2.5, 10.0)),
    ("gpt-5-nano", rate(0.05, 0.4)),
    ("gpt-5-mini", rate(0.25, 2.0)),
    ("gpt-5-pro", rate(15.0, 120.0)),
    ("gpt-5.1", rate(1.25, 10.0)),
    ("gpt-5.2", rate(1.75, 14.0)),
    ("gpt-5", rate(1.25, 10.0)),
    ("o1-preview", rate(15.0, 60.0)),
    ("o1-mini", rate(1.1, 4.4)),
    ("o1", rate(15.0, 60.0)),
    ("o3-mini", rate(1.1, 4.4)),
    ("o3", rate(2.0, 8.0)),
    ("o4-mini", rate(1.1, 4.4)),
    // Anthropic
    ("claude-3-7-sonnet", rate(3.0, 15.0)),
    ("claude-3.7-sonnet", rate(3.0, 15.0)),
    ("claude-3-5-sonnet", rate(3.0, 15.0)),
    ("claude-3.5-sonnet", rate(3.0, 15.0)),
    ("claude-3-5-haiku", rate(0.8, 4.0)),
    ("claude-3.5-haiku", rate(0.8, 4.0)),
    ("claude-3-opus", rate(15.0, 75.0)),
    ("claude-3-sonnet", rate(3.0, 15.0)),
    ("claude-3-haiku", rate(0.25, 1.25)),
    ("claude-opus-4-5", rate(5.0, 25.0)),
    ("claude-opus-4", rate(15.0, 75.0)),
    ("claude-sonnet-4", rate(3.0, 15.0)),
    ("claude-haiku-4-5", rate(1.0, 5.0)),
    ("claude-opus", rate(15.0, 75.0)),
    ("claude-sonnet", rate(3.0, 15.0)),
    ("claude-haiku", rate(0.25, 1.25)),
    // Google
    ("gemini-1.5-flash", rate(0.075, 0.6)),
    ("gemini-1.5-pro", rate(1.25, 10.0)),
    ("gemini-2.5-flash-lite", rate(0.1, 0.4)),
    ("gemini-2.5-flash-image", rate(0.15, 30.0)),
    ("gemini-2.5-flash", rate(0.3, 2.5)),
    ("gemini-2.5-pro", rate(1.25, 10.0)),
    ("gemini-2.5", rate(0.3, 2.5)),
    ("gemini-2.0-flash", rate(0.3, 2.5)),
    ("gemini-2", rate(0.5, 1.5)),
    ("gemini-3-pro-image", rate(2.0, 120.0)),
    ("gemini-3-flash-preview", rate(0.5, 1.5)),
    ("gemini-3", rate(2.0, 12.0)),
    ("gemini-pro-vision", rate(0.5, 1.5)),
    ("gemini-pro", rate(0.5, 1.5)),
    // xAI
    ("grok-vision-beta", rate(5.0, 15.0)),
    ("grok-beta", rate(5.0, 15.0)),
    ("grok-2-vision", rate(2.0, 10.0)),
    ("grok-2-1212", rate(2.0, 10.0)),
    ("grok-2-latest", rate(2.0, 10.0)),
    ("grok-2", rate(2.0, 10.0)),
    ("grok-3-fast", rate(5.0, 25.0)),
    ("grok-3-mini", rate(0.3, 0.5)),
    ("grok-3", rate(3.0, 15.0)),
    ("grok-4-fast", rate(0.2, 0.5)),
    ("grok-4", rate(3.0, 15.0)),
    // Mistral
    ("codestral", rate(0.3, 0.9)),
    ("ministral-3b", rate(0.04, 0.04)),
    ("ministral-8b", rate(0.1, 0.1)),
    ("mistral-nemo", rate(0.15, 0.15)),
    ("mistral-saba", rate(0.2, 0.6)),
    ("pixtral-large", rate(2.0, 6.0)),
    ("mistral-large", rate(2.0, 6.0)),
    ("mixtral-8x22b", rate(0.65, 0.65)),
    // Moonshot
    ("kimi", rate(0.14, 2.49)),
    // Family-level fallbacks: any model name containing one of these.
    // Kept last so exact keys above take precedence under first-match.
    ("claude-", rate(0.8, 2.4)),
    ("deepseek", rate(0.28, 0.42)),
    ("command", rate(0.38, 0.38)),
    ("gemma", rate(0.02, 0.04)),
    ("gemini", rate(0.5, 1.5)),
    ("grok", rate(2.0, 10.0)),
    ("gpt-oss", rate(0.05, 0.2)),
];

/// Ordered mapping from lowercase pattern to [`RateEntry`].
///
/// Built once at startup and shared by reference; never mutated at runtime.
/// Iteration order of [`RateTable::patterns`] is the declared match priority.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<(String, RateEntry)>,
    index: HashMap<String, usize>,
}

impl RateTable {
    /// Build a table from `(pattern, entry)` pairs, preserving order.
    ///
    /// Patterns are lowercased; a duplicate pattern keeps its first position
    /// and rates (later duplicates are ignored).
    pub fn from_entries<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, RateEntry)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for (pattern, entry) in pairs {
            let pattern = pattern.into().to_lowercase();
            if index.contains_key(&pattern) {
                continue;
            }
            index.insert(pattern.clone(), entries.len());
            entries.push((pattern, entry));
        }
        Self { entries, index }
    }

    /// The built-in table with current provider rates.
    pub fn default_table() -> Self {
        Self::from_entries(DEFAULT_ENTRIES.iter().map(|(p, e)| (*p, *e)))
    }

    /// Exact (case-normalized) pattern lookup.
    pub fn lookup_entry(&self, pattern: &str) -> Option<&RateEntry> {
        let key = pattern.to_lowercase();
        self.index.get(&key).map(|&i| &self.entries[i].1)
    }

    /// Whether `pattern` is a declared key.
    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains_key(&pattern.to_lowercase())
    }

    /// Patterns in declared match-priority order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Patterns with their rates, in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RateEntry)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::default_table()
    }
}
