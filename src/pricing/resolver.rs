//! Model-name to rate-table pattern resolution.

use crate::pricing::table::RateTable;

/// Legacy fixed-size aliases, in priority order.
///
/// Older GPT naming schemes priced models by context window rather than by
/// name. Names that escape the primary table fall through to these size-class
/// keys; keeping the stage separate avoids polluting the table itself with
/// obsolete patterns.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("gpt-3.5-turbo-16k", "16k"),
    ("gpt-3.5", "4k"),
    ("gpt-4-vision", "gpt-4-1106"),
    ("gpt-4-0125", "gpt-4-1106"),
    ("gpt-4-turbo", "gpt-4-1106"),
    ("gpt-4-32k", "32k"),
    ("gpt-4", "8k"),
];

/// How a pattern was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The lowercased name equals a table key.
    Exact,
    /// A table key is a substring of the name (first in declared order).
    Substring,
    /// Matched through [`LEGACY_ALIASES`].
    LegacyAlias,
}

/// A resolved rate-table key for a model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedKey<'a> {
    /// The winning table pattern.
    pub pattern: &'a str,
    pub via: MatchKind,
}

/// Resolve a raw model identifier to a rate-table pattern.
///
/// Exact match always pre-empts substring containment; containment scans
/// keys in table-declaration order and takes the first hit; the legacy alias
/// stage runs only when the table yields nothing. Returns `None` for empty
/// names and names no stage recognizes.
pub fn resolve<'t>(table: &'t RateTable, model: &str) -> Option<ResolvedKey<'t>> {
    if model.is_empty() {
        return None;
    }
    let lower = model.to_lowercase();

    if let Some(pattern) = table.patterns().find(|&p| p == lower) {
        return Some(ResolvedKey {
            pattern,
            via: MatchKind::Exact,
        });
    }

    if let Some(pattern) = table.patterns().find(|&p| lower.contains(p)) {
        return Some(ResolvedKey {
            pattern,
            via: MatchKind::Substring,
        });
    }

    for &(needle, target) in LEGACY_ALIASES {
        if lower.contains(needle) {
            // Alias targets are table keys; borrow the table's copy so the
            // returned pattern always points into the table.
            let pattern = table.patterns().find(|&p| p == target)?;
            return Some(ResolvedKey {
                pattern,
                via: MatchKind::LegacyAlias,
            });
        }
    }

    None
}
