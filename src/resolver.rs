//! Settlement name resolution.
//!
//! Maps Hebrew settlement names to Kod Yeshuv codes: exact (trimmed,
//! case-sensitive) equality first, then bidirectional case-insensitive
//! substring containment over the whole catalog, capped at
//! [`PARTIAL_MATCH_LIMIT`] results in catalog order. A miss is a structured
//! outcome, never an error. Pure function of the catalog and the input.

use crate::constants::PARTIAL_MATCH_LIMIT;
use crate::reference::{settlements, Settlement};

/// Outcome of a settlement lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementMatch {
    /// Trimmed input equals a catalog name; carries that settlement's code.
    Exact { kod_yeshuv: i64 },
    /// No exact match; one or more names contain the input or vice versa.
    Partial { matches: Vec<&'static Settlement> },
    /// Neither exact nor partial matches exist.
    None,
}

/// Resolves a Hebrew settlement name against the catalog.
pub fn resolve(name: &str) -> SettlementMatch {
    let trimmed = name.trim();

    // First exact match wins; the table preserves source insertion order.
    if let Some(found) = settlements().iter().find(|s| s.name_hebrew == trimmed) {
        return SettlementMatch::Exact {
            kod_yeshuv: found.kod_yeshuv,
        };
    }

    let needle = trimmed.to_lowercase();
    if needle.is_empty() {
        return SettlementMatch::None;
    }

    let matches: Vec<&'static Settlement> = settlements()
        .iter()
        .filter(|s| {
            let candidate = s.name_hebrew.to_lowercase();
            candidate.contains(&needle) || needle.contains(&candidate)
        })
        .take(PARTIAL_MATCH_LIMIT)
        .collect();

    if matches.is_empty() {
        SettlementMatch::None
    } else {
        SettlementMatch::Partial { matches }
    }
}

/// Returns the settlement code only for an exact name match.
///
/// The search path converts names to codes this way: a partial match is
/// too ambiguous to silently pick a filter code from.
pub fn exact_code(name: &str) -> Option<i64> {
    match resolve(name) {
        SettlementMatch::Exact { kod_yeshuv } => Some(kod_yeshuv),
        _ => None,
    }
}
