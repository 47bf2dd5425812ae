//! Query engine: exact lookup in both directions, free-text search, and the
//! multi-term weather prediction.
//!
//! Every function borrows from the [`RuleSet`] and returns matches in the
//! set's original order. Lookups are exact and case-sensitive; search and
//! prediction are case-insensitive substring matches.

use crate::{ruleset::RuleSet, types::Rule};

/// Rules whose antecedent equals `antecedent` exactly.
///
/// An empty value means "nothing selected" and yields no rules.
pub fn query_by_antecedent<'a>(set: &'a RuleSet, antecedent: &str) -> Vec<&'a Rule> {
    exact(set, antecedent, |r| &r.antecedent)
}

/// Rules whose consequent equals `consequent` exactly.
///
/// An empty value means "nothing selected" and yields no rules.
pub fn query_by_consequent<'a>(set: &'a RuleSet, consequent: &str) -> Vec<&'a Rule> {
    exact(set, consequent, |r| &r.consequent)
}

/// Rules where `term` appears, ignoring case, in the antecedent or the
/// consequent. The empty term matches every rule.
pub fn search_rules<'a>(set: &'a RuleSet, term: &str) -> Vec<&'a Rule> {
    let needle = term.to_lowercase();
    set.rules()
        .iter()
        .filter(|r| contains_folded(&r.antecedent, &needle) || contains_folded(&r.consequent, &needle))
        .collect()
}

/// Rules whose antecedent contains any of `terms`, ignoring case.
///
/// Blank terms are skipped, so `[]` and `[" "]` both yield no rules. Other
/// terms are matched as given, surrounding whitespace included.
pub fn predict_by_weather<'a, S: AsRef<str>>(set: &'a RuleSet, terms: &[S]) -> Vec<&'a Rule> {
    let needles: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .filter(|t| !t.trim().is_empty())
        .collect();
    if needles.is_empty() {
        return Vec::new();
    }
    set.rules()
        .iter()
        .filter(|r| {
            let antecedent = r.antecedent.to_lowercase();
            needles.iter().any(|n| antecedent.contains(n.as_str()))
        })
        .collect()
}

fn exact<'a>(set: &'a RuleSet, value: &str, field: impl Fn(&Rule) -> &String) -> Vec<&'a Rule> {
    if value.is_empty() {
        return Vec::new();
    }
    set.rules().iter().filter(|&r| field(r) == value).collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || haystack.to_lowercase().contains(folded_needle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
