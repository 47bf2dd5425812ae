//! RuleSet: the in-memory rule table plus its memoized vocabularies.
//!
//! A `RuleSet` is built once per session from whatever the data source
//! returned and is read-only afterwards. Rule order is the order received;
//! no query reorders it.

use crate::{error::DataUnavailable, types::Rule};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    /// Distinct antecedents, ascending.
    antecedents: Vec<String>,
    /// Distinct consequents, ascending.
    consequents: Vec<String>,
}

impl RuleSet {
    /// Wrap already-decoded rules and derive both vocabularies.
    ///
    /// No validation is performed. Out-of-range metrics are counted and
    /// reported in a single warning.
    pub fn load(rules: Vec<Rule>) -> Self {
        let antecedents = vocabulary(rules.iter().map(|r| r.antecedent.as_str()));
        let consequents = vocabulary(rules.iter().map(|r| r.consequent.as_str()));

        let set = Self {
            rules,
            antecedents,
            consequents,
        };

        let suspicious = set.out_of_range_count();
        if suspicious > 0 {
            tracing::warn!(
                rules = set.rules.len(),
                out_of_range = suspicious,
                "rule set contains metrics outside their nominal range"
            );
        }
        tracing::info!(
            rules = set.rules.len(),
            antecedents = set.antecedents.len(),
            consequents = set.consequents.len(),
            "rule set loaded"
        );
        set
    }

    /// Decode a JSON array of wire records and [`load`](Self::load) it.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DataUnavailable> {
        let rules: Vec<Rule> = serde_json::from_slice(bytes)?;
        Ok(Self::load(rules))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Antecedent vocabulary: every distinct weather condition, sorted.
    pub fn antecedents(&self) -> &[String] {
        &self.antecedents
    }

    /// Consequent vocabulary: every distinct symptom, sorted.
    pub fn consequents(&self) -> &[String] {
        &self.consequents
    }

    /// Number of rules with at least one metric outside its nominal range.
    pub fn out_of_range_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_out_of_range()).count()
    }
}

fn vocabulary<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
