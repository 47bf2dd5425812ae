//! Test builders: ergonomic constructors for `Rule` and `RuleSet`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use armview_core::{Rule, RuleSet};

// ---------------------------------------------------------------------------
// RuleBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Rule`] test fixtures.
///
/// # Example
///
/// ```rust,ignore
/// let rule = RuleBuilder::new("Rainy", "Cough")
///     .confidence(0.65)
///     .lift(1.8)
///     .build();
/// ```
pub struct RuleBuilder {
    antecedent: String,
    consequent: String,
    support: f64,
    confidence: f64,
    lift: f64,
}

impl RuleBuilder {
    pub fn new(antecedent: impl Into<String>, consequent: impl Into<String>) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
            support: 0.1,
            confidence: 0.5,
            lift: 1.0,
        }
    }

    pub fn support(mut self, support: f64) -> Self {
        self.support = support;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn lift(mut self, lift: f64) -> Self {
        self.lift = lift;
        self
    }

    pub fn build(self) -> Rule {
        Rule::new(self.antecedent, self.consequent, self.support, self.confidence, self.lift)
    }
}

/// Build a rule set from `(antecedent, consequent)` pairs with default metrics.
pub fn rule_set(pairs: &[(&str, &str)]) -> RuleSet {
    RuleSet::load(pairs.iter().map(|(a, c)| RuleBuilder::new(*a, *c).build()).collect())
}

/// Serialize rules to the wire JSON array the rules API returns.
pub fn to_wire_json(rules: &[Rule]) -> String {
    serde_json::to_string(rules).expect("rules serialize")
}
