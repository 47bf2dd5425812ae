//! Core types for armview-core.
//!
//! A [`Rule`] is one association rule as served by the rules API. Field names
//! on the wire follow the mining pipeline (`antecedents_str`,
//! `consequents_str`); in Rust they are singular.

use serde::{de, Deserialize, Deserializer, Serialize};

/// One association rule: "if `antecedent` then `consequent`".
///
/// Rules are immutable once loaded and have no id; two rules are the same
/// rule when every field matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Weather condition label.
    #[serde(
        rename = "antecedents_str",
        default,
        deserialize_with = "string_or_null"
    )]
    pub antecedent: String,
    /// Symptom label.
    #[serde(
        rename = "consequents_str",
        default,
        deserialize_with = "string_or_null"
    )]
    pub consequent: String,
    /// Fraction of observations in which the rule holds, nominally in `[0, 1]`.
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub support: f64,
    /// P(consequent | antecedent), nominally in `[0, 1]`.
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub confidence: f64,
    /// Observed over expected co-occurrence. `1.0` means independent.
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub lift: f64,
}

impl Rule {
    pub fn new(
        antecedent: impl Into<String>,
        consequent: impl Into<String>,
        support: f64,
        confidence: f64,
        lift: f64,
    ) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
            support,
            confidence,
            lift,
        }
    }

    /// True when any metric falls outside its nominal range, or is missing.
    ///
    /// The engine never rejects such rules; this only feeds the load-time
    /// warning.
    pub fn is_out_of_range(&self) -> bool {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        !unit(self.support) || !unit(self.confidence) || !(self.lift >= 0.0)
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

fn missing_number() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept a JSON number, a numeric string, or `null` (decoded as NaN).
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, found {s:?}"))),
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
