//! Static rule payloads used across harnesses.

/// Two-rule payload from the reference scenario.
pub const SCENARIO_JSON: &str = r#"[
  {"antecedents_str":"Rainy","consequents_str":"Cough","support":0.12,"confidence":0.65,"lift":1.8},
  {"antecedents_str":"Sunny","consequents_str":"Fatigue","support":0.08,"confidence":0.40,"lift":0.9}
]"#;

/// A denser payload with repeated weather conditions and compound
/// antecedents, as the mining pipeline emits them.
pub const MIXED_JSON: &str = r#"[
  {"antecedents_str":"Heavy Rain","consequents_str":"Joint Pain","support":0.10,"confidence":0.72,"lift":2.1},
  {"antecedents_str":"Heavy Rain","consequents_str":"Cough","support":0.06,"confidence":0.41,"lift":1.2},
  {"antecedents_str":"Sunny, Hot","consequents_str":"Headache","support":0.09,"confidence":0.55,"lift":1.4},
  {"antecedents_str":"Cold","consequents_str":"Cough","support":0.11,"confidence":0.60,"lift":1.6},
  {"antecedents_str":"Light Rain","consequents_str":"Fatigue","support":0.04,"confidence":0.30,"lift":0.8},
  {"antecedents_str":"Cold","consequents_str":"Sore Throat","support":0.07,"confidence":0.48,"lift":1.3}
]"#;

/// Missing and string-typed numbers; decodes with NaN / coerced values.
pub const LENIENT_JSON: &str = r#"[
  {"antecedents_str":"Fog","consequents_str":"Asthma","support":"0.05","confidence":null},
  {"consequents_str":"Dizziness","support":0.02,"confidence":0.2,"lift":1.1}
]"#;

/// Not a rule array at all.
pub const MALFORMED_JSON: &str = r#"{"detail":"Not Found"}"#;
