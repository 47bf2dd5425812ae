//! Headless mode: run one query against the loaded rule set and print it.

use armview_core::{
    config::Config, predict_by_weather, query_by_antecedent, query_by_consequent, search_rules,
    Rule, RuleSet,
};
use armview_tui::format;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `antecedent → consequent` followed by the three metrics.
    Text,
    /// One JSON object per rule, using the wire field names.
    Jsonl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    All,
    Weather(String),
    Symptom(String),
    Search(String),
    Predict(Vec<String>),
}

impl Query {
    fn run<'a>(&self, rules: &'a RuleSet) -> Vec<&'a Rule> {
        match self {
            Query::All => rules.rules().iter().collect(),
            Query::Weather(v) => query_by_antecedent(rules, v),
            Query::Symptom(v) => query_by_consequent(rules, v),
            Query::Search(t) => search_rules(rules, t),
            Query::Predict(terms) => predict_by_weather(rules, terms),
        }
    }
}

pub fn write_rules(
    out: &mut impl Write,
    rules: &RuleSet,
    query: &Query,
    fmt: OutputFormat,
    config: &Config,
) -> anyhow::Result<()> {
    let hits = query.run(rules);
    tracing::debug!(query = ?query, hits = hits.len(), "headless query");

    let decimals = config.ui.card_percent_decimals;
    for rule in hits {
        match fmt {
            OutputFormat::Text => writeln!(
                out,
                "{} → {}\tsupport={}\tconfidence={}\tlift={}",
                rule.antecedent,
                rule.consequent,
                format::percent(rule.support, decimals),
                format::percent(rule.confidence, decimals),
                format::lift(rule.lift),
            )?,
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut *out, rule)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::load(vec![
            Rule::new("Rainy", "Cough", 0.12, 0.65, 1.8),
            Rule::new("Sunny", "Headache", 0.08, 0.40, 0.9),
        ])
    }

    fn render(query: Query, fmt: OutputFormat) -> String {
        let mut out = Vec::new();
        write_rules(&mut out, &rules(), &query, fmt, &Config::defaults()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_lists_all_rules_by_default() {
        let text = render(Query::All, OutputFormat::Text);
        assert_eq!(
            text,
            "Rainy → Cough\tsupport=12.00%\tconfidence=65.00%\tlift=1.80\n\
             Sunny → Headache\tsupport=8.00%\tconfidence=40.00%\tlift=0.90\n"
        );
    }

    #[test]
    fn jsonl_uses_wire_names() {
        let text = render(Query::Symptom("Headache".into()), OutputFormat::Jsonl);
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["antecedents_str"], "Sunny");
        assert_eq!(value["consequents_str"], "Headache");
    }

    #[test]
    fn predict_matches_any_term() {
        let text = render(Query::Predict(vec!["rain".into(), "".into()]), OutputFormat::Text);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Rainy"));
    }
}
