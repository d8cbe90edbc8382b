//! Redaction run summaries
//!
//! This module provides a formatted summary for one redaction pass: how many
//! substitutions happened, how many distinct values each label covered, and
//! the individual (hashed) substitution events for auditing.

use crate::core::redact::RedactionEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Per-label statistics for one redaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    /// Total substitutions under this label, cache hits included.
    pub occurrences: usize,
    /// Distinct original values seen under this label.
    pub distinct_values: usize,
}

/// Summary of one redaction pass.
#[derive(Debug, Clone, Serialize)]
pub struct RedactionSummary {
    /// Unique identifier for this redaction run.
    pub run_id: Uuid,

    /// When the pass finished.
    pub timestamp: DateTime<Utc>,

    /// Total placeholder substitutions performed.
    pub total_substitutions: usize,

    /// Statistics per PII label.
    pub by_label: HashMap<String, LabelStats>,

    /// Individual substitution events (hashed values only).
    pub events: Vec<RedactionEvent>,
}

impl RedactionSummary {
    /// Build a summary from the events of one pass.
    pub fn from_events(events: Vec<RedactionEvent>) -> Self {
        let mut by_label: HashMap<String, LabelStats> = HashMap::new();
        for event in &events {
            let stats = by_label.entry(event.label.clone()).or_default();
            stats.occurrences += 1;
            if !event.reused {
                stats.distinct_values += 1;
            }
        }

        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            total_substitutions: events.len(),
            by_label,
            events,
        }
    }

    /// Distinct values redacted under a label, if the label was matched.
    pub fn distinct_values_for(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).map(|s| s.distinct_values)
    }

    /// Format the summary for console output.
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("Redaction summary\n");
        output.push_str("-----------------\n");
        output.push_str(&format!("  Run ID:              {}\n", self.run_id));
        output.push_str(&format!(
            "  Total substitutions: {}\n",
            self.total_substitutions
        ));

        if !self.by_label.is_empty() {
            output.push('\n');
            output.push_str("  Label                      Occurrences  Distinct\n");

            let mut labels: Vec<_> = self.by_label.iter().collect();
            labels.sort_by(|a, b| b.1.occurrences.cmp(&a.1.occurrences).then(a.0.cmp(b.0)));

            for (label, stats) in labels {
                output.push_str(&format!(
                    "  {:<26} {:>11}  {:>8}\n",
                    label, stats.occurrences, stats.distinct_values
                ));
            }
        }

        output
    }

    /// Format the summary as pretty-printed JSON.
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JsonPath;

    fn event(label: &str, placeholder: &str, reused: bool) -> RedactionEvent {
        RedactionEvent {
            path: JsonPath::new("user.email"),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value_hash: "deadbeef".to_string(),
            reused,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = RedactionSummary::from_events(Vec::new());
        assert_eq!(summary.total_substitutions, 0);
        assert!(summary.by_label.is_empty());
        assert_eq!(summary.distinct_values_for("EMAIL"), None);
    }

    #[test]
    fn test_counts_per_label() {
        let summary = RedactionSummary::from_events(vec![
            event("EMAIL", "<EMAIL:1>", false),
            event("EMAIL", "<EMAIL:1>", true),
            event("EMAIL", "<EMAIL:2>", false),
            event("PHONE", "<PHONE:1>", false),
        ]);

        assert_eq!(summary.total_substitutions, 4);
        assert_eq!(summary.by_label["EMAIL"].occurrences, 3);
        assert_eq!(summary.distinct_values_for("EMAIL"), Some(2));
        assert_eq!(summary.distinct_values_for("PHONE"), Some(1));
    }

    #[test]
    fn test_format_console_lists_labels() {
        let summary = RedactionSummary::from_events(vec![
            event("EMAIL", "<EMAIL:1>", false),
            event("PHONE", "<PHONE:1>", false),
        ]);

        let output = summary.format_console();
        assert!(output.contains("Total substitutions: 2"));
        assert!(output.contains("EMAIL"));
        assert!(output.contains("PHONE"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let summary = RedactionSummary::from_events(vec![event("EMAIL", "<EMAIL:1>", false)]);
        let json = summary.format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_substitutions"], 1);
    }
}
