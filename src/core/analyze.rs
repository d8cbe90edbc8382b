//! Schema analysis of JSON documents
//!
//! The analyzer walks a document once, depth-first, grouping every leaf by
//! its structural path and retaining a bounded, deterministic set of masked
//! sample fingerprints per path. The resulting [`SchemaReport`] is the input
//! contract of the PII classifier: it exposes document *shape*, never raw
//! values.
//!
//! Determinism: for a given document the report is byte-identical across
//! runs. Entries appear in first-discovery order of their paths, and each
//! entry keeps the lexicographically smallest `sample_cap` distinct
//! fingerprints, sorted ascending, rather than a first-seen sample.

use crate::core::mask::mask;
use crate::domain::{JsonPath, Result, ShroudError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Default number of distinct sample fingerprints kept per path.
pub const DEFAULT_SAMPLE_CAP: usize = 5;

/// Default traversal depth guard for untrusted documents.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// One entry of a schema report: a path and its retained fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Structural path addressing the leaves this entry summarizes.
    pub path: JsonPath,
    /// Up to `sample_cap` distinct fingerprints, sorted ascending.
    pub samples: Vec<String>,
}

/// Schema report produced by one analysis pass.
///
/// Serializes as a JSON array of `{"path": ..., "samples": [...]}` objects,
/// the interchange format consumed by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaReport {
    pub entries: Vec<SchemaEntry>,
}

impl SchemaReport {
    /// Number of distinct paths in the report.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the analyzed document had no leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a path, if the document produced one.
    pub fn entry(&self, path: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.path.as_str() == path)
    }
}

/// Schema analyzer over in-memory JSON values.
///
/// The analyzer is read-only and stateless across invocations; the only
/// failure mode is the depth guard tripping on pathologically nested input.
#[derive(Debug, Clone)]
pub struct SchemaAnalyzer {
    sample_cap: usize,
    max_depth: usize,
}

impl SchemaAnalyzer {
    /// Create an analyzer with the default sample cap and depth guard.
    pub fn new() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the number of fingerprints retained per path.
    pub fn with_sample_cap(mut self, cap: usize) -> Self {
        self.sample_cap = cap;
        self
    }

    /// Override the traversal depth guard.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Analyze a document into a schema report.
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::DepthLimitExceeded`] when nesting exceeds the
    /// configured guard. Well-formed input within the guard cannot fail.
    pub fn analyze(&self, document: &Value) -> Result<SchemaReport> {
        let mut collector = SampleCollector::default();
        self.traverse(document, &JsonPath::root(), 0, &mut collector)?;

        let entries = collector
            .order
            .into_iter()
            .map(|path| {
                let samples = collector
                    .samples
                    .remove(path.as_str())
                    .unwrap_or_default()
                    .into_iter()
                    .take(self.sample_cap)
                    .collect();
                SchemaEntry { path, samples }
            })
            .collect();

        Ok(SchemaReport { entries })
    }

    fn traverse(
        &self,
        value: &Value,
        path: &JsonPath,
        depth: usize,
        collector: &mut SampleCollector,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(ShroudError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Object(map) => {
                for (key, member) in map {
                    self.traverse(member, &path.child(key), depth + 1, collector)?;
                }
            }
            Value::Array(elements) => {
                let element_path = path.array();
                for element in elements {
                    self.traverse(element, &element_path, depth + 1, collector)?;
                }
            }
            leaf => collector.record(path, mask(leaf)),
        }
        Ok(())
    }
}

impl Default for SchemaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates distinct fingerprints per path during one traversal.
///
/// A `BTreeSet` keeps each path's fingerprints deduplicated and ordered, so
/// taking the first N after traversal yields the lexicographically smallest.
/// `order` remembers first discovery of each path; the report has no
/// semantic ordering but a stable one keeps output reproducible.
#[derive(Debug, Default)]
struct SampleCollector {
    order: Vec<JsonPath>,
    samples: HashMap<String, BTreeSet<String>>,
}

impl SampleCollector {
    fn record(&mut self, path: &JsonPath, fingerprint: String) {
        if !self.samples.contains_key(path.as_str()) {
            self.order.push(path.clone());
        }
        self.samples
            .entry(path.as_str().to_string())
            .or_default()
            .insert(fingerprint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analyze_flat_object() {
        let doc = json!({"name": "Anna", "age": 30});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.entry("name").unwrap().samples, vec!["LLLL"]);
        assert_eq!(report.entry("age").unwrap().samples, vec!["DD"]);
    }

    #[test]
    fn test_array_indices_collapse_to_one_path() {
        let doc = json!({"items": [{"id": 1}, {"id": 2}]});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();

        assert_eq!(report.len(), 1);
        let entry = report.entry("items[].id").unwrap();
        assert_eq!(entry.samples, vec!["D"]);
    }

    #[test]
    fn test_sample_cap_keeps_lexicographically_smallest() {
        // Seven distinct fingerprints at one path; the cap of 5 must keep
        // the smallest five in ascending order.
        let doc = json!({
            "v": ["a", "bb", "ccc", "dddd", "1", "22", "333"]
        });
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();
        let entry = report.entry("v[]").unwrap();

        assert_eq!(entry.samples, vec!["D", "DD", "DDD", "L", "LL"]);
    }

    #[test]
    fn test_duplicate_fingerprints_are_distinct_once() {
        let doc = json!({"names": ["Anna", "Ivan", "Olga"]});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();

        // All three mask to LLLL
        assert_eq!(report.entry("names[]").unwrap().samples, vec!["LLLL"]);
    }

    #[test]
    fn test_null_leaf_contributes_type_tag() {
        let doc = json!({"middle_name": null});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();
        assert_eq!(report.entry("middle_name").unwrap().samples, vec!["null"]);
    }

    #[test]
    fn test_scalar_document() {
        let report = SchemaAnalyzer::new().analyze(&json!("hello")).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.entry("").unwrap().samples, vec!["LLLLL"]);
    }

    #[test]
    fn test_determinism() {
        let doc = json!({
            "users": [
                {"name": "Anna Ivanova", "email": "a@x.com", "tags": ["vip", "x2"]},
                {"name": "Ivan Petrov", "email": "ip@y.org", "tags": []}
            ],
            "total": 2
        });
        let analyzer = SchemaAnalyzer::new();
        let first = serde_json::to_string(&analyzer.analyze(&doc).unwrap()).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&doc).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_discovery_order_is_preserved() {
        let doc = json!({"b": 1, "a": 2});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();
        // serde_json's default map sorts keys, so discovery order here is a..b
        let paths: Vec<&str> = report.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_depth_guard() {
        let mut doc = json!("leaf");
        for _ in 0..20 {
            doc = json!({ "next": doc });
        }

        let analyzer = SchemaAnalyzer::new().with_max_depth(10);
        let err = analyzer.analyze(&doc).unwrap_err();
        assert!(matches!(err, ShroudError::DepthLimitExceeded { max_depth: 10 }));
    }

    #[test]
    fn test_report_serialization_shape() {
        let doc = json!({"name": "Anna"});
        let report = SchemaAnalyzer::new().analyze(&doc).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json, json!([{"path": "name", "samples": ["LLLL"]}]));
    }
}
