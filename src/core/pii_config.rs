//! PII redaction configuration
//!
//! A [`PiiConfig`] maps structural paths to uppercase PII labels and is the
//! sole authority on what gets redacted: paths absent from the config are
//! never touched, no matter how sensitive their values look. Configs are
//! produced by the classifier adapter or authored by hand, and are read-only
//! during redaction.

use crate::domain::{Result, ShroudError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Mapping from path string to PII label governing one redaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PiiConfig {
    labels: HashMap<String, String>,
}

impl PiiConfig {
    /// Create an empty config (nothing will be redacted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from path/label pairs.
    pub fn from_entries<I, P, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: Into<String>,
    {
        Self {
            labels: entries
                .into_iter()
                .map(|(p, l)| (p.into(), l.into()))
                .collect(),
        }
    }

    /// Loads a PII config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::Io`] when the file cannot be read,
    /// [`ShroudError::Parse`] when it is not well-formed JSON, and
    /// [`ShroudError::PiiConfig`] when the JSON is not a flat
    /// string-to-string object.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading PII config");

        let text = std::fs::read_to_string(path).map_err(|e| {
            ShroudError::Io(format!(
                "Failed to read PII config {}: {e}",
                path.display()
            ))
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ShroudError::Parse(format!(
                "Failed to parse PII config {}: {e}",
                path.display()
            ))
        })?;

        let config = Self::from_value(value)?;
        info!(paths = config.len(), "Loaded PII config");
        Ok(config)
    }

    /// Validates and converts a parsed JSON value into a config.
    ///
    /// The accepted shape is exactly `{"<path>": "<LABEL>", ...}`: a flat
    /// object with string values. Labels that are not uppercase are accepted
    /// with a warning, since label text only ever appears inside the emitted
    /// placeholder tokens.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ShroudError::PiiConfig(format!(
                    "Expected a JSON object mapping paths to labels, got {}",
                    type_name(&other)
                )))
            }
        };

        let mut labels = HashMap::with_capacity(map.len());
        for (path, label) in map {
            let label = match label {
                Value::String(s) => s,
                other => {
                    return Err(ShroudError::PiiConfig(format!(
                        "Label for path '{path}' must be a string, got {}",
                        type_name(&other)
                    )))
                }
            };

            if label.is_empty() {
                return Err(ShroudError::PiiConfig(format!(
                    "Label for path '{path}' is empty"
                )));
            }
            if label.chars().any(|c| c.is_lowercase()) {
                warn!(path = %path, label = %label, "PII label is not uppercase");
            }

            labels.insert(path, label);
        }

        Ok(Self { labels })
    }

    /// Label declared for a path, if any.
    pub fn label_for(&self, path: &str) -> Option<&str> {
        self.labels.get(path).map(String::as_str)
    }

    /// Number of declared paths.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no paths are declared.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over declared `(path, label)` pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(p, l)| (p.as_str(), l.as_str()))
    }
}

// Serialized with sorted keys so emitted configs are stable across runs.
impl serde::Serialize for PiiConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let sorted: std::collections::BTreeMap<&str, &str> = self.iter().collect();
        sorted.serialize(serializer)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_value_valid() {
        let config = PiiConfig::from_value(json!({
            "user.email": "EMAIL",
            "user.name": "FULL_NAME"
        }))
        .unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config.label_for("user.email"), Some("EMAIL"));
        assert_eq!(config.label_for("user.phone"), None);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = PiiConfig::from_value(json!(["user.email"])).unwrap_err();
        assert!(matches!(err, ShroudError::PiiConfig(_)));
    }

    #[test]
    fn test_from_value_rejects_nested_values() {
        let err = PiiConfig::from_value(json!({"user": {"email": "EMAIL"}})).unwrap_err();
        assert!(matches!(err, ShroudError::PiiConfig(_)));
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn test_from_value_rejects_empty_label() {
        let err = PiiConfig::from_value(json!({"user.email": ""})).unwrap_err();
        assert!(matches!(err, ShroudError::PiiConfig(_)));
    }

    #[test]
    fn test_serializes_with_sorted_keys() {
        let config = PiiConfig::from_entries([
            ("user.phone", "PHONE"),
            ("user.email", "EMAIL"),
            ("address", "ADDRESS"),
        ]);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"address":"ADDRESS","user.email":"EMAIL","user.phone":"PHONE"}"#
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "FULL_NAME"}"#).unwrap();
        file.flush().unwrap();

        let config = PiiConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.label_for("name"), Some("FULL_NAME"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = PiiConfig::load_from_file("nonexistent-config.json").unwrap_err();
        assert!(matches!(err, ShroudError::Io(_)));
    }

    #[test]
    fn test_load_from_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        file.flush().unwrap();

        let err = PiiConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ShroudError::Parse(_)));
    }
}
