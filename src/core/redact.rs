//! Redaction engine
//!
//! Walks a document with the same path rules as the analyzer and, for every
//! leaf (or whole array) whose path is declared in a [`PiiConfig`], replaces
//! the value with a deterministic `<LABEL:N>` placeholder.
//!
//! The one nontrivial correctness property of the whole system lives here:
//! within a single invocation, the same `(label, value)` pair always yields
//! the same placeholder. The same person's email recurring across records in
//! one document collapses to one token, so records referring to the same
//! person remain visibly linked while the raw value stays hidden.
//! Placeholder numbering per label follows first-encounter order of the
//! depth-first traversal.
//!
//! Cache and counters are scoped to one `redact` call and must not be reused
//! across documents; the [`RedactionContext`] holding them is created fresh
//! inside each call.

use crate::core::pii_config::PiiConfig;
use crate::core::summary::RedactionSummary;
use crate::domain::{JsonPath, Result, ShroudError};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

use super::analyze::DEFAULT_MAX_DEPTH;

/// A single placeholder substitution performed during one redaction pass.
///
/// Carries a SHA-256 hash of the replaced value rather than the value
/// itself, so events are safe to log and audit.
#[derive(Debug, Clone, Serialize)]
pub struct RedactionEvent {
    /// Structural path where the substitution happened.
    pub path: JsonPath,
    /// PII label the config declared for the path.
    pub label: String,
    /// Placeholder token written into the document.
    pub placeholder: String,
    /// SHA-256 hex digest of the normalized original value (never plaintext).
    pub value_hash: String,
    /// False when the placeholder was freshly issued, true on cache hits.
    pub reused: bool,
}

/// Redaction engine over in-memory JSON values.
///
/// The engine itself holds no per-document state and can be reused across
/// documents; each `redact` call is fully isolated.
#[derive(Debug, Clone)]
pub struct RedactionEngine {
    max_depth: usize,
}

impl RedactionEngine {
    /// Create an engine with the default depth guard.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the traversal depth guard.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Redact the document in place and return a summary of the pass.
    ///
    /// Paths in `config` that never match the document are harmless; a
    /// `null` leaf at a configured path is always passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ShroudError::DepthLimitExceeded`] when nesting exceeds the
    /// configured guard; no other failure mode exists for well-formed input.
    pub fn redact(&self, document: &mut Value, config: &PiiConfig) -> Result<RedactionSummary> {
        let mut context = RedactionContext::new();
        self.walk(document, &JsonPath::root(), 0, config, &mut context)?;

        debug!(
            substitutions = context.events.len(),
            distinct_values = context.cache.values().map(HashMap::len).sum::<usize>(),
            "Redaction pass complete"
        );
        Ok(RedactionSummary::from_events(context.events))
    }

    fn walk(
        &self,
        value: &mut Value,
        path: &JsonPath,
        depth: usize,
        config: &PiiConfig,
        context: &mut RedactionContext,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(ShroudError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }

        match value {
            Value::Object(map) => {
                for (key, member) in map.iter_mut() {
                    let member_path = path.child(key);
                    if let Some(label) = config.label_for(member_path.as_str()) {
                        // Config match wins over recursion: compound members
                        // are replaced wholesale. Null stays null.
                        if !member.is_null() {
                            *member = context.placeholder_for(label, member, &member_path);
                        }
                    } else if member.is_object() || member.is_array() {
                        self.walk(member, &member_path, depth + 1, config, context)?;
                    }
                }
            }
            Value::Array(elements) => {
                let element_path = path.array();
                if let Some(label) = config.label_for(element_path.as_str()) {
                    // A declared array path redacts every element in place,
                    // each passed through the cache independently.
                    for element in elements.iter_mut() {
                        if !element.is_null() {
                            *element = context.placeholder_for(label, element, &element_path);
                        }
                    }
                } else {
                    for element in elements.iter_mut() {
                        if element.is_object() || element.is_array() {
                            self.walk(element, &element_path, depth + 1, config, context)?;
                        }
                    }
                }
            }
            // Scalars not covered by the config at their exact path are left
            // unmodified: redaction is opt-in per path, never content-driven.
            _ => {}
        }
        Ok(())
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-invocation placeholder cache and counters.
struct RedactionContext {
    /// label -> normalized value key -> issued placeholder
    cache: HashMap<String, HashMap<String, String>>,
    /// label -> count of distinct values redacted so far
    counters: HashMap<String, usize>,
    events: Vec<RedactionEvent>,
}

impl RedactionContext {
    fn new() -> Self {
        Self {
            cache: HashMap::new(),
            counters: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Return the placeholder for a `(label, value)` pair, issuing and
    /// numbering a new one on first encounter.
    fn placeholder_for(&mut self, label: &str, value: &Value, path: &JsonPath) -> Value {
        let key = normalized_key(value);
        let label_cache = self.cache.entry(label.to_string()).or_default();

        let (placeholder, reused) = match label_cache.get(&key) {
            Some(existing) => (existing.clone(), true),
            None => {
                let counter = self.counters.entry(label.to_string()).or_insert(0);
                *counter += 1;
                let placeholder = format!("<{label}:{counter}>");
                label_cache.insert(key.clone(), placeholder.clone());
                (placeholder, false)
            }
        };

        self.events.push(RedactionEvent {
            path: path.clone(),
            label: label.to_string(),
            placeholder: placeholder.clone(),
            value_hash: hash_value_key(&key),
            reused,
        });
        Value::String(placeholder)
    }
}

/// Canonical cache key for a value.
///
/// The JSON text form distinguishes `"1"` from `1`, and serde_json's default
/// map representation already orders object keys deterministically, so
/// compound values serialize order-stable. The key is internal to the cache
/// and never emitted.
fn normalized_key(value: &Value) -> String {
    value.to_string()
}

fn hash_value_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
