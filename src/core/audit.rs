//! Audit logging for redaction runs
//!
//! Appends one JSONL entry per redaction pass, recording which paths were
//! redacted under which labels together with SHA-256 hashes of the original
//! values. Plaintext PII never reaches the audit log; the hashes are enough
//! to correlate a placeholder back to a value someone already holds.

use crate::core::summary::RedactionSummary;
use crate::domain::{Result, ShroudError};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry for one redaction pass.
#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    timestamp: String,
    run_id: String,
    source: &'a str,
    total_substitutions: usize,
    substitutions: Vec<AuditSubstitution<'a>>,
}

/// One substitution within an audit entry (hashed value only).
#[derive(Debug, Serialize)]
struct AuditSubstitution<'a> {
    label: &'a str,
    path: &'a str,
    placeholder: &'a str,
    /// SHA-256 hash of the original value (never log plaintext PII)
    value_hash: &'a str,
}

/// Audit logger for redaction runs.
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger.
    ///
    /// The parent directory is created eagerly so a misconfigured path fails
    /// at startup rather than after a document has been processed.
    pub fn new(log_path: PathBuf, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ShroudError::Io(format!(
                            "Failed to create audit log directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        Ok(Self { log_path, enabled })
    }

    /// Append an entry for one redaction pass.
    pub fn log_run(&self, source: &str, summary: &RedactionSummary) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditEntry {
            timestamp: summary.timestamp.to_rfc3339(),
            run_id: summary.run_id.to_string(),
            source,
            total_substitutions: summary.total_substitutions,
            substitutions: summary
                .events
                .iter()
                .map(|e| AuditSubstitution {
                    label: &e.label,
                    path: e.path.as_str(),
                    placeholder: &e.placeholder,
                    value_hash: &e.value_hash,
                })
                .collect(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                ShroudError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        let line = serde_json::to_string(&entry)
            .map_err(|e| ShroudError::Serialization(e.to_string()))?;
        writeln!(file, "{line}")
            .map_err(|e| ShroudError::Io(format!("Failed to write audit entry: {e}")))?;

        Ok(())
    }
}
