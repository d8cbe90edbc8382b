//! Redact command implementation
//!
//! This module implements the `redact` command, which replaces PII values
//! in a JSON document with stable `<LABEL:N>` placeholders according to a
//! PII config, and optionally records the run in the audit log.

use super::{read_json_input, write_output};
use crate::config::load_config_or_default;
use crate::core::{AuditLogger, PiiConfig, RedactionEngine};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Input JSON document (use `-` for stdin)
    #[arg(short, long)]
    pub input: String,

    /// PII config file mapping paths to labels
    #[arg(short, long)]
    pub pii_config: String,

    /// Output file for the redacted document (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print a per-label substitution summary to stderr
    #[arg(long)]
    pub summary: bool,

    /// Maximum nesting depth before the document is rejected
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            input = %self.input,
            pii_config = %self.pii_config,
            "Starting redact command"
        );

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let pii_config = match PiiConfig::load_from_file(&self.pii_config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load PII config");
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        if pii_config.is_empty() {
            tracing::warn!("PII config is empty, nothing will be redacted");
        }

        let mut document = match read_json_input(&self.input) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input document");
                eprintln!("Error: {e}");
                return Ok(5);
            }
        };

        let max_depth = self.max_depth.unwrap_or(config.analysis.max_depth);
        let engine = RedactionEngine::new().with_max_depth(max_depth);

        let summary = match engine.redact(&mut document, &pii_config) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Redaction failed");
                eprintln!("Redaction failed: {e}");
                return Ok(5);
            }
        };

        tracing::info!(
            run_id = %summary.run_id,
            substitutions = summary.total_substitutions,
            "Redaction complete"
        );

        // Audit trail records hashes only, never plaintext
        if config.audit.enabled {
            let logger = AuditLogger::new(PathBuf::from(&config.audit.path), true)?;
            if let Err(e) = logger.log_run(&self.input, &summary) {
                tracing::error!(error = %e, "Failed to write audit log");
                eprintln!("Failed to write audit log: {e}");
                return Ok(5);
            }
        }

        let rendered = serde_json::to_string_pretty(&document)?;
        write_output(self.output.as_deref(), &rendered)?;

        if self.summary {
            eprintln!("{}", summary.format_console());
        }

        Ok(0)
    }
}
